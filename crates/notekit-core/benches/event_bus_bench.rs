use criterion::{black_box, criterion_group, criterion_main, Criterion};
use notekit_core::{EditorEvent, EventBus, EventCategory, EventFilter, HistoryEvent};

fn bench_publish(c: &mut Criterion) {
    let bus = EventBus::new();
    for _ in 0..8 {
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::History]),
            |event| {
                black_box(event);
            },
        );
    }
    let event = EditorEvent::History(HistoryEvent::Changed {
        can_undo: true,
        can_redo: false,
    });

    c.bench_function("event_bus_publish_8_handlers", |b| {
        b.iter(|| bus.publish(black_box(event.clone())))
    });
}

criterion_group!(benches, bench_publish);
criterion_main!(benches);
