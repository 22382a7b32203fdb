use notekit_editor::geometry::{PathGeometry, Point};
use notekit_editor::model::{Color, Item, ItemTransform, PathItem};
use notekit_editor::{
    erase_item, ApproximateTextMetrics, EraseOutcome, Layer, Scene, SceneCommand, UndoStack,
};

fn stroke(x: f64) -> Item {
    Item::path(PathItem::stroked(
        PathGeometry::polyline(&[Point::new(x, 0.0), Point::new(x + 10.0, 0.0)]),
        Color::BLACK,
        2.0,
    ))
}

fn add(scene: &Scene, item: Item) -> SceneCommand {
    SceneCommand::add(item, scene.layers()[0].id)
}

#[test]
fn test_undo_stack_creation() {
    let stack = UndoStack::new(50);
    assert!(!stack.can_undo());
    assert!(!stack.can_redo());
    assert_eq!(stack.undo_depth(), 0);
    assert_eq!(stack.redo_depth(), 0);
    assert_eq!(stack.limit(), 50);
    assert!(stack.is_empty());
}

#[test]
fn test_push_executes_command() {
    let mut scene = Scene::default();
    let mut stack = UndoStack::new(50);
    let item = stroke(0.0);
    let id = item.id;

    stack.push(add(&scene, item), &mut scene);
    assert!(scene.contains_item(id));
    assert!(stack.can_undo());
    assert_eq!(stack.undo_text(), Some("Add"));
}

#[test]
fn test_undo_redo_round_trip() {
    let mut scene = Scene::default();
    let mut stack = UndoStack::new(50);
    let item = stroke(0.0);
    let id = item.id;
    stack.push(add(&scene, item), &mut scene);

    assert!(stack.undo(&mut scene));
    assert!(!scene.contains_item(id));
    assert!(stack.can_redo());
    assert_eq!(stack.redo_text(), Some("Add"));

    assert!(stack.redo(&mut scene));
    assert!(scene.contains_item(id));
    assert!(!stack.can_redo());
}

#[test]
fn test_push_clears_redo_tail() {
    let mut scene = Scene::default();
    let mut stack = UndoStack::new(50);
    let first = stroke(0.0);
    stack.push(add(&scene, first), &mut scene);
    stack.undo(&mut scene);
    assert_eq!(stack.redo_depth(), 1);

    let second = stroke(20.0);
    stack.push(add(&scene, second), &mut scene);
    assert_eq!(stack.redo_depth(), 0);
    assert_eq!(stack.undo_depth(), 1);
}

#[test]
fn test_undo_on_empty_stack() {
    let mut scene = Scene::default();
    let mut stack = UndoStack::new(50);
    assert!(!stack.undo(&mut scene));
    assert!(!stack.redo(&mut scene));
}

#[test]
fn test_macro_is_one_step() {
    let mut scene = Scene::default();
    let mut stack = UndoStack::new(50);
    let a = stroke(0.0);
    let b = stroke(20.0);
    let (ida, idb) = (a.id, b.id);

    stack.begin_macro("Paste");
    stack.push(add(&scene, a), &mut scene);
    stack.push(add(&scene, b), &mut scene);
    assert!(stack.in_macro());
    assert!(scene.contains_item(ida));
    assert!(stack.end_macro());

    assert_eq!(stack.undo_depth(), 1);
    assert_eq!(stack.undo_text(), Some("Paste"));
    stack.undo(&mut scene);
    assert!(!scene.contains_item(ida));
    assert!(!scene.contains_item(idb));
    stack.redo(&mut scene);
    assert!(scene.contains_item(ida));
    assert!(scene.contains_item(idb));
}

#[test]
fn test_empty_macro_is_discarded() {
    let mut stack = UndoStack::new(50);
    stack.begin_macro("Nothing");
    assert!(!stack.end_macro());
    assert!(!stack.can_undo());
}

#[test]
fn test_nested_macro_folds_into_parent() {
    let mut scene = Scene::default();
    let mut stack = UndoStack::new(50);
    stack.begin_macro("Outer");
    stack.push(add(&scene, stroke(0.0)), &mut scene);
    stack.begin_macro("Inner");
    stack.push(add(&scene, stroke(20.0)), &mut scene);
    stack.end_macro();
    assert!(stack.in_macro());
    stack.end_macro();

    assert_eq!(stack.undo_depth(), 1);
    stack.undo(&mut scene);
    assert_eq!(scene.item_count(), 0);
}

#[test]
fn test_undo_refused_inside_macro() {
    let mut scene = Scene::default();
    let mut stack = UndoStack::new(50);
    stack.push(add(&scene, stroke(0.0)), &mut scene);
    stack.begin_macro("Open");
    assert!(!stack.undo(&mut scene));
    assert_eq!(scene.item_count(), 1);
}

#[test]
fn test_limit_drops_oldest() {
    let mut scene = Scene::default();
    let mut stack = UndoStack::new(3);
    for i in 0..5 {
        stack.push(add(&scene, stroke(i as f64 * 20.0)), &mut scene);
    }
    assert_eq!(stack.undo_depth(), 3);
    while stack.undo(&mut scene) {}
    assert_eq!(scene.item_count(), 2);
}

#[test]
fn test_clear() {
    let mut scene = Scene::default();
    let mut stack = UndoStack::new(0);
    stack.push(add(&scene, stroke(0.0)), &mut scene);
    stack.undo(&mut scene);
    stack.clear();
    assert!(!stack.can_undo());
    assert!(!stack.can_redo());
    assert_eq!(stack.len(), 0);
}

#[test]
fn test_mixed_history_restores_every_state() {
    let mut scene = Scene::from_layers(
        vec![
            Layer::with_items("top", vec![stroke(0.0), stroke(20.0)]),
            Layer::with_items("bottom", vec![stroke(40.0)]),
        ],
        1000,
    );
    let top = scene.layers()[0].id;
    let bottom = scene.layers()[1].id;
    let to_split = scene.layers()[0].items()[0].clone();
    let top_second = scene.layers()[0].items()[1].id;
    let bottom_first = scene.layers()[1].items()[0].id;
    let mut stack = UndoStack::new(0);
    let mut states = vec![scene.layers().to_vec()];

    let added = stroke(60.0);
    let added_id = added.id;
    stack.push(SceneCommand::add(added, bottom), &mut scene);
    states.push(scene.layers().to_vec());

    let outcome = erase_item(&to_split, Point::new(5.0, 0.0), 2.0, &ApproximateTextMetrics).unwrap();
    let EraseOutcome::Replaced(pieces) = outcome else {
        panic!("expected the stroke to split");
    };
    assert_eq!(pieces.len(), 2);
    stack.push(SceneCommand::replace(to_split.id, pieces, top), &mut scene);
    states.push(scene.layers().to_vec());

    stack.push(
        SceneCommand::delete([(top_second, top), (bottom_first, bottom)]),
        &mut scene,
    );
    states.push(scene.layers().to_vec());

    let old = scene.item(added_id).unwrap().transform;
    let new = ItemTransform::at(Point::new(5.0, 5.0)).with_uniform_scale(2.0);
    stack.push(SceneCommand::move_rotate_scale(added_id, old, new), &mut scene);
    states.push(scene.layers().to_vec());

    for expected in states[..4].iter().rev() {
        assert!(stack.undo(&mut scene));
        assert_eq!(scene.layers(), expected.as_slice());
    }
    assert!(!stack.can_undo());

    for expected in &states[1..] {
        assert!(stack.redo(&mut scene));
        assert_eq!(scene.layers(), expected.as_slice());
    }
    assert!(!stack.can_redo());
}

#[test]
fn test_transform_macro_of_three_items() {
    let items = vec![stroke(0.0), stroke(20.0), stroke(40.0)];
    let ids: Vec<_> = items.iter().map(|i| i.id).collect();
    let mut scene = Scene::from_layers(vec![Layer::with_items("L", items)], 1000);
    let mut stack = UndoStack::new(0);

    stack.begin_macro("Transform");
    for (i, id) in ids.iter().enumerate() {
        let old = scene.item(*id).unwrap().transform;
        let new = ItemTransform::at(Point::new(i as f64, 10.0));
        stack.push(SceneCommand::move_rotate_scale(*id, old, new), &mut scene);
    }
    assert!(stack.end_macro());
    assert_eq!(stack.undo_depth(), 1);

    assert!(stack.undo(&mut scene));
    for id in &ids {
        assert_eq!(scene.item(*id).unwrap().transform, ItemTransform::default());
    }

    assert!(stack.redo(&mut scene));
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(
            scene.item(*id).unwrap().transform.position,
            Point::new(i as f64, 10.0)
        );
    }
}
