use notekit_editor::geometry::{PathGeometry, Point};
use notekit_editor::model::{Color, Item, ItemTransform, PathItem};
use notekit_editor::{Layer, Scene, SceneCommand};

fn stroke(x: f64) -> Item {
    Item::path(PathItem::stroked(
        PathGeometry::polyline(&[Point::new(x, 0.0), Point::new(x + 10.0, 0.0)]),
        Color::BLACK,
        2.0,
    ))
}

fn scene_with(items: Vec<Item>) -> Scene {
    Scene::from_layers(vec![Layer::with_items("L1", items)], 10_000)
}

fn ids(scene: &Scene) -> Vec<notekit_core::ItemId> {
    scene.layers()[0].items().iter().map(|i| i.id).collect()
}

#[test]
fn test_replace_keeps_list_position() {
    let items: Vec<Item> = (0..3).map(|i| stroke(i as f64 * 20.0)).collect();
    let before: Vec<_> = items.iter().map(|i| i.id).collect();
    let mut scene = scene_with(items);
    let layer = scene.layers()[0].id;

    let pieces = vec![stroke(100.0), stroke(120.0)];
    let piece_ids: Vec<_> = pieces.iter().map(|i| i.id).collect();
    let mut cmd = SceneCommand::replace(before[1], pieces, layer);
    cmd.apply(&mut scene);

    assert_eq!(
        ids(&scene),
        vec![before[0], piece_ids[0], piece_ids[1], before[2]]
    );
    let z: Vec<i64> = scene.layers()[0].items().iter().map(|i| i.z).collect();
    assert_eq!(z, vec![0, 1, 2, 3]);

    cmd.undo(&mut scene);
    assert_eq!(ids(&scene), before);
}

#[test]
fn test_delete_restores_each_position() {
    let items: Vec<Item> = (0..5).map(|i| stroke(i as f64 * 20.0)).collect();
    let before: Vec<_> = items.iter().map(|i| i.id).collect();
    let mut scene = scene_with(items);
    let layer = scene.layers()[0].id;

    let mut cmd = SceneCommand::delete([(before[3], layer), (before[0], layer), (before[2], layer)]);
    cmd.apply(&mut scene);
    assert_eq!(ids(&scene), vec![before[1], before[4]]);

    cmd.undo(&mut scene);
    assert_eq!(ids(&scene), before);
}

#[test]
fn test_commands_on_missing_targets_are_skipped() {
    let mut scene = scene_with(vec![stroke(0.0)]);
    let stranger = stroke(50.0);
    let mut cmd = SceneCommand::move_rotate_scale(
        stranger.id,
        ItemTransform::default(),
        ItemTransform::at(Point::new(5.0, 5.0)),
    );
    cmd.apply(&mut scene);
    cmd.undo(&mut scene);
    assert_eq!(scene.item_count(), 1);

    let mut add_to_nowhere = SceneCommand::add(stroke(0.0), notekit_core::LayerId::next());
    add_to_nowhere.apply(&mut scene);
    assert_eq!(scene.item_count(), 1);
}

#[test]
fn test_composite_names() {
    let cmd = SceneCommand::composite("Move", Vec::new());
    assert_eq!(cmd.name(), "Move");
    assert_eq!(
        SceneCommand::change_text(stroke(0.0).id, "a".into(), "b".into()).name(),
        "Edit Text"
    );
}
