use notekit_editor::geometry::{PathGeometry, Point, Rect};
use notekit_editor::model::{Color, Item, PathItem};
use notekit_editor::{Layer, Scene, SceneCommand, UndoStack};

fn stroke_at(x: f64, y: f64) -> Item {
    Item::path(PathItem::stroked(
        PathGeometry::polyline(&[Point::new(x, y), Point::new(x + 10.0, y)]),
        Color::BLACK,
        2.0,
    ))
}

fn assert_z_policy(scene: &Scene) {
    let count = scene.layer_count() as i64;
    for (i, layer) in scene.layers().iter().enumerate() {
        for (j, item) in layer.items().iter().enumerate() {
            assert_eq!(item.z, (count - 1 - i as i64) * scene.z_band() + j as i64);
        }
    }
}

#[test]
fn test_z_policy_survives_edits() {
    let mut scene = Scene::from_layers(
        vec![
            Layer::with_items("top", vec![stroke_at(0.0, 0.0)]),
            Layer::with_items("bottom", vec![stroke_at(0.0, 10.0), stroke_at(0.0, 20.0)]),
        ],
        1000,
    );
    let mut history = UndoStack::new(0);
    let bottom = scene.layers()[1].id;
    let victim = scene.layers()[1].items()[0].id;

    history.push(SceneCommand::add(stroke_at(5.0, 5.0), bottom), &mut scene);
    assert_z_policy(&scene);
    history.push(SceneCommand::delete([(victim, bottom)]), &mut scene);
    assert_z_policy(&scene);
    history.undo(&mut scene);
    assert_z_policy(&scene);

    let top = scene.layers()[0].id;
    scene.move_layer(top, 1).unwrap();
    assert_z_policy(&scene);
    scene.reassign_z();
    assert_z_policy(&scene);
}

#[test]
fn test_all_items_in_paint_order() {
    let scene = Scene::from_layers(
        vec![
            Layer::with_items("top", vec![stroke_at(0.0, 0.0)]),
            Layer::with_items("bottom", vec![stroke_at(0.0, 10.0), stroke_at(0.0, 20.0)]),
        ],
        100,
    );
    let z: Vec<i64> = scene.all_items().iter().map(|i| i.z).collect();
    assert_eq!(z, vec![0, 1, 100]);
}

#[test]
fn test_find_item_reports_layer() {
    let item = stroke_at(0.0, 0.0);
    let id = item.id;
    let scene = Scene::from_layers(vec![Layer::with_items("L1", vec![item])], 100);
    let (layer, found) = scene.find_item(id).unwrap();
    assert_eq!(layer, scene.layers()[0].id);
    assert_eq!(found.id, id);
    assert_eq!(scene.locate(id), Some((0, 0)));
}

#[test]
fn test_locked_layer_items_are_not_editable() {
    let item = stroke_at(0.0, 0.0);
    let id = item.id;
    let mut layer = Layer::with_items("L1", vec![item]);
    layer.locked = true;
    let scene = Scene::from_layers(vec![layer], 100);
    assert!(!scene.is_item_editable(id));
    // still hit-testable and selectable by rectangle queries
    assert_eq!(scene.items_in_rect(&Rect::from_xywh(0.0, -1.0, 5.0, 2.0)), vec![id]);
}
