use notekit_editor::{
    load_scene, load_scene_from_json, save_scene, Color, DirAssetResolver, Item, Layer, NoAssets,
    PageRecord, PathCommand, PathGeometry, PathItem, Point, Scene, SceneCommand, TextItem,
};
use tempfile::TempDir;

const LEGACY_PAGE: &str = r##"{
    "capas": [
        {
            "nombre": "Fondo",
            "items": [
                {
                    "type": "text",
                    "pos_x": 10.0,
                    "pos_y": 20.0,
                    "rot": 0.0,
                    "scale": 2.0,
                    "z": 0.0,
                    "content": "hola",
                    "font_family": "Courier",
                    "font_size": 18,
                    "color": "#ff0000"
                },
                { "type": "hologram", "pos_x": 1.0 },
                { "type": 42 }
            ]
        },
        { "nombre": "Notas", "visible": false, "locked": true }
    ]
}"##;

#[test]
fn test_legacy_page_loads() {
    let scene = load_scene_from_json(LEGACY_PAGE, &NoAssets, 1000);

    assert_eq!(scene.layer_count(), 2);
    let top = &scene.layers()[0];
    assert_eq!(top.name, "Fondo");
    assert!(top.visible && !top.locked);
    assert_eq!(top.len(), 1);

    let item = &top.items()[0];
    let text = item.as_text().unwrap();
    assert_eq!(text.content, "hola");
    assert_eq!(text.font_family, "Courier");
    assert_eq!(text.font_size, 18);
    assert_eq!(text.color, Color::rgb(255, 0, 0));
    assert_eq!(item.transform.position, Point::new(10.0, 20.0));
    assert_eq!(item.transform.matrix_entries(), (2.0, 0.0, 0.0, 2.0));
    assert_eq!(item.z, 1000);

    let bottom = &scene.layers()[1];
    assert_eq!(bottom.name, "Notas");
    assert!(!bottom.visible && bottom.locked);
}

#[test]
fn test_garbage_gives_one_empty_layer() {
    let scene = load_scene_from_json("not json at all", &NoAssets, 1000);
    assert_eq!(scene.layer_count(), 1);
    assert_eq!(scene.item_count(), 0);

    let scene = load_scene_from_json("{}", &NoAssets, 1000);
    assert_eq!(scene.layer_count(), 1);
}

#[test]
fn test_path_with_fill_only() {
    let json = r##"{"layers": [{"name": "L", "items": [{
        "type": "path",
        "path_elements": [
            {"t": 0, "x": 0.0, "y": 0.0},
            {"t": 1, "x": 10.0, "y": 0.0},
            {"t": 1, "x": 10.0, "y": 10.0}
        ],
        "has_pen": false,
        "has_fill": true,
        "fill_color": "#00ff00"
    }]}]}"##;
    let scene = load_scene_from_json(json, &NoAssets, 1000);
    let path = scene.layers()[0].items()[0].as_path().unwrap();
    assert!(path.stroke.is_none());
    assert_eq!(path.fill, Some(Color::rgb(0, 255, 0)));
    assert_eq!(path.geometry.len(), 3);
}

#[test]
fn test_save_then_load_keeps_content() {
    let mut geometry = PathGeometry::new();
    geometry.move_to(Point::new(0.0, 0.0));
    geometry.quad_to(Point::new(20.0, 30.0), Point::new(40.0, 0.0));
    let mut stroke = Item::path(PathItem::stroked(geometry, Color::rgb(10, 20, 30), 2.5));
    stroke.transform.rotation = 30.0;
    let text = Item::text(
        TextItem {
            content: "two\nlines".to_string(),
            font_family: "Arial".to_string(),
            font_size: 14,
            color: Color::BLACK,
        },
        Point::new(5.0, 6.0),
    );
    let mut hidden = Layer::with_items("hidden", vec![text]);
    hidden.visible = false;
    let scene = Scene::from_layers(vec![Layer::with_items("ink", vec![stroke]), hidden], 1000);

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("page").join("data.json");
    save_scene(&scene).save_to_file(&file).unwrap();
    let loaded = load_scene(&PageRecord::load_from_file(&file).unwrap(), &NoAssets, 1000);

    assert_eq!(loaded.layer_count(), 2);
    assert_eq!(loaded.layers()[0].name, "ink");
    assert!(!loaded.layers()[1].visible);

    let item = &loaded.layers()[0].items()[0];
    assert!((item.transform.rotation - 30.0).abs() < 1e-9);
    let path = item.as_path().unwrap();
    // widths are stored as whole units
    assert_eq!(path.stroke.unwrap().width, 3.0);
    assert_eq!(path.stroke.unwrap().color, Color::rgb(10, 20, 30));
    match path.geometry.commands()[1] {
        PathCommand::QuadTo { ctrl, to } => {
            assert!((ctrl.x - 20.0).abs() < 1e-9 && (ctrl.y - 30.0).abs() < 1e-9);
            assert!((to.x - 40.0).abs() < 1e-9 && to.y.abs() < 1e-9);
        }
        other => panic!("expected a quadratic segment, got {:?}", other),
    }

    let text = loaded.layers()[1].items()[0].as_text().unwrap();
    assert_eq!(text.content, "two\nlines");
}

#[test]
fn test_deleted_items_are_not_saved() {
    let dash = || {
        Item::path(PathItem::stroked(
            PathGeometry::polyline(&[Point::new(0.0, 0.0), Point::new(5.0, 0.0)]),
            Color::BLACK,
            1.0,
        ))
    };
    let (a, b) = (dash(), dash());
    let a_id = a.id;
    let mut scene = Scene::from_layers(vec![Layer::with_items("L", vec![a, b])], 1000);
    let layer = scene.layers()[0].id;
    SceneCommand::delete([(a_id, layer)]).apply(&mut scene);

    let record = save_scene(&scene);
    assert_eq!(record.item_count(), 1);
}

#[test]
fn test_image_size_comes_from_the_asset() {
    let dir = TempDir::new().unwrap();
    image::RgbImage::new(4, 3)
        .save(dir.path().join("photo.png"))
        .unwrap();
    let json = r##"{"layers": [{"items": [
        {"type": "image", "img_filename": "photo.png", "pos_x": 1.0, "pos_y": 2.0},
        {"type": "image", "img_filename": ""}
    ]}]}"##;
    let scene = load_scene_from_json(json, &DirAssetResolver::new(dir.path()), 1000);

    assert_eq!(scene.item_count(), 1);
    let item = &scene.layers()[0].items()[0];
    match &item.kind {
        notekit_editor::ItemKind::Image(img) => {
            assert_eq!(img.filename, "photo.png");
            assert_eq!((img.width, img.height), (4, 3));
        }
        other => panic!("expected an image, got {:?}", other),
    }
}
