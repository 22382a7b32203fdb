use notekit_editor::{Editor, PathCommand, Point, ToolKind, ToolPreview};

use super::{drag, raw_editor};

#[test]
fn test_stroke_keeps_raw_samples_without_smoothing() {
    let mut editor = raw_editor();
    let points: Vec<(f64, f64)> = (0..10).map(|i| (i as f64 * 10.0, 5.0)).collect();
    drag(&mut editor, &points);

    assert_eq!(editor.scene().item_count(), 1);
    let item = &editor.scene().layers()[0].items()[0];
    let commands = item.as_path().unwrap().geometry.commands();
    assert_eq!(commands.len(), 10);
    assert_eq!(commands[0], PathCommand::MoveTo(Point::new(0.0, 5.0)));
    assert_eq!(commands[9], PathCommand::LineTo(Point::new(90.0, 5.0)));
    assert_eq!(editor.history().undo_text(), Some("Add"));
}

#[test]
fn test_small_jitter_is_ignored() {
    let mut editor = raw_editor();
    drag(&mut editor, &[(0.0, 0.0), (1.0, 0.5), (0.5, 1.0), (20.0, 0.0)]);
    let item = &editor.scene().layers()[0].items()[0];
    assert_eq!(item.as_path().unwrap().geometry.len(), 2);
}

#[test]
fn test_single_click_draws_nothing() {
    let mut editor = raw_editor();
    super::click(&mut editor, 40.0, 40.0);
    assert_eq!(editor.scene().item_count(), 0);
    assert!(!editor.history().can_undo());
}

#[test]
fn test_preview_exists_only_while_drawing() {
    let mut editor = Editor::default();
    assert_eq!(editor.active_tool(), ToolKind::Pen);
    editor.pointer_down(
        Point::new(0.0, 0.0),
        notekit_editor::PointerButton::Left,
        notekit_editor::Modifiers::NONE,
    );
    assert!(matches!(editor.preview(), Some(ToolPreview::Item(_))));
    assert_eq!(editor.scene().item_count(), 0);

    // switching tools drops the unfinished stroke
    editor.set_tool(ToolKind::Pan);
    assert!(editor.preview().is_none());
    assert_eq!(editor.scene().item_count(), 0);
}

#[test]
fn test_locked_layer_refuses_strokes() {
    let mut editor = raw_editor();
    let layer = editor.scene().layers()[0].id;
    editor.set_layer_locked(layer, true).unwrap();
    drag(&mut editor, &[(0.0, 0.0), (50.0, 0.0)]);
    assert_eq!(editor.scene().item_count(), 0);
}
