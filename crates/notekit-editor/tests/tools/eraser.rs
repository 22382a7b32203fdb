use notekit_editor::ToolKind;

use super::{click, drag, raw_editor};

fn editor_with_line() -> notekit_editor::Editor {
    let mut editor = raw_editor();
    drag(&mut editor, &[(0.0, 0.0), (50.0, 0.0), (100.0, 0.0)]);
    editor.set_tool(ToolKind::Eraser);
    editor.config_mut().tools.eraser_size = 20.0;
    editor
}

#[test]
fn test_miss_pushes_nothing() {
    let mut editor = editor_with_line();
    click(&mut editor, 50.0, 60.0);
    assert_eq!(editor.scene().item_count(), 1);
    assert_eq!(editor.history().undo_depth(), 1);
}

#[test]
fn test_press_in_the_middle_splits_the_stroke() {
    let mut editor = editor_with_line();
    click(&mut editor, 50.0, 0.0);

    assert_eq!(editor.scene().item_count(), 2);
    assert_eq!(editor.history().undo_text(), Some("Erase"));
    for item in editor.scene().layers()[0].items() {
        let path = item.as_path().unwrap();
        assert!(path.stroke.is_none());
        assert!(path.fill.is_some());
    }

    assert!(editor.undo());
    assert_eq!(editor.scene().item_count(), 1);
    assert!(editor.scene().layers()[0].items()[0].as_path().unwrap().stroke.is_some());
}

#[test]
fn test_text_is_removed_whole() {
    let mut editor = raw_editor();
    editor.set_tool(ToolKind::Text);
    click(&mut editor, 300.0, 300.0);
    assert_eq!(editor.scene().item_count(), 1);

    editor.set_tool(ToolKind::Eraser);
    click(&mut editor, 305.0, 305.0);
    assert_eq!(editor.scene().item_count(), 0);
    assert_eq!(editor.history().undo_text(), Some("Erase"));
    assert!(editor.undo());
    assert_eq!(editor.scene().item_count(), 1);
}

#[test]
fn test_hidden_layer_is_not_erased() {
    let mut editor = editor_with_line();
    let layer = editor.scene().layers()[0].id;
    editor.set_layer_visible(layer, false).unwrap();
    click(&mut editor, 50.0, 0.0);
    assert_eq!(editor.scene().item_count(), 1);
}

#[test]
fn test_fast_move_does_not_skip_thin_stroke() {
    let mut editor = raw_editor();
    editor.config_mut().tools.pen_width = 1.0;
    drag(&mut editor, &[(0.0, -50.0), (0.0, 0.0), (0.0, 50.0)]);
    assert_eq!(editor.scene().item_count(), 1);

    editor.set_tool(ToolKind::Eraser);
    editor.config_mut().tools.eraser_size = 20.0;
    drag(&mut editor, &[(-100.0, 0.0), (200.0, 0.0)]);

    assert_eq!(editor.scene().item_count(), 2);
    for item in editor.scene().layers()[0].items() {
        let bounds = editor.scene().scene_bounds(item.id).unwrap();
        assert!(bounds.max.y < -5.0 || bounds.min.y > 5.0);
    }
    assert_eq!(editor.history().undo_depth(), 2);
    assert_eq!(editor.history().undo_text(), Some("Erase"));

    assert!(editor.undo());
    assert_eq!(editor.scene().item_count(), 1);
    let item = &editor.scene().layers()[0].items()[0];
    assert!(item.as_path().unwrap().stroke.is_some());
    assert_eq!(editor.history().undo_text(), Some("Add"));
}

#[test]
fn test_drag_across_two_strokes_is_one_undo_step() {
    let mut editor = raw_editor();
    drag(&mut editor, &[(0.0, 0.0), (100.0, 0.0)]);
    drag(&mut editor, &[(0.0, 40.0), (100.0, 40.0)]);

    editor.set_tool(ToolKind::Eraser);
    editor.config_mut().tools.eraser_size = 20.0;
    drag(&mut editor, &[(50.0, -20.0), (50.0, 20.0), (50.0, 60.0)]);

    assert_eq!(editor.scene().item_count(), 4);
    assert_eq!(editor.history().undo_depth(), 3);
    assert!(editor.undo());
    assert_eq!(editor.scene().item_count(), 2);
}
