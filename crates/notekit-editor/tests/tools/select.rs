use notekit_editor::{Editor, Key, KeyEvent, Modifiers, Point, PointerButton, ToolKind};

use super::{click, drag, raw_editor};

/// Two horizontal strokes at y = 0 and y = 50, with the Selection tool active.
fn editor_with_two_strokes() -> Editor {
    let mut editor = raw_editor();
    drag(&mut editor, &[(0.0, 0.0), (50.0, 0.0)]);
    drag(&mut editor, &[(0.0, 50.0), (50.0, 50.0)]);
    editor.set_tool(ToolKind::Selection);
    editor
}

fn select_all_by_band(editor: &mut Editor) {
    drag(editor, &[(-20.0, -20.0), (30.0, 30.0), (80.0, 80.0)]);
}

#[test]
fn test_rubber_band_selects_editable_items() {
    let mut editor = editor_with_two_strokes();
    select_all_by_band(&mut editor);
    assert_eq!(editor.selection().len(), 2);
    assert!(editor.gizmo().is_visible());

    click(&mut editor, 300.0, 300.0);
    assert!(editor.selection().is_empty());
    assert!(!editor.gizmo().is_visible());
}

#[test]
fn test_locked_items_are_not_band_selected() {
    let mut editor = editor_with_two_strokes();
    let layer = editor.scene().layers()[0].id;
    editor.set_layer_locked(layer, true).unwrap();
    select_all_by_band(&mut editor);
    assert!(editor.selection().is_empty());
}

#[test]
fn test_drag_moves_selection_as_one_step() {
    let mut editor = editor_with_two_strokes();
    select_all_by_band(&mut editor);

    drag(&mut editor, &[(10.0, 0.0), (15.0, 5.0), (20.0, 10.0)]);

    for item in editor.scene().layers()[0].items() {
        assert_eq!(item.transform.position, Point::new(10.0, 10.0));
    }
    assert_eq!(editor.history().undo_text(), Some("Move"));
    assert_eq!(editor.history().undo_depth(), 3);

    assert!(editor.undo());
    for item in editor.scene().layers()[0].items() {
        assert_eq!(item.transform.position, Point::new(0.0, 0.0));
    }
}

#[test]
fn test_shift_click_toggles() {
    let mut editor = editor_with_two_strokes();
    select_all_by_band(&mut editor);
    let shift = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    let at = Point::new(10.0, 50.0);
    editor.pointer_down(at, PointerButton::Left, shift);
    editor.pointer_up(at, PointerButton::Left, shift);
    assert_eq!(editor.selection().len(), 1);
    assert_eq!(editor.history().undo_depth(), 2);
}

#[test]
fn test_delete_key_removes_selection() {
    let mut editor = editor_with_two_strokes();
    select_all_by_band(&mut editor);
    editor.key_down(KeyEvent::new(Key::Delete));

    assert_eq!(editor.scene().item_count(), 0);
    assert!(editor.selection().is_empty());
    assert_eq!(editor.history().undo_text(), Some("Delete"));

    editor.undo();
    assert_eq!(editor.scene().item_count(), 2);
}
