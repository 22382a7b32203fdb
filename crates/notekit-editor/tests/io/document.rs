use std::sync::Arc;

use notekit_core::DocumentError;
use notekit_editor::{Document, Editor, Modifiers, NoAssets, Point, PointerButton};
use tempfile::TempDir;

fn stroke(editor: &mut Editor, y: f64) {
    editor.config_mut().tools.smoothing = 0;
    editor.pointer_down(Point::new(0.0, y), PointerButton::Left, Modifiers::NONE);
    editor.pointer_move(Point::new(40.0, y), Some(PointerButton::Left), Modifiers::NONE);
    editor.pointer_up(Point::new(40.0, y), PointerButton::Left, Modifiers::NONE);
}

#[test]
fn test_document_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("notebook.json");

    let mut editor = Editor::default();
    stroke(&mut editor, 10.0);
    editor.append_page();
    stroke(&mut editor, 20.0);
    stroke(&mut editor, 30.0);
    editor.save_document(&file).unwrap();

    let mut reopened = Editor::default();
    reopened.open_document(&file, Arc::new(NoAssets)).unwrap();
    assert_eq!(reopened.document().page_count(), 2);
    assert_eq!(reopened.document().saved_at(), editor.document().saved_at());
    assert!(reopened.document().saved_at().is_some());
    assert_eq!(reopened.document().current_index(), 1);
    assert_eq!(reopened.scene().item_count(), 2);
    assert!(!reopened.history().can_undo());

    reopened.prev_page().unwrap();
    assert_eq!(reopened.scene().item_count(), 1);
    assert!(reopened.prev_page().is_err());
}

#[test]
fn test_document_load_errors() {
    let dir = TempDir::new().unwrap();
    let missing = Document::load_from_file(&dir.path().join("none.json"), 1000, Arc::new(NoAssets));
    assert!(matches!(missing, Err(DocumentError::Io(_))));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "[1, 2").unwrap();
    let broken = Document::load_from_file(&bad, 1000, Arc::new(NoAssets));
    assert!(matches!(broken, Err(DocumentError::Page(_))));
}

#[test]
fn test_page_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("page").join("data.json");

    let mut editor = Editor::default();
    stroke(&mut editor, 10.0);
    editor.add_layer("Notes");
    editor.save_page_file(&file).unwrap();

    let mut reopened = Editor::default();
    reopened.load_page_file(&file, Arc::new(NoAssets)).unwrap();
    assert_eq!(reopened.scene().layer_count(), 2);
    assert_eq!(reopened.scene().item_count(), 1);
    assert_eq!(reopened.document().page_count(), 1);
}
