use std::sync::{Arc, Mutex};

use notekit_core::{EditorEvent, EventCategory, EventFilter, TextEvent};
use notekit_editor::ToolKind;

use super::{click, raw_editor};

fn record_text_events(editor: &notekit_editor::Editor) -> Arc<Mutex<Vec<TextEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    editor.bus().subscribe(
        EventFilter::Categories(vec![EventCategory::Text]),
        move |event| {
            if let EditorEvent::Text(e) = event {
                sink.lock().unwrap().push(e);
            }
        },
    );
    seen
}

#[test]
fn test_click_on_empty_paper_creates_text() {
    let mut editor = raw_editor();
    let seen = record_text_events(&editor);
    editor.set_tool(ToolKind::Text);
    click(&mut editor, 200.0, 200.0);

    assert_eq!(editor.scene().item_count(), 1);
    let item = &editor.scene().layers()[0].items()[0];
    assert_eq!(item.as_text().unwrap().content, "Text");
    assert_eq!(editor.selection().ids(), &[item.id]);
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[TextEvent::EditRequested {
            item: item.id,
            select_all: true,
        }]
    );
}

#[test]
fn test_click_on_existing_text_edits_it() {
    let mut editor = raw_editor();
    editor.set_tool(ToolKind::Text);
    click(&mut editor, 200.0, 200.0);
    let id = editor.scene().layers()[0].items()[0].id;

    let seen = record_text_events(&editor);
    click(&mut editor, 205.0, 205.0);

    assert_eq!(editor.scene().item_count(), 1);
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[TextEvent::EditRequested {
            item: id,
            select_all: false,
        }]
    );

    assert!(editor.commit_text_edit(id, "Hello"));
    assert_eq!(
        editor.scene().item(id).unwrap().as_text().unwrap().content,
        "Hello"
    );
    editor.undo();
    assert_eq!(
        editor.scene().item(id).unwrap().as_text().unwrap().content,
        "Text"
    );
}
