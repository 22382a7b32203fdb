use notekit_editor::{Modifiers, Point, PointerButton, ToolKind};

use super::{click, drag, raw_editor};

#[test]
fn test_zoom_click_steps_in() {
    let mut editor = raw_editor();
    editor.set_tool(ToolKind::Zoom);
    click(&mut editor, 600.0, 400.0);
    assert!((editor.viewport().zoom() - 1.25).abs() < 1e-9);
    assert!(editor.history().is_empty());
}

#[test]
fn test_zoom_right_click_steps_out() {
    let mut editor = raw_editor();
    editor.set_tool(ToolKind::Zoom);
    let at = Point::new(600.0, 400.0);
    editor.pointer_down(at, PointerButton::Right, Modifiers::NONE);
    editor.pointer_up(at, PointerButton::Right, Modifiers::NONE);
    assert!((editor.viewport().zoom() - 0.8).abs() < 1e-9);
}

#[test]
fn test_zoom_drag_fits_the_rectangle() {
    let mut editor = raw_editor();
    editor.set_tool(ToolKind::Zoom);
    drag(&mut editor, &[(100.0, 100.0), (250.0, 150.0), (400.0, 300.0)]);
    assert!((editor.viewport().zoom() - 4.0).abs() < 1e-9);
    let center = editor.viewport().visible_scene_rect().center();
    assert!((center.x - 250.0).abs() < 1e-9);
    assert!((center.y - 200.0).abs() < 1e-9);
}

#[test]
fn test_small_band_when_zoomed_in_is_a_click() {
    let mut editor = raw_editor();
    editor.set_tool(ToolKind::Zoom);
    drag(&mut editor, &[(100.0, 100.0), (400.0, 300.0)]);
    assert!((editor.viewport().zoom() - 4.0).abs() < 1e-9);

    // 30 view pixels are 7.5 scene units at this zoom
    drag(&mut editor, &[(600.0, 400.0), (630.0, 430.0)]);
    assert!((editor.viewport().zoom() - 5.0).abs() < 1e-9);
}

#[test]
fn test_pan_drag_moves_scroll_offsets() {
    let mut editor = raw_editor();
    editor.set_tool(ToolKind::Pan);
    drag(&mut editor, &[(100.0, 100.0), (120.0, 110.0), (130.0, 120.0)]);
    let (x, y) = editor.viewport().scroll();
    assert!((x + 30.0).abs() < 1e-9);
    assert!((y + 20.0).abs() < 1e-9);
    assert!(editor.history().is_empty());
}
