use notekit_editor::{PathCommand, Point, ShapeMode, ShapeState, ToolKind};

use super::{click, drag, raw_editor};

fn commands(editor: &notekit_editor::Editor) -> Vec<PathCommand> {
    editor.scene().layers()[0].items()[0]
        .as_path()
        .unwrap()
        .geometry
        .commands()
        .to_vec()
}

#[test]
fn test_line_commits_on_release() {
    let mut editor = raw_editor();
    editor.set_tool(ToolKind::Shape);
    drag(&mut editor, &[(10.0, 10.0), (30.0, 10.0), (60.0, 10.0)]);

    assert_eq!(
        commands(&editor),
        vec![
            PathCommand::MoveTo(Point::new(10.0, 10.0)),
            PathCommand::LineTo(Point::new(60.0, 10.0)),
        ]
    );
    assert_eq!(editor.tools().shape.state(), ShapeState::Idle);
}

#[test]
fn test_zero_length_line_is_dropped() {
    let mut editor = raw_editor();
    editor.set_tool(ToolKind::Shape);
    click(&mut editor, 10.0, 10.0);
    assert_eq!(editor.scene().item_count(), 0);
    assert!(!editor.history().can_undo());
}

#[test]
fn test_curve_takes_a_second_press() {
    let mut editor = raw_editor();
    editor.set_tool(ToolKind::Shape);
    editor.set_shape_mode(ShapeMode::Curve);

    drag(&mut editor, &[(0.0, 0.0), (100.0, 0.0)]);
    assert_eq!(editor.tools().shape.state(), ShapeState::AdjustingCurve);
    assert_eq!(editor.scene().item_count(), 0);

    editor.pointer_move(Point::new(50.0, 80.0), None, notekit_editor::Modifiers::NONE);
    click(&mut editor, 50.0, 80.0);

    assert_eq!(
        commands(&editor),
        vec![
            PathCommand::MoveTo(Point::new(0.0, 0.0)),
            PathCommand::QuadTo {
                ctrl: Point::new(50.0, 80.0),
                to: Point::new(100.0, 0.0),
            },
        ]
    );
    assert_eq!(editor.tools().shape.state(), ShapeState::Idle);
    assert_eq!(editor.history().undo_depth(), 1);
}

#[test]
fn test_switching_tools_drops_the_curve() {
    let mut editor = raw_editor();
    editor.set_tool(ToolKind::Shape);
    editor.set_shape_mode(ShapeMode::Curve);
    drag(&mut editor, &[(0.0, 0.0), (100.0, 0.0)]);

    editor.set_tool(ToolKind::Pen);
    assert_eq!(editor.tools().shape.state(), ShapeState::Idle);
    assert_eq!(editor.scene().item_count(), 0);
}
