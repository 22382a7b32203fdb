//! Tool state machine.
//!
//! Exactly one tool is active at a time. The editor forwards pointer and
//! key input to it together with a [`ToolContext`] borrowing the session
//! state. Tools never return errors; failures are logged and the offending
//! item is skipped.

mod eraser;
mod pan;
mod pen;
mod select;
mod shape;
mod text;
mod zoom;

pub use eraser::{erase_item, EraseOutcome, EraserTool};
pub use pan::PanTool;
pub use pen::PenTool;
pub use select::{SelectState, SelectTool};
pub(crate) use select::delete_selected;
pub use shape::{ShapeMode, ShapeState, ShapeTool};
pub use text::TextTool;
pub use zoom::ZoomTool;

use std::fmt;
use std::str::FromStr;

use notekit_core::{EditorEvent, ItemId, LayerId, SceneEvent, TextEvent};
use notekit_settings::{CanvasSettings, ToolSettings};

use crate::commands::SceneCommand;
use crate::geometry::{Point, Rect};
use crate::gizmo::Gizmo;
use crate::history::UndoStack;
use crate::model::{Color, Item};
use crate::scene::Scene;
use crate::selection::Selection;
use crate::viewport::Viewport;

/// Hit tolerance for pointer picking, in view pixels.
const PICK_TOLERANCE_PX: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Pen,
    Eraser,
    Text,
    Shape,
    Selection,
    Zoom,
    Pan,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Pen,
        ToolKind::Eraser,
        ToolKind::Text,
        ToolKind::Shape,
        ToolKind::Selection,
        ToolKind::Zoom,
        ToolKind::Pan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Eraser => "eraser",
            ToolKind::Text => "text",
            ToolKind::Shape => "shape",
            ToolKind::Selection => "selection",
            ToolKind::Zoom => "zoom",
            ToolKind::Pan => "pan",
        }
    }

    /// Single-letter shortcut that activates the tool.
    pub fn hotkey(&self) -> char {
        match self {
            ToolKind::Pen => 'b',
            ToolKind::Eraser => 'e',
            ToolKind::Text => 't',
            ToolKind::Shape => 'l',
            ToolKind::Selection => 's',
            ToolKind::Zoom => 'z',
            ToolKind::Pan => 'h',
        }
    }

    pub fn from_hotkey(c: char) -> Option<ToolKind> {
        let c = c.to_ascii_lowercase();
        Self::ALL.iter().copied().find(|kind| kind.hotkey() == c)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown tool '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

/// One pointer sample in both coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub scene: Point,
    pub view: Point,
    /// Button pressed or released; for moves, the button held, if any.
    pub button: Option<PointerButton>,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Builds an event from a view position.
    pub fn from_view(
        viewport: &Viewport,
        view: Point,
        button: Option<PointerButton>,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            scene: viewport.view_to_scene(view),
            view,
            button,
            modifiers,
        }
    }

    pub fn is_left(&self) -> bool {
        self.button == Some(PointerButton::Left)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Delete,
    Backspace,
    Escape,
    Enter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Transient overlay owned by the active tool. Never part of the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPreview {
    /// In-progress path drawn at `PREVIEW_Z`.
    Item(Item),
    /// Rubber band or zoom rectangle, scene coordinates.
    Rect(Rect),
}

/// Session state lent to a tool for the duration of one input event.
pub struct ToolContext<'a> {
    pub scene: &'a mut Scene,
    pub history: &'a mut UndoStack,
    pub selection: &'a mut Selection,
    pub viewport: &'a mut Viewport,
    pub gizmo: &'a mut Gizmo,
    pub settings: &'a ToolSettings,
    pub canvas: &'a CanvasSettings,
    /// Events the editor publishes once the handler returns.
    pub outbox: &'a mut Vec<EditorEvent>,
}

impl ToolContext<'_> {
    /// Executes and records a command.
    pub fn push(&mut self, cmd: SceneCommand) {
        let label = cmd.name().to_string();
        self.history.push(cmd, self.scene);
        if !self.history.in_macro() {
            self.outbox
                .push(EditorEvent::Scene(SceneEvent::Changed { label }));
        }
    }

    pub fn begin_macro(&mut self, name: &str) {
        self.history.begin_macro(name);
    }

    /// Closes the innermost macro and reports the change once the
    /// outermost one is closed.
    pub fn end_macro(&mut self) {
        let recorded = self.history.end_macro();
        if recorded && !self.history.in_macro() {
            if let Some(label) = self.history.undo_text() {
                self.outbox.push(EditorEvent::Scene(SceneEvent::Changed {
                    label: label.to_string(),
                }));
            }
        }
    }

    pub fn request_text_edit(&mut self, item: ItemId, select_all: bool) {
        self.outbox
            .push(EditorEvent::Text(TextEvent::EditRequested { item, select_all }));
    }

    /// Current layer, if it accepts new content.
    pub fn editable_current_layer(&self) -> Option<LayerId> {
        self.scene
            .current_layer()
            .filter(|layer| layer.is_editable())
            .map(|layer| layer.id)
    }

    pub fn color(&self) -> Color {
        match Color::from_str(&self.settings.color) {
            Ok(color) => color,
            Err(e) => {
                tracing::warn!("{}; drawing in black", e);
                Color::BLACK
            }
        }
    }

    /// Pick tolerance in scene units at the current zoom.
    pub fn pick_tolerance(&self) -> f64 {
        PICK_TOLERANCE_PX / self.viewport.zoom()
    }
}

/// A per-gesture state machine driven by pointer and key input.
pub trait Tool: Send {
    fn kind(&self) -> ToolKind;

    fn activate(&mut self, _ctx: &mut ToolContext<'_>) {}

    /// Drops any preview and resets to idle without committing anything.
    /// Calling it on an idle tool does nothing.
    fn deactivate(&mut self, _ctx: &mut ToolContext<'_>) {}

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>);

    fn on_pointer_move(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>);

    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>);

    fn on_key_down(&mut self, _event: &KeyEvent, _ctx: &mut ToolContext<'_>) {}

    fn on_key_up(&mut self, _event: &KeyEvent, _ctx: &mut ToolContext<'_>) {}

    fn preview(&self) -> Option<ToolPreview> {
        None
    }

    /// True when no gesture is in progress.
    fn is_idle(&self) -> bool;
}

/// One instance of every tool, so gesture state and modes survive switches.
#[derive(Debug, Default)]
pub struct ToolSet {
    pub pen: PenTool,
    pub eraser: EraserTool,
    pub text: TextTool,
    pub shape: ShapeTool,
    pub selection: SelectTool,
    pub zoom: ZoomTool,
    pub pan: PanTool,
}

impl ToolSet {
    pub fn get(&self, kind: ToolKind) -> &dyn Tool {
        match kind {
            ToolKind::Pen => &self.pen,
            ToolKind::Eraser => &self.eraser,
            ToolKind::Text => &self.text,
            ToolKind::Shape => &self.shape,
            ToolKind::Selection => &self.selection,
            ToolKind::Zoom => &self.zoom,
            ToolKind::Pan => &self.pan,
        }
    }

    pub fn get_mut(&mut self, kind: ToolKind) -> &mut dyn Tool {
        match kind {
            ToolKind::Pen => &mut self.pen,
            ToolKind::Eraser => &mut self.eraser,
            ToolKind::Text => &mut self.text,
            ToolKind::Shape => &mut self.shape,
            ToolKind::Selection => &mut self.selection,
            ToolKind::Zoom => &mut self.zoom,
            ToolKind::Pan => &mut self.pan,
        }
    }
}
