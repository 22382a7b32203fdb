//! Pointer and key routing.

use super::Editor;
use crate::geometry::Point;
use crate::tools::{Key, KeyEvent, Modifiers, PointerButton, PointerEvent, ToolKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

impl Editor {
    /// Routes a pointer event to the active tool.
    pub fn handle_pointer(&mut self, phase: PointerPhase, event: PointerEvent) {
        let kind = self.active;
        self.run(|tools, ctx| {
            let tool = tools.get_mut(kind);
            match phase {
                PointerPhase::Down => tool.on_pointer_down(&event, ctx),
                PointerPhase::Move => tool.on_pointer_move(&event, ctx),
                PointerPhase::Up => tool.on_pointer_up(&event, ctx),
            }
        });
    }

    pub fn pointer_down(&mut self, view: Point, button: PointerButton, modifiers: Modifiers) {
        let event = PointerEvent::from_view(&self.viewport, view, Some(button), modifiers);
        self.handle_pointer(PointerPhase::Down, event);
    }

    /// `held` is the button kept pressed during the move, if any.
    pub fn pointer_move(&mut self, view: Point, held: Option<PointerButton>, modifiers: Modifiers) {
        let event = PointerEvent::from_view(&self.viewport, view, held, modifiers);
        self.handle_pointer(PointerPhase::Move, event);
    }

    pub fn pointer_up(&mut self, view: Point, button: PointerButton, modifiers: Modifiers) {
        let event = PointerEvent::from_view(&self.viewport, view, Some(button), modifiers);
        self.handle_pointer(PointerPhase::Up, event);
    }

    /// Handles editor shortcuts, then forwards the key to the active tool.
    ///
    /// Space switches to Pan until released. Letters pick tools (see
    /// [`ToolKind::hotkey`]). Ctrl+Z undoes, Ctrl+Y and Ctrl+Shift+Z redo.
    pub fn key_down(&mut self, event: KeyEvent) {
        let mods = event.modifiers;
        match event.key {
            Key::Space => {
                if self.space_restore.is_none() && self.active != ToolKind::Pan {
                    tracing::debug!("Temporary pan from {}", self.active);
                    self.space_restore = Some(self.active);
                    self.switch_tool(ToolKind::Pan);
                }
                return;
            }
            Key::Char(c) if mods.ctrl => match c.to_ascii_lowercase() {
                'z' if mods.shift => {
                    self.redo();
                    return;
                }
                'z' => {
                    self.undo();
                    return;
                }
                'y' => {
                    self.redo();
                    return;
                }
                _ => {}
            },
            Key::Char(c) if !mods.alt => {
                if let Some(kind) = ToolKind::from_hotkey(c) {
                    self.set_tool(kind);
                    return;
                }
            }
            _ => {}
        }

        let kind = self.active;
        self.run(|tools, ctx| tools.get_mut(kind).on_key_down(&event, ctx));
    }

    pub fn key_up(&mut self, event: KeyEvent) {
        if event.key == Key::Space {
            if let Some(previous) = self.space_restore.take() {
                self.switch_tool(previous);
            }
            return;
        }
        let kind = self.active;
        self.run(|tools, ctx| tools.get_mut(kind).on_key_up(&event, ctx));
    }
}
