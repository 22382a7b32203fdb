//! Hand tool: drags the paper by moving the scroll offsets.

use super::{PointerEvent, Tool, ToolContext, ToolKind};
use crate::geometry::Point;

#[derive(Debug, Default)]
pub struct PanTool {
    /// Last pointer position in view pixels while dragging.
    last_view: Option<Point>,
}

impl PanTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for PanTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pan
    }

    fn deactivate(&mut self, _ctx: &mut ToolContext<'_>) {
        self.last_view = None;
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, _ctx: &mut ToolContext<'_>) {
        if event.is_left() {
            self.last_view = Some(event.view);
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        let Some(last) = self.last_view else {
            return;
        };
        let delta = event.view - last;
        ctx.viewport.pan_by_pixels(delta.x, delta.y);
        self.last_view = Some(event.view);
    }

    fn on_pointer_up(&mut self, _event: &PointerEvent, _ctx: &mut ToolContext<'_>) {
        self.last_view = None;
    }

    fn is_idle(&self) -> bool {
        self.last_view.is_none()
    }
}
