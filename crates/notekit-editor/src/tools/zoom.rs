//! Zoom tool: click to step, drag to zoom into or out of a rectangle.

use notekit_core::constants::{MIN_ZOOM_OUT_FACTOR, ZOOM_CLICK_THRESHOLD, ZOOM_IN_STEP, ZOOM_OUT_STEP};

use super::{PointerButton, PointerEvent, Tool, ToolContext, ToolKind, ToolPreview};
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoomMode {
    In,
    Out,
}

#[derive(Debug, Clone, Copy)]
struct ZoomDrag {
    start: Point,
    current: Point,
    mode: ZoomMode,
}

#[derive(Debug, Default)]
pub struct ZoomTool {
    drag: Option<ZoomDrag>,
}

impl ZoomTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for ZoomTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Zoom
    }

    fn deactivate(&mut self, _ctx: &mut ToolContext<'_>) {
        self.drag = None;
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, _ctx: &mut ToolContext<'_>) {
        let mode = if event.button == Some(PointerButton::Right) || event.modifiers.any() {
            ZoomMode::Out
        } else {
            ZoomMode::In
        };
        self.drag = Some(ZoomDrag {
            start: event.scene,
            current: event.scene,
            mode,
        });
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, _ctx: &mut ToolContext<'_>) {
        if let Some(drag) = self.drag.as_mut() {
            drag.current = event.scene;
        }
    }

    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let pos = event.scene;
        let rect = Rect::from_points(drag.start, pos);
        let is_click =
            rect.width() < ZOOM_CLICK_THRESHOLD || rect.height() < ZOOM_CLICK_THRESHOLD;

        match (drag.mode, is_click) {
            (ZoomMode::In, true) => {
                ctx.viewport.zoom_by(ZOOM_IN_STEP);
                ctx.viewport.center_on(pos);
            }
            (ZoomMode::In, false) => ctx.viewport.fit_rect(&rect),
            (ZoomMode::Out, true) => {
                ctx.viewport.zoom_by(ZOOM_OUT_STEP);
                ctx.viewport.center_on(pos);
            }
            (ZoomMode::Out, false) => {
                let visible = ctx.viewport.visible_scene_rect();
                if visible.width() > 0.0 {
                    let factor = (rect.width() / visible.width()).max(MIN_ZOOM_OUT_FACTOR);
                    ctx.viewport.zoom_by(factor);
                    ctx.viewport.center_on(rect.center());
                }
            }
        }
        tracing::debug!("zoom: {}", ctx.viewport);
    }

    fn preview(&self) -> Option<ToolPreview> {
        self.drag
            .map(|drag| ToolPreview::Rect(Rect::from_points(drag.start, drag.current)))
    }

    fn is_idle(&self) -> bool {
        self.drag.is_none()
    }
}
