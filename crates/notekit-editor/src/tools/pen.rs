//! Freehand pen.

use notekit_core::constants::{PEN_MIN_MOVEMENT, PREVIEW_Z};
use notekit_core::LayerId;

use super::{PointerEvent, Tool, ToolContext, ToolKind, ToolPreview};
use crate::commands::SceneCommand;
use crate::geometry::{smooth_stroke, PathGeometry, Point};
use crate::model::{Item, PathItem};

#[derive(Debug, Default)]
pub struct PenTool {
    stroke: Option<Stroke>,
}

/// Gesture state while drawing.
#[derive(Debug)]
struct Stroke {
    layer: LayerId,
    points: Vec<Point>,
    preview: Item,
}

impl PenTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw samples captured so far in the current stroke.
    pub fn captured_points(&self) -> &[Point] {
        self.stroke.as_ref().map_or(&[], |s| s.points.as_slice())
    }
}

impl Tool for PenTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pen
    }

    fn deactivate(&mut self, _ctx: &mut ToolContext<'_>) {
        if self.stroke.take().is_some() {
            tracing::debug!("pen: stroke discarded on deactivate");
        }
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        if !event.is_left() {
            return;
        }
        let Some(layer) = ctx.editable_current_layer() else {
            tracing::debug!("pen: current layer is hidden or locked");
            return;
        };
        let mut geometry = PathGeometry::new();
        geometry.move_to(event.scene);
        let mut preview = Item::path(PathItem::stroked(
            geometry,
            ctx.color(),
            ctx.settings.pen_width,
        ));
        preview.z = PREVIEW_Z;
        self.stroke = Some(Stroke {
            layer,
            points: vec![event.scene],
            preview,
        });
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, _ctx: &mut ToolContext<'_>) {
        let Some(stroke) = self.stroke.as_mut() else {
            return;
        };
        let Some(last) = stroke.points.last() else {
            return;
        };
        if last.manhattan_distance(&event.scene) <= PEN_MIN_MOVEMENT {
            return;
        }
        stroke.points.push(event.scene);
        if let Some(path) = stroke.preview.as_path_mut() {
            path.geometry.line_to(event.scene);
        }
    }

    fn on_pointer_up(&mut self, _event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        let Some(stroke) = self.stroke.take() else {
            return;
        };
        if stroke.points.len() < 2 {
            return;
        }
        let geometry = smooth_stroke(&stroke.points, ctx.settings.smoothing);
        if geometry.is_empty() {
            return;
        }
        let item = Item::path(PathItem::stroked(
            geometry,
            ctx.color(),
            ctx.settings.pen_width,
        ));
        tracing::debug!("pen: committing {} from {} samples", item.id, stroke.points.len());
        ctx.push(SceneCommand::add(item, stroke.layer));
    }

    fn preview(&self) -> Option<ToolPreview> {
        self.stroke
            .as_ref()
            .map(|stroke| ToolPreview::Item(stroke.preview.clone()))
    }

    fn is_idle(&self) -> bool {
        self.stroke.is_none()
    }
}
