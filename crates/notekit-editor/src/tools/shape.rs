//! Straight lines and quadratic curves.
//!
//! A curve takes two interactions: drag out the base segment, then move the
//! pointer to bend it and click to commit.

use notekit_core::constants::PREVIEW_Z;
use notekit_core::LayerId;
use notekit_settings::ShapeKind;

use super::{PointerEvent, Tool, ToolContext, ToolKind, ToolPreview};
use crate::commands::SceneCommand;
use crate::geometry::{PathGeometry, Point};
use crate::model::{Item, PathItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeMode {
    #[default]
    Line,
    Curve,
}

impl From<ShapeKind> for ShapeMode {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Line => ShapeMode::Line,
            ShapeKind::Curve => ShapeMode::Curve,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeState {
    #[default]
    Idle,
    DrawingBase,
    AdjustingCurve,
}

#[derive(Debug, Default)]
pub struct ShapeTool {
    mode: ShapeMode,
    state: ShapeState,
    layer: Option<LayerId>,
    start: Point,
    end: Point,
    control: Point,
    preview: Option<Item>,
}

impl ShapeTool {
    pub fn new(mode: ShapeMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> ShapeMode {
        self.mode
    }

    pub fn state(&self) -> ShapeState {
        self.state
    }

    /// Switches between line and curve, abandoning any gesture.
    pub fn set_mode(&mut self, mode: ShapeMode) {
        self.mode = mode;
        self.reset();
    }

    fn reset(&mut self) {
        self.state = ShapeState::Idle;
        self.layer = None;
        self.preview = None;
    }

    fn geometry(&self) -> PathGeometry {
        let mut path = PathGeometry::new();
        path.move_to(self.start);
        match self.state {
            ShapeState::AdjustingCurve => path.quad_to(self.control, self.end),
            _ => path.line_to(self.end),
        }
        path
    }

    fn refresh_preview(&mut self) {
        let geometry = self.geometry();
        if let Some(path) = self.preview.as_mut().and_then(Item::as_path_mut) {
            path.geometry = geometry;
        }
    }

    fn start_gesture(&mut self, layer: LayerId, at: Point, ctx: &ToolContext<'_>) {
        self.layer = Some(layer);
        self.start = at;
        self.end = at;
        self.state = ShapeState::DrawingBase;
        let mut preview = Item::path(PathItem::stroked(
            self.geometry(),
            ctx.color(),
            ctx.settings.pen_width,
        ));
        preview.z = PREVIEW_Z;
        self.preview = Some(preview);
    }

    fn commit(&mut self, ctx: &mut ToolContext<'_>) {
        let geometry = self.geometry();
        let layer = self.layer;
        let degenerate = self.mode == ShapeMode::Line && self.start == self.end;
        self.reset();
        let Some(layer) = layer else {
            return;
        };
        if degenerate || geometry.is_empty() {
            return;
        }
        let item = Item::path(PathItem::stroked(
            geometry,
            ctx.color(),
            ctx.settings.pen_width,
        ));
        ctx.push(SceneCommand::add(item, layer));
    }
}

impl Tool for ShapeTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Shape
    }

    fn deactivate(&mut self, _ctx: &mut ToolContext<'_>) {
        self.reset();
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        if !event.is_left() {
            return;
        }
        match self.state {
            ShapeState::Idle => {
                let Some(layer) = ctx.editable_current_layer() else {
                    return;
                };
                self.start_gesture(layer, event.scene, ctx);
            }
            ShapeState::AdjustingCurve => self.commit(ctx),
            ShapeState::DrawingBase => {}
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, _ctx: &mut ToolContext<'_>) {
        match self.state {
            ShapeState::Idle => return,
            ShapeState::DrawingBase => self.end = event.scene,
            ShapeState::AdjustingCurve => self.control = event.scene,
        }
        self.refresh_preview();
    }

    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        if self.state != ShapeState::DrawingBase {
            return;
        }
        self.end = event.scene;
        match self.mode {
            ShapeMode::Line => self.commit(ctx),
            ShapeMode::Curve => {
                self.state = ShapeState::AdjustingCurve;
                self.control = self.start.midpoint(&self.end);
                self.refresh_preview();
                tracing::debug!("shape: adjusting curve");
            }
        }
    }

    fn preview(&self) -> Option<ToolPreview> {
        self.preview.clone().map(ToolPreview::Item)
    }

    fn is_idle(&self) -> bool {
        self.state == ShapeState::Idle
    }
}
