//! Selection, move, and gizmo transforms.
//!
//! Rotation and scaling are applied incrementally: every pointer sample
//! transforms the selection from the previous sample, about the gizmo
//! center captured when the handle was pressed. Each item keeps its own
//! rotation; scaling is composed into the item's local frame.

use notekit_core::ItemId;

use super::{Key, KeyEvent, PointerEvent, Tool, ToolContext, ToolKind, ToolPreview};
use crate::commands::SceneCommand;
use crate::geometry::{Point, Rect};
use crate::gizmo::HandleRole;
use crate::model::ItemTransform;

/// Ratios closer to zero than this would collapse the item.
const MIN_SCALE_RATIO: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectState {
    #[default]
    Idle,
    RubberBand,
    Moving,
    Transforming,
}

#[derive(Debug, Default)]
pub struct SelectTool {
    state: SelectState,
    handle: Option<HandleRole>,
    center: Point,
    /// Reference point of the incremental transform.
    last: Point,
    band_start: Point,
    additive: bool,
    snapshot: Vec<(ItemId, ItemTransform)>,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectState {
        self.state
    }

    pub fn active_handle(&self) -> Option<HandleRole> {
        self.handle
    }

    fn take_snapshot(&mut self, ctx: &ToolContext<'_>) {
        self.snapshot = ctx
            .selection
            .ids()
            .iter()
            .filter_map(|id| ctx.scene.item(*id).map(|item| (*id, item.transform)))
            .collect();
    }

    fn refresh_gizmo(ctx: &mut ToolContext<'_>) {
        let bounds = ctx.scene.bounds_of(ctx.selection.ids());
        ctx.gizmo.update(bounds);
    }

    fn rotate(&mut self, pos: Point, ctx: &mut ToolContext<'_>) {
        let start_vec = self.last - self.center;
        let curr_vec = pos - self.center;
        if start_vec.length() < f64::EPSILON || curr_vec.length() < f64::EPSILON {
            return;
        }
        let mut diff = curr_vec.angle_degrees() - start_vec.angle_degrees();
        if diff > 180.0 {
            diff -= 360.0;
        } else if diff < -180.0 {
            diff += 360.0;
        }

        let center = self.center;
        for (id, _) in &self.snapshot {
            if let Some(item) = ctx.scene.item_mut(*id) {
                let offset = item.transform.position - center;
                item.transform.position = center + offset.rotated(diff);
                item.transform.rotation += diff;
            }
        }
        ctx.gizmo.rotate_by(diff);
        self.last = pos;
    }

    fn scale(&mut self, role: HandleRole, pos: Point, ctx: &mut ToolContext<'_>) {
        let vec_start = self.last - self.center;
        let vec_curr = pos - self.center;

        let mut sx = if vec_start.x.abs() > 1.0 {
            vec_curr.x / vec_start.x
        } else {
            1.0
        };
        let mut sy = if vec_start.y.abs() > 1.0 {
            vec_curr.y / vec_start.y
        } else {
            1.0
        };
        if role.locks_x() {
            sx = 1.0;
        }
        if role.locks_y() {
            sy = 1.0;
        }
        if sx.abs() < MIN_SCALE_RATIO || sy.abs() < MIN_SCALE_RATIO {
            return;
        }

        let center = self.center;
        for (id, _) in &self.snapshot {
            if let Some(item) = ctx.scene.item_mut(*id) {
                let offset = item.transform.position - center;
                item.transform.position = center + Point::new(offset.x * sx, offset.y * sy);
                item.transform = item.transform.scaled_locally(sx, sy);
            }
        }
        self.last = pos;
    }

    fn translate(&mut self, pos: Point, ctx: &mut ToolContext<'_>) {
        let delta = pos - self.last;
        for (id, _) in &self.snapshot {
            if let Some(item) = ctx.scene.item_mut(*id) {
                item.transform.position = item.transform.position + delta;
            }
        }
        self.last = pos;
    }

    /// Records every changed transform as one undo step.
    fn finalize(&mut self, name: &str, ctx: &mut ToolContext<'_>) {
        let changes: Vec<(ItemId, ItemTransform, ItemTransform)> = self
            .snapshot
            .drain(..)
            .filter_map(|(id, old)| {
                let new = ctx.scene.item(id)?.transform;
                (new != old).then_some((id, old, new))
            })
            .collect();
        if changes.is_empty() {
            return;
        }
        tracing::debug!("selection: {} on {} item(s)", name, changes.len());
        ctx.begin_macro(name);
        for (id, old, new) in changes {
            ctx.push(SceneCommand::move_rotate_scale(id, old, new));
        }
        ctx.end_macro();
    }

    /// Puts live-dragged items back where the gesture started.
    fn restore_snapshot(&mut self, ctx: &mut ToolContext<'_>) {
        for (id, old) in self.snapshot.drain(..) {
            if let Some(item) = ctx.scene.item_mut(id) {
                item.transform = old;
            }
        }
    }

    fn select_in_band(&self, end: Point, ctx: &mut ToolContext<'_>) {
        let rect = Rect::from_points(self.band_start, end);
        let tolerance = ctx.pick_tolerance();
        if rect.width() < tolerance && rect.height() < tolerance {
            return;
        }
        let hits: Vec<ItemId> = ctx
            .scene
            .items_in_rect(&rect)
            .into_iter()
            .filter(|id| ctx.scene.is_item_editable(*id))
            .collect();
        if self.additive {
            for id in hits {
                ctx.selection.add(id);
            }
        } else {
            ctx.selection.set(hits);
        }
    }
}

/// Deletes every selected item on an editable layer with a single command.
pub(crate) fn delete_selected(ctx: &mut ToolContext<'_>) -> bool {
    let targets: Vec<_> = ctx
        .selection
        .ids()
        .iter()
        .filter(|id| ctx.scene.is_item_editable(**id))
        .filter_map(|id| ctx.scene.find_item(*id).map(|(layer, _)| (*id, layer)))
        .collect();
    if targets.is_empty() {
        return false;
    }
    ctx.push(SceneCommand::delete(targets));
    ctx.selection.clear();
    true
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Selection
    }

    fn activate(&mut self, ctx: &mut ToolContext<'_>) {
        Self::refresh_gizmo(ctx);
    }

    fn deactivate(&mut self, ctx: &mut ToolContext<'_>) {
        if matches!(self.state, SelectState::Moving | SelectState::Transforming) {
            self.restore_snapshot(ctx);
        }
        self.snapshot.clear();
        self.state = SelectState::Idle;
        self.handle = None;
        ctx.gizmo.hide();
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        if !event.is_left() {
            return;
        }
        let pos = event.scene;
        self.last = pos;

        if !ctx.selection.is_empty() {
            if let Some(role) = ctx.gizmo.handle_at(pos, ctx.viewport.zoom()) {
                self.state = SelectState::Transforming;
                self.handle = Some(role);
                self.center = ctx.gizmo.center();
                self.take_snapshot(ctx);
                tracing::debug!("selection: grabbed {:?} handle", role);
                return;
            }
        }

        match ctx.scene.item_at(pos, ctx.pick_tolerance()) {
            Some(id) if !ctx.scene.is_item_editable(id) => {
                ctx.selection.remove(id);
            }
            Some(id) => {
                if event.modifiers.shift || event.modifiers.ctrl {
                    ctx.selection.toggle(id);
                    return;
                }
                if !ctx.selection.contains(id) {
                    ctx.selection.set([id]);
                }
                self.state = SelectState::Moving;
                self.take_snapshot(ctx);
            }
            None => {
                self.additive = event.modifiers.any();
                if !self.additive {
                    ctx.selection.clear();
                }
                self.band_start = pos;
                self.state = SelectState::RubberBand;
            }
        }
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        let pos = event.scene;
        match (self.state, self.handle) {
            (SelectState::Transforming, Some(HandleRole::Rotate)) => self.rotate(pos, ctx),
            (SelectState::Transforming, Some(role)) => self.scale(role, pos, ctx),
            (SelectState::Moving, _) => self.translate(pos, ctx),
            (SelectState::RubberBand, _) => self.last = pos,
            _ => return,
        }
        if matches!(self.state, SelectState::Moving | SelectState::Transforming) {
            Self::refresh_gizmo(ctx);
        }
    }

    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        match self.state {
            SelectState::Transforming => self.finalize("Transform", ctx),
            SelectState::Moving => self.finalize("Move", ctx),
            SelectState::RubberBand => self.select_in_band(event.scene, ctx),
            SelectState::Idle => {}
        }
        self.state = SelectState::Idle;
        self.handle = None;
        self.snapshot.clear();
        Self::refresh_gizmo(ctx);
    }

    fn on_key_down(&mut self, event: &KeyEvent, ctx: &mut ToolContext<'_>) {
        if matches!(event.key, Key::Delete | Key::Backspace) && self.state == SelectState::Idle {
            delete_selected(ctx);
        }
    }

    fn preview(&self) -> Option<ToolPreview> {
        (self.state == SelectState::RubberBand)
            .then(|| ToolPreview::Rect(Rect::from_points(self.band_start, self.last)))
    }

    fn is_idle(&self) -> bool {
        self.state == SelectState::Idle
    }
}
