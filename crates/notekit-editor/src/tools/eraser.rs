//! Vector eraser.
//!
//! Every pointer sample subtracts a disc from the paths it touches. Pen-only
//! strokes are outlined first, so a partly erased stroke becomes a filled
//! shape in the stroke color. Text and images are removed whole.
//!
//! A press-drag-release gesture is recorded as one "Erase" undo step.

use notekit_core::{GeometryError, ItemId, LayerId};

use super::{PointerEvent, Tool, ToolContext, ToolKind};
use crate::commands::SceneCommand;
use crate::geometry::{
    circle_path, intersect, region_is_empty, split_components, stroke_to_fill, subtract, LineCap,
    LineJoin, PathGeometry, Point, Rect,
};
use crate::model::{Item, ItemKind, PathItem, TextMetrics};

/// What one eraser sample does to one item.
#[derive(Debug, Clone, PartialEq)]
pub enum EraseOutcome {
    Untouched,
    Removed,
    /// The item splits into these pieces, in list order.
    Replaced(Vec<Item>),
}

/// Applies an eraser disc given in scene coordinates to `item`.
pub fn erase_item(
    item: &Item,
    center: Point,
    radius: f64,
    metrics: &dyn TextMetrics,
) -> Result<EraseOutcome, GeometryError> {
    let eraser_bounds = Rect::around(center, radius);
    let Some(bounds) = item.scene_bounds(metrics) else {
        return Ok(EraseOutcome::Untouched);
    };
    if !bounds.intersects(&eraser_bounds) {
        return Ok(EraseOutcome::Untouched);
    }

    let path = match &item.kind {
        ItemKind::Text(_) | ItemKind::Image(_) => return Ok(EraseOutcome::Removed),
        ItemKind::Path(path) => path,
    };

    let (outline, converted) = match (path.stroke, path.fill) {
        (None, None) => return Ok(EraseOutcome::Untouched),
        (Some(stroke), None) => (
            stroke_to_fill(&path.geometry, stroke.width, LineCap::Round, LineJoin::Round)?,
            true,
        ),
        (_, Some(_)) => (path.geometry.clone(), false),
    };
    if outline.is_empty() {
        return Ok(EraseOutcome::Untouched);
    }

    let disc = local_disc(item, center, radius)?;
    if region_is_empty(&intersect(&outline, &disc)?)? {
        return Ok(EraseOutcome::Untouched);
    }

    let remainder = subtract(&outline, &disc)?;
    if remainder.is_empty() || region_is_empty(&remainder)? {
        return Ok(EraseOutcome::Removed);
    }
    if remainder == outline {
        return Ok(EraseOutcome::Untouched);
    }

    let pieces = split_components(&remainder)?
        .into_iter()
        .map(|geometry| {
            let paint = if converted {
                PathItem {
                    geometry,
                    stroke: None,
                    fill: path.stroke.map(|s| s.color),
                }
            } else {
                PathItem {
                    geometry,
                    stroke: path.stroke,
                    fill: path.fill,
                }
            };
            Item::new(ItemKind::Path(paint), item.transform)
        })
        .collect::<Vec<_>>();

    if pieces.is_empty() {
        Ok(EraseOutcome::Removed)
    } else {
        Ok(EraseOutcome::Replaced(pieces))
    }
}

/// The eraser disc expressed in the item's local coordinates.
fn local_disc(item: &Item, center: Point, radius: f64) -> Result<PathGeometry, GeometryError> {
    if item.transform.map_from_scene(center).is_none() {
        return Err(GeometryError::NonFinite {
            context: format!("inverse transform of {}", item.id),
        });
    }
    Ok(circle_path(center, radius)
        .transformed(|p| item.transform.map_from_scene(p).unwrap_or(p)))
}

/// Upper bound on the samples filled in between two pointer events.
const MAX_INTERPOLATED_SAMPLES: usize = 256;

/// Number of samples covering a pointer jump of `dist` at spacing `step`.
fn interpolation_steps(dist: f64, step: f64) -> usize {
    if dist <= step || !dist.is_finite() {
        return 1;
    }
    ((dist / step) as usize).clamp(1, MAX_INTERPOLATED_SAMPLES)
}

#[derive(Debug, Default)]
pub struct EraserTool {
    last: Option<Point>,
}

impl EraserTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one eraser sample over every editable item near `center`.
    /// Returns the number of commands pushed.
    pub fn erase_at(&self, center: Point, ctx: &mut ToolContext<'_>) -> usize {
        let radius = ctx.settings.eraser_size / 2.0;
        let eraser_bounds = Rect::around(center, radius);

        let candidates: Vec<(ItemId, LayerId)> = ctx
            .scene
            .layers()
            .iter()
            .filter(|layer| layer.is_editable())
            .flat_map(|layer| {
                layer
                    .items()
                    .iter()
                    .filter(|item| {
                        item.scene_bounds(ctx.scene.metrics())
                            .is_some_and(|b| b.intersects(&eraser_bounds))
                    })
                    .map(move |item| (item.id, layer.id))
            })
            .collect();

        let mut pushed = 0;
        for (id, layer) in candidates {
            let Some(item) = ctx.scene.item(id) else {
                continue;
            };
            match erase_item(item, center, radius, ctx.scene.metrics()) {
                Ok(EraseOutcome::Untouched) => {}
                Ok(EraseOutcome::Removed) => {
                    ctx.push(SceneCommand::delete([(id, layer)]));
                    pushed += 1;
                }
                Ok(EraseOutcome::Replaced(pieces)) => {
                    ctx.push(SceneCommand::replace(id, pieces, layer));
                    pushed += 1;
                }
                Err(e) => tracing::warn!("eraser: skipping {}: {}", id, e),
            }
        }
        pushed
    }

    fn step(&self, ctx: &ToolContext<'_>) -> f64 {
        (ctx.settings.eraser_size / 3.0).max(2.0)
    }
}

impl Tool for EraserTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Eraser
    }

    fn deactivate(&mut self, ctx: &mut ToolContext<'_>) {
        if self.last.take().is_some() {
            ctx.end_macro();
        }
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        if !event.is_left() || self.last.is_some() {
            return;
        }
        ctx.begin_macro("Erase");
        self.erase_at(event.scene, ctx);
        self.last = Some(event.scene);
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        let Some(last) = self.last else {
            return;
        };
        let pos = event.scene;
        let steps = interpolation_steps(last.manhattan_distance(&pos), self.step(ctx));
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            self.erase_at(last.lerp(&pos, t), ctx);
        }
        self.last = Some(pos);
    }

    fn on_pointer_up(&mut self, _event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        if self.last.take().is_some() {
            ctx.end_macro();
        }
    }

    fn is_idle(&self) -> bool {
        self.last.is_none()
    }
}
