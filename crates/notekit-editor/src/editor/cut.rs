//! Rectangle cut of vector paths.
//!
//! Each path crossing the rectangle is split into the part outside it and
//! the part inside it. Both parts keep the original paint and transform,
//! so the cut is invisible until one of them is moved.

use notekit_core::{GeometryError, ItemId, LayerId};

use super::Editor;
use crate::commands::SceneCommand;
use crate::geometry::{intersect, rect_path, region_is_empty, subtract, Rect};
use crate::model::{Item, ItemKind, PathItem};

/// Splits a path item along `rect` (scene coordinates). Returns the outside
/// and inside pieces, or `None` when the item lies entirely on one side or
/// is not a visible path.
pub fn cut_item(item: &Item, rect: &Rect) -> Result<Option<[Item; 2]>, GeometryError> {
    let ItemKind::Path(path) = &item.kind else {
        return Ok(None);
    };
    if path.is_invisible() || path.geometry.is_empty() {
        return Ok(None);
    }
    if item.transform.map_from_scene(rect.center()).is_none() {
        return Err(GeometryError::NonFinite {
            context: format!("inverse transform of {}", item.id),
        });
    }
    let local_rect =
        rect_path(rect).transformed(|p| item.transform.map_from_scene(p).unwrap_or(p));

    let inside = intersect(&path.geometry, &local_rect)?;
    let outside = subtract(&path.geometry, &local_rect)?;
    if region_is_empty(&inside)? || region_is_empty(&outside)? {
        return Ok(None);
    }

    let piece = |geometry| {
        Item::new(
            ItemKind::Path(PathItem {
                geometry,
                stroke: path.stroke,
                fill: path.fill,
            }),
            item.transform,
        )
    };
    Ok(Some([piece(outside), piece(inside)]))
}

impl Editor {
    /// Cuts the selected paths along `rect`, or every editable path
    /// touching `rect` when nothing is selected. All splits form one undo
    /// step. Returns the number of items cut.
    pub fn cut_paths(&mut self, rect: Rect) -> usize {
        self.cancel_gesture();
        self.run(|_, ctx| {
            let mut targets: Vec<ItemId> = ctx
                .selection
                .ids()
                .iter()
                .copied()
                .filter(|id| ctx.scene.is_item_editable(*id))
                .collect();
            if ctx.selection.is_empty() {
                targets = ctx
                    .scene
                    .items_in_rect(&rect)
                    .into_iter()
                    .filter(|id| ctx.scene.is_item_editable(*id))
                    .collect();
            }

            let mut splits: Vec<(ItemId, LayerId, [Item; 2])> = Vec::new();
            for id in targets {
                let Some((layer, item)) = ctx.scene.find_item(id) else {
                    continue;
                };
                match cut_item(item, &rect) {
                    Ok(Some(pieces)) => splits.push((id, layer, pieces)),
                    Ok(None) => {}
                    Err(e) => tracing::warn!("cut: skipping {}: {}", id, e),
                }
            }
            if splits.is_empty() {
                return 0;
            }

            let count = splits.len();
            ctx.begin_macro("Cut");
            for (id, layer, pieces) in splits {
                ctx.push(SceneCommand::replace(id, pieces.into(), layer));
            }
            ctx.end_macro();
            tracing::debug!("cut: split {} path(s)", count);
            count
        })
    }
}
