//! The scene: an ordered stack of layers.
//!
//! Layer index 0 is the topmost layer. Z values are derived from the
//! (layer index, item index) pair so that every item of a higher layer
//! paints above every item of a lower one.

use notekit_core::constants::{DEFAULT_LAYER_NAME, DEFAULT_Z_BAND};
use notekit_core::{ItemId, LayerId, SceneError};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::geometry::{Point, Rect};
use crate::layer::Layer;
use crate::model::{ApproximateTextMetrics, Item, TextMetrics};

/// Ordered collection of layers plus the z policy.
#[derive(Clone)]
pub struct Scene {
    layers: Vec<Layer>,
    current: Option<LayerId>,
    z_band: i64,
    metrics: Arc<dyn TextMetrics>,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("layers", &self.layers)
            .field("current", &self.current)
            .field("z_band", &self.z_band)
            .finish()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(DEFAULT_Z_BAND)
    }
}

impl Scene {
    /// Scene with a single empty layer.
    pub fn new(z_band: i64) -> Self {
        Self::from_layers(vec![Layer::new(DEFAULT_LAYER_NAME)], z_band)
    }

    /// Scene built from existing layers, topmost first. An empty list gets
    /// one default layer so the scene always has somewhere to draw.
    pub fn from_layers(mut layers: Vec<Layer>, z_band: i64) -> Self {
        if layers.is_empty() {
            layers.push(Layer::new(DEFAULT_LAYER_NAME));
        }
        let current = layers.first().map(|l| l.id);
        let mut scene = Self {
            layers,
            current,
            z_band: z_band.max(1),
            metrics: Arc::new(ApproximateTextMetrics),
        };
        scene.check_invariants();
        scene.reassign_z();
        scene
    }

    /// Replaces the text measurement used for bounds and hit tests.
    pub fn with_metrics(mut self, metrics: Arc<dyn TextMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    pub fn z_band(&self) -> i64 {
        self.z_band
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn item_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub(crate) fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    pub fn layer_index(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    // --- current layer ---------------------------------------------------

    pub fn current_layer_id(&self) -> Option<LayerId> {
        self.current
    }

    pub fn current_layer(&self) -> Option<&Layer> {
        self.current.and_then(|id| self.layer(id))
    }

    pub fn set_current_layer(&mut self, id: LayerId) -> Result<(), SceneError> {
        if self.layer(id).is_none() {
            return Err(SceneError::UnknownLayer(id));
        }
        self.current = Some(id);
        Ok(())
    }

    // --- layer management ------------------------------------------------

    /// Adds a layer on top of the stack and makes it current.
    pub fn add_layer(&mut self, name: impl Into<String>) -> LayerId {
        let layer = Layer::new(name);
        let id = layer.id;
        self.layers.insert(0, layer);
        self.current = Some(id);
        self.reassign_z();
        tracing::debug!("Added layer {} ({} layers)", id, self.layers.len());
        id
    }

    /// Removes a layer and its items. The last layer cannot be removed.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<Layer, SceneError> {
        let index = self.layer_index(id).ok_or(SceneError::UnknownLayer(id))?;
        if self.layers.len() == 1 {
            return Err(SceneError::LastLayer);
        }
        let layer = self.layers.remove(index);
        if self.current == Some(id) {
            let next = index.min(self.layers.len() - 1);
            self.current = Some(self.layers[next].id);
        }
        self.reassign_z();
        tracing::debug!("Removed layer {} with {} items", id, layer.len());
        Ok(layer)
    }

    pub fn rename_layer(&mut self, id: LayerId, name: impl Into<String>) -> Result<(), SceneError> {
        let layer = self.layer_mut(id).ok_or(SceneError::UnknownLayer(id))?;
        layer.name = name.into();
        Ok(())
    }

    pub fn set_layer_visible(&mut self, id: LayerId, visible: bool) -> Result<(), SceneError> {
        let layer = self.layer_mut(id).ok_or(SceneError::UnknownLayer(id))?;
        layer.visible = visible;
        Ok(())
    }

    pub fn set_layer_locked(&mut self, id: LayerId, locked: bool) -> Result<(), SceneError> {
        let layer = self.layer_mut(id).ok_or(SceneError::UnknownLayer(id))?;
        layer.locked = locked;
        Ok(())
    }

    /// Moves a layer to a new stack index (0 = top).
    pub fn move_layer(&mut self, id: LayerId, to: usize) -> Result<(), SceneError> {
        let from = self.layer_index(id).ok_or(SceneError::UnknownLayer(id))?;
        if to >= self.layers.len() {
            return Err(SceneError::IndexOutOfRange {
                index: to,
                count: self.layers.len(),
            });
        }
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        self.reassign_z();
        Ok(())
    }

    // --- z order ---------------------------------------------------------

    /// Rewrites every item's z from its layer and list position.
    ///
    /// `z = (layer_count - 1 - layer_index) * band + item_index`
    pub fn reassign_z(&mut self) {
        let count = self.layers.len() as i64;
        let band = self.z_band;
        for (i, layer) in self.layers.iter_mut().enumerate() {
            let base = (count - 1 - i as i64) * band;
            for (j, item) in layer.items_mut().iter_mut().enumerate() {
                item.z = base + j as i64;
            }
        }
    }

    // --- item lookup -----------------------------------------------------

    /// Layer index and item index of an item.
    pub fn locate(&self, id: ItemId) -> Option<(usize, usize)> {
        self.layers
            .iter()
            .enumerate()
            .find_map(|(li, layer)| layer.position_of(id).map(|ii| (li, ii)))
    }

    pub fn contains_item(&self, id: ItemId) -> bool {
        self.locate(id).is_some()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.layers.iter().find_map(|l| l.item(id))
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.layers.iter_mut().find_map(|l| l.item_mut(id))
    }

    /// The item together with the id of the layer holding it.
    pub fn find_item(&self, id: ItemId) -> Option<(LayerId, &Item)> {
        self.layers
            .iter()
            .find_map(|l| l.item(id).map(|item| (l.id, item)))
    }

    pub fn layer_of(&self, id: ItemId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.contains(id))
    }

    /// True when the item exists and its layer is visible and unlocked.
    pub fn is_item_editable(&self, id: ItemId) -> bool {
        self.layer_of(id).is_some_and(Layer::is_editable)
    }

    /// Every item, back to front.
    pub fn all_items(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.layers.iter().flat_map(|l| l.items()).collect();
        items.sort_by_key(|i| i.z);
        items
    }

    pub fn scene_bounds(&self, id: ItemId) -> Option<Rect> {
        self.item(id)?.scene_bounds(self.metrics())
    }

    /// Union of the scene bounds of `ids`.
    pub fn bounds_of(&self, ids: &[ItemId]) -> Option<Rect> {
        ids.iter()
            .filter_map(|id| self.scene_bounds(*id))
            .reduce(|a, b| a.union(&b))
    }

    /// Items on visible layers whose scene bounds intersect `rect`, topmost first.
    pub fn items_in_rect(&self, rect: &Rect) -> Vec<ItemId> {
        let mut hits: Vec<&Item> = self
            .layers
            .iter()
            .filter(|l| l.visible)
            .flat_map(|l| l.items())
            .filter(|item| {
                item.scene_bounds(self.metrics())
                    .is_some_and(|b| b.intersects(rect))
            })
            .collect();
        hits.sort_by_key(|i| std::cmp::Reverse(i.z));
        hits.into_iter().map(|i| i.id).collect()
    }

    /// Topmost item on a visible layer under `point`.
    pub fn item_at(&self, point: Point, tolerance: f64) -> Option<ItemId> {
        self.layers
            .iter()
            .filter(|l| l.visible)
            .flat_map(|l| l.items())
            .filter(|item| item.hit_test(point, tolerance, self.metrics()))
            .max_by_key(|item| item.z)
            .map(|item| item.id)
    }

    /// Detects items present in more than one place.
    ///
    /// Panics in debug builds; release builds keep the first occurrence and
    /// drop the rest. Returns the number of removed duplicates.
    pub fn check_invariants(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut removed = 0;
        for layer in &mut self.layers {
            layer.items_mut().retain(|item| {
                if seen.insert(item.id) {
                    true
                } else {
                    tracing::error!("Item {} appears more than once in the scene", item.id);
                    removed += 1;
                    false
                }
            });
        }
        debug_assert!(removed == 0, "duplicate items found in scene");
        if removed > 0 {
            self.reassign_z();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathGeometry;
    use crate::model::{Color, PathItem};

    fn stroke_at(x: f64, y: f64) -> Item {
        Item::path(PathItem::stroked(
            PathGeometry::polyline(&[Point::new(x, y), Point::new(x + 10.0, y)]),
            Color::BLACK,
            2.0,
        ))
    }

    #[test]
    fn test_new_scene_has_default_layer() {
        let scene = Scene::default();
        assert_eq!(scene.layer_count(), 1);
        assert_eq!(scene.layers()[0].name, DEFAULT_LAYER_NAME);
        assert_eq!(scene.current_layer_id(), Some(scene.layers()[0].id));
    }

    #[test]
    fn test_add_layer_goes_on_top_and_becomes_current() {
        let mut scene = Scene::default();
        let id = scene.add_layer("Top");
        assert_eq!(scene.layers()[0].id, id);
        assert_eq!(scene.current_layer_id(), Some(id));
    }

    #[test]
    fn test_cannot_remove_last_layer() {
        let mut scene = Scene::default();
        let only = scene.layers()[0].id;
        assert_eq!(scene.remove_layer(only), Err(SceneError::LastLayer));

        let top = scene.add_layer("Top");
        assert!(scene.remove_layer(top).is_ok());
        assert_eq!(scene.current_layer_id(), Some(only));
    }

    #[test]
    fn test_z_bands() {
        let bottom = Layer::with_items("bottom", vec![stroke_at(0.0, 0.0), stroke_at(0.0, 5.0)]);
        let top = Layer::with_items("top", vec![stroke_at(0.0, 10.0)]);
        let scene = Scene::from_layers(vec![top, bottom], 1000);

        let top_item = &scene.layers()[0].items()[0];
        let bottom_items = scene.layers()[1].items();
        assert_eq!(top_item.z, 1000);
        assert_eq!(bottom_items[0].z, 0);
        assert_eq!(bottom_items[1].z, 1);
    }

    #[test]
    fn test_layer_ops_by_id() {
        let mut scene = Scene::default();
        let id = scene.layers()[0].id;
        scene.rename_layer(id, "Notes").unwrap();
        scene.set_layer_locked(id, true).unwrap();
        scene.set_layer_visible(id, false).unwrap();
        let layer = scene.layer(id).unwrap();
        assert_eq!(layer.name, "Notes");
        assert!(layer.locked && !layer.visible);

        let bogus = LayerId::next();
        assert_eq!(
            scene.rename_layer(bogus, "x"),
            Err(SceneError::UnknownLayer(bogus))
        );
    }

    #[test]
    fn test_move_layer_reorders_bands() {
        let a = Layer::with_items("a", vec![stroke_at(0.0, 0.0)]);
        let b = Layer::with_items("b", vec![stroke_at(0.0, 0.0)]);
        let b_id = b.id;
        let mut scene = Scene::from_layers(vec![a, b], 100);
        scene.move_layer(b_id, 0).unwrap();
        assert_eq!(scene.layers()[0].id, b_id);
        assert_eq!(scene.layers()[0].items()[0].z, 100);
        assert!(scene.move_layer(b_id, 5).is_err());
    }

    #[test]
    fn test_spatial_queries_skip_hidden_layers() {
        let visible = Layer::with_items("v", vec![stroke_at(0.0, 0.0)]);
        let mut hidden = Layer::with_items("h", vec![stroke_at(0.0, 0.0)]);
        hidden.visible = false;
        let visible_id = visible.items()[0].id;
        let scene = Scene::from_layers(vec![hidden, visible], 100);

        let hits = scene.items_in_rect(&Rect::from_xywh(-1.0, -1.0, 2.0, 2.0));
        assert_eq!(hits, vec![visible_id]);
        assert_eq!(scene.item_at(Point::new(5.0, 0.5), 1.0), Some(visible_id));
        assert!(scene.item_at(Point::new(50.0, 50.0), 1.0).is_none());
    }

    #[test]
    fn test_item_at_prefers_topmost() {
        let under = stroke_at(0.0, 0.0);
        let over = stroke_at(0.0, 0.0);
        let over_id = over.id;
        let layer = Layer::with_items("l", vec![under, over]);
        let scene = Scene::from_layers(vec![layer], 100);
        assert_eq!(scene.item_at(Point::new(5.0, 0.0), 1.0), Some(over_id));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_duplicates_are_healed_in_release() {
        let item = stroke_at(0.0, 0.0);
        let a = Layer::with_items("a", vec![item.clone()]);
        let b = Layer::with_items("b", vec![item]);
        let scene = Scene::from_layers(vec![a, b], 100);
        assert_eq!(scene.item_count(), 1);
    }
}
