//! # notekit
//!
//! Vector drawing engine for handwritten notebooks:
//! - Layered scene of paths, text and images with z-order bands
//! - Pen, eraser, text, shape, selection, zoom and pan tools
//! - Undo/redo with grouped macros
//! - JSON page and document persistence
//!
//! ## Architecture
//!
//! notekit is organized as a workspace with multiple crates:
//!
//! 1. **notekit-core** - Identifiers, error types, the editor event bus
//! 2. **notekit-settings** - Tool and canvas configuration (TOML/JSON)
//! 3. **notekit-editor** - Scene model, tools, history, page records
//! 4. **notekit** - Logging setup, page summaries and the `notekit` inspector binary

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

pub use notekit_core::{
    DocumentError, EditorEvent, Error, EventBus, EventFilter, GeometryError, ItemId, LayerId,
    PageFormatError, Result, SceneError,
};
pub use notekit_editor::{
    Document, DirAssetResolver, Editor, Item, ItemKind, Layer, NoAssets, PageRecord, Rect, Scene,
    ToolKind,
};
pub use notekit_settings::{default_config_path, Config};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging
///
/// Console output honouring `RUST_LOG`; `verbose` raises the default level
/// from info to debug.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(default_level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Item counts of one layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayerSummary {
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    pub paths: usize,
    pub texts: usize,
    pub images: usize,
}

impl LayerSummary {
    pub fn item_count(&self) -> usize {
        self.paths + self.texts + self.images
    }
}

/// What a page holds, top layer first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageSummary {
    pub layers: Vec<LayerSummary>,
    /// Union of all item bounds as `[min_x, min_y, max_x, max_y]`.
    pub bounds: Option<[f64; 4]>,
}

impl PageSummary {
    pub fn item_count(&self) -> usize {
        self.layers.iter().map(LayerSummary::item_count).sum()
    }
}

pub fn summarize_scene(scene: &Scene) -> PageSummary {
    let layers = scene
        .layers()
        .iter()
        .map(|layer| {
            let mut summary = LayerSummary {
                name: layer.name.clone(),
                visible: layer.visible,
                locked: layer.locked,
                ..Default::default()
            };
            for item in layer.items() {
                match item.kind {
                    ItemKind::Path(_) => summary.paths += 1,
                    ItemKind::Text(_) => summary.texts += 1,
                    ItemKind::Image(_) => summary.images += 1,
                }
            }
            summary
        })
        .collect();

    let ids: Vec<ItemId> = scene.all_items().iter().map(|item| item.id).collect();
    let bounds = scene
        .bounds_of(&ids)
        .map(|r: Rect| [r.min.x, r.min.y, r.max.x, r.max.y]);

    PageSummary { layers, bounds }
}

/// Every page of a document file, in page order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentSummary {
    /// RFC 3339 time of the last save, if the file records one.
    pub saved_at: Option<String>,
    pub current_page: usize,
    pub pages: Vec<PageSummary>,
}

/// Loads a document file and summarizes each of its pages.
pub fn summarize_document_file(path: &Path, z_band: i64) -> Result<DocumentSummary> {
    let mut document = Document::load_from_file(path, z_band, Arc::new(NoAssets))?;
    tracing::info!("Document has {} pages", document.page_count());

    let mut pages = Vec::with_capacity(document.page_count());
    for index in 0..document.page_count() {
        let scene = document.load_page(index)?;
        pages.push(summarize_scene(&scene));
    }
    Ok(DocumentSummary {
        saved_at: document.saved_at().map(|t| t.to_rfc3339()),
        current_page: document.current_index(),
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use notekit_editor::{Color, Modifiers, PathGeometry, PathItem, Point, PointerButton, TextItem};
    use tempfile::TempDir;

    #[test]
    fn test_summary_counts_kinds_per_layer() {
        let stroke = Item::path(PathItem::stroked(
            PathGeometry::polyline(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]),
            Color::BLACK,
            2.0,
        ));
        let text = Item::text(
            TextItem {
                content: "hi".to_string(),
                font_family: "Arial".to_string(),
                font_size: 10,
                color: Color::BLACK,
            },
            Point::new(0.0, 20.0),
        );
        let mut notes = Layer::with_items("notes", vec![text]);
        notes.locked = true;
        let scene = Scene::from_layers(vec![Layer::with_items("ink", vec![stroke]), notes], 1000);

        let summary = summarize_scene(&scene);
        assert_eq!(summary.item_count(), 2);
        assert_eq!(summary.layers[0].paths, 1);
        assert_eq!(summary.layers[1].texts, 1);
        assert!(summary.layers[1].locked);
        let [min_x, min_y, _, max_y] = summary.bounds.unwrap();
        assert!((min_x + 1.0).abs() < 1e-9);
        assert!((min_y + 1.0).abs() < 1e-9);
        assert!(max_y > 20.0);
    }

    #[test]
    fn test_empty_scene_has_no_bounds() {
        let summary = summarize_scene(&Scene::default());
        assert_eq!(summary.layers.len(), 1);
        assert_eq!(summary.bounds, None);
    }

    #[test]
    fn test_document_file_summary() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notebook.json");

        let mut editor = Editor::default();
        editor.config_mut().tools.smoothing = 0;
        for y in [10.0, 30.0] {
            editor.pointer_down(Point::new(0.0, y), PointerButton::Left, Modifiers::NONE);
            editor.pointer_move(Point::new(40.0, y), Some(PointerButton::Left), Modifiers::NONE);
            editor.pointer_up(Point::new(40.0, y), PointerButton::Left, Modifiers::NONE);
        }
        editor.append_page();
        editor.save_document(&file).unwrap();

        let summary = summarize_document_file(&file, 10000).unwrap();
        assert_eq!(summary.pages.len(), 2);
        assert_eq!(summary.current_page, 1);
        assert_eq!(summary.pages[0].item_count(), 2);
        assert_eq!(summary.pages[1].item_count(), 0);
        assert!(summary.saved_at.is_some());
    }

    #[test]
    fn test_missing_document_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = summarize_document_file(&dir.path().join("absent.json"), 10000).unwrap_err();
        assert!(matches!(err, Error::Document(DocumentError::Io(_))));
    }
}
