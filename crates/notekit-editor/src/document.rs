//! Multi-page documents.
//!
//! A document is an ordered list of page records plus the index of the
//! page being edited. Only the current page lives as a [`Scene`]; the
//! editor hands it back with [`Document::save_current_page`] before
//! navigating away.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use notekit_core::DocumentError;
use serde::{Deserialize, Serialize};

use crate::scene::Scene;
use crate::serialization::{load_scene, save_scene, AssetResolver, NoAssets, PageRecord};

const DOCUMENT_VERSION: u32 = 1;

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

/// On-disk form of a document: one JSON file holding every page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DocumentFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pages: Vec<PageRecord>,
    #[serde(default)]
    current: usize,
}

pub struct Document {
    pages: Vec<PageRecord>,
    current: usize,
    z_band: i64,
    assets: Arc<dyn AssetResolver>,
    /// When the document was last written to disk.
    saved_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("pages", &self.pages.len())
            .field("current", &self.current)
            .field("z_band", &self.z_band)
            .field("saved_at", &self.saved_at)
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(notekit_core::constants::DEFAULT_Z_BAND)
    }
}

impl Document {
    /// A document with one empty page and no asset directory.
    pub fn new(z_band: i64) -> Self {
        Self::with_pages(vec![PageRecord::default()], z_band, Arc::new(NoAssets))
    }

    /// A document over existing pages; an empty list gets one blank page.
    pub fn with_pages(
        mut pages: Vec<PageRecord>,
        z_band: i64,
        assets: Arc<dyn AssetResolver>,
    ) -> Self {
        if pages.is_empty() {
            pages.push(PageRecord::default());
        }
        Self {
            pages,
            current: 0,
            z_band,
            assets,
            saved_at: None,
        }
    }

    pub fn set_asset_resolver(&mut self, assets: Arc<dyn AssetResolver>) {
        self.assets = assets;
    }

    pub fn asset_resolver(&self) -> &dyn AssetResolver {
        self.assets.as_ref()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
    }

    pub fn page(&self, index: usize) -> Option<&PageRecord> {
        self.pages.get(index)
    }

    /// Builds the scene of a page and makes it current.
    pub fn load_page(&mut self, index: usize) -> Result<Scene, DocumentError> {
        let record = self.pages.get(index).ok_or(DocumentError::PageOutOfRange {
            index,
            count: self.pages.len(),
        })?;
        let scene = load_scene(record, self.assets.as_ref(), self.z_band);
        self.current = index;
        tracing::debug!(
            "Loaded page {} of {} ({} items)",
            index + 1,
            self.pages.len(),
            scene.item_count()
        );
        Ok(scene)
    }

    /// Snapshots the scene into the current page slot.
    pub fn save_current_page(&mut self, scene: &Scene) -> PageRecord {
        let record = save_scene(scene);
        if let Some(slot) = self.pages.get_mut(self.current) {
            *slot = record.clone();
        }
        record
    }

    pub fn next_page(&mut self) -> Result<Scene, DocumentError> {
        self.load_page(self.current + 1)
    }

    pub fn prev_page(&mut self) -> Result<Scene, DocumentError> {
        match self.current.checked_sub(1) {
            Some(index) => self.load_page(index),
            None => Err(DocumentError::PageOutOfRange {
                index: 0,
                count: self.pages.len(),
            }),
        }
    }

    /// Appends a blank page, makes it current, and returns its scene.
    pub fn append_page(&mut self) -> Scene {
        self.pages.push(PageRecord::default());
        self.current = self.pages.len() - 1;
        tracing::info!("Appended page {}", self.pages.len());
        Scene::new(self.z_band)
    }

    pub fn load_from_file(
        path: &Path,
        z_band: i64,
        assets: Arc<dyn AssetResolver>,
    ) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path)?;
        let file: DocumentFile = serde_json::from_str(&content)
            .map_err(|e| DocumentError::Page(e.into()))?;
        if file.version > DOCUMENT_VERSION {
            tracing::warn!(
                "Document {} has version {}, reading as version {}",
                path.display(),
                file.version,
                DOCUMENT_VERSION
            );
        }
        let mut document = Self::with_pages(file.pages, z_band, assets);
        document.current = file.current.min(document.pages.len() - 1);
        document.saved_at = file.saved_at;
        tracing::info!(
            "Loaded document {} ({} pages)",
            path.display(),
            document.pages.len()
        );
        Ok(document)
    }

    /// Writes every page to `path` and stamps the save time.
    pub fn save_to_file(&mut self, path: &Path) -> Result<(), DocumentError> {
        let saved_at = Utc::now();
        let file = DocumentFile {
            version: DOCUMENT_VERSION,
            saved_at: Some(saved_at),
            pages: self.pages.clone(),
            current: self.current,
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| DocumentError::Page(e.into()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, json)?;
        self.saved_at = Some(saved_at);
        tracing::info!("Saved document to {}", path.display());
        Ok(())
    }
}
