//! Page navigation and the file boundary.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use notekit_core::{DocumentError, PageFormatError};

use super::Editor;
use crate::document::Document;
use crate::serialization::{load_scene_from_json, save_scene, AssetResolver, PageRecord};

impl Editor {
    /// Snapshot of the page being edited.
    pub fn save_page(&self) -> PageRecord {
        save_scene(&self.scene)
    }

    /// Stores the current page in the document and opens page `index`.
    pub fn goto_page(&mut self, index: usize) -> Result<(), DocumentError> {
        if index >= self.document.page_count() {
            return Err(DocumentError::PageOutOfRange {
                index,
                count: self.document.page_count(),
            });
        }
        self.cancel_gesture();
        self.document.save_current_page(&self.scene);
        let scene = self.document.load_page(index)?;
        self.replace_scene(scene);
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<(), DocumentError> {
        self.goto_page(self.document.current_index() + 1)
    }

    pub fn prev_page(&mut self) -> Result<(), DocumentError> {
        match self.document.current_index().checked_sub(1) {
            Some(index) => self.goto_page(index),
            None => Err(DocumentError::PageOutOfRange {
                index: 0,
                count: self.document.page_count(),
            }),
        }
    }

    /// Stores the current page and starts a blank one after the last page.
    pub fn append_page(&mut self) {
        self.cancel_gesture();
        self.document.save_current_page(&self.scene);
        let scene = self.document.append_page();
        self.replace_scene(scene);
    }

    /// Opens a document file and loads its current page.
    pub fn open_document(
        &mut self,
        path: &Path,
        assets: Arc<dyn AssetResolver>,
    ) -> Result<(), DocumentError> {
        let mut document = Document::load_from_file(path, self.config.canvas.z_band, assets)?;
        let scene = document.load_page(document.current_index())?;
        self.document = document;
        self.replace_scene(scene);
        Ok(())
    }

    pub fn save_document(&mut self, path: &Path) -> Result<(), DocumentError> {
        self.document.save_current_page(&self.scene);
        self.document.save_to_file(path)
    }

    /// Loads a single page file. Content that cannot be parsed loads as
    /// one empty layer; only I/O failures are reported.
    pub fn load_page_file(
        &mut self,
        path: &Path,
        assets: Arc<dyn AssetResolver>,
    ) -> Result<(), PageFormatError> {
        let json = fs::read_to_string(path)?;
        let scene = load_scene_from_json(&json, assets.as_ref(), self.config.canvas.z_band);
        tracing::info!(
            "Loaded page {} ({} layers, {} items)",
            path.display(),
            scene.layer_count(),
            scene.item_count()
        );
        self.document = Document::with_pages(
            vec![save_scene(&scene)],
            self.config.canvas.z_band,
            assets,
        );
        self.replace_scene(scene);
        Ok(())
    }

    pub fn save_page_file(&self, path: &Path) -> Result<(), PageFormatError> {
        self.save_page().save_to_file(path)
    }
}
