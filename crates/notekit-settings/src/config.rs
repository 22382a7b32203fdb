//! Configuration for notekit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Tool defaults (color, widths, smoothing, font)
//! - Canvas policy (z bands, image fit, gizmo handles, zoom bounds)
//! - Storage (notebook root directory and page layout on disk)

use crate::error::{ConfigError, Result, SettingsError};
use notekit_core::constants::{DEFAULT_IMAGE_MAX_WIDTH, DEFAULT_Z_BAND};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sub-type drawn by the shape tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Straight two-point segment
    #[default]
    Line,
    /// Quadratic curve with an adjustable control point
    Curve,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Curve => write!(f, "curve"),
        }
    }
}

/// Defaults the drawing tools start with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Pen and text color as `#rrggbb`
    pub color: String,
    /// Pen width in scene units
    pub pen_width: f64,
    /// Stroke smoothing level, 0..=100
    pub smoothing: u32,
    /// Eraser diameter in scene units
    pub eraser_size: f64,
    /// Font family for new text items
    pub font_family: String,
    /// Font size in points for new text items
    pub font_size: u32,
    /// Initial shape tool mode
    pub shape: ShapeKind,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            pen_width: 3.0,
            smoothing: 30,
            eraser_size: 20.0,
            font_family: "Arial".to_string(),
            font_size: 12,
            shape: ShapeKind::Line,
        }
    }
}

/// Canvas and editing policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Width of the z range reserved for each layer
    pub z_band: i64,
    /// Inserted images wider than this are scaled down
    pub image_max_width: f64,
    /// Gizmo handle size in view pixels
    pub handle_size: f64,
    /// Distance of the rotate handle above the gizmo box, in view pixels
    pub rotate_handle_offset: f64,
    /// Smallest allowed zoom factor
    pub min_zoom: f64,
    /// Largest allowed zoom factor
    pub max_zoom: f64,
    /// Maximum number of undo steps kept (0 keeps everything)
    pub undo_limit: usize,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            z_band: DEFAULT_Z_BAND,
            image_max_width: DEFAULT_IMAGE_MAX_WIDTH,
            handle_size: 8.0,
            rotate_handle_offset: 20.0,
            min_zoom: 0.05,
            max_zoom: 50.0,
            undo_limit: 0,
        }
    }
}

/// Where notebooks live on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Root directory holding one folder per subject
    pub root_dir: PathBuf,
    /// Name of the per-page asset folder
    pub assets_dir: String,
    /// Name of the page data file inside a page folder
    pub page_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            root_dir: base.join("notekit"),
            assets_dir: "assets".to_string(),
            page_file: "data.json".to_string(),
        }
    }
}

impl StorageSettings {
    /// Folder of one subject.
    pub fn subject_dir(&self, subject: &str) -> PathBuf {
        self.root_dir.join(subject)
    }

    /// Folder of one page inside a subject.
    pub fn page_dir(&self, subject: &str, page: &str) -> PathBuf {
        self.subject_dir(subject).join(page)
    }

    /// Asset folder of a page folder.
    pub fn assets_for(&self, page_dir: &Path) -> PathBuf {
        page_dir.join(&self.assets_dir)
    }

    /// Data file of a page folder.
    pub fn page_file_for(&self, page_dir: &Path) -> PathBuf {
        page_dir.join(&self.page_file)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Tool defaults
    pub tools: ToolSettings,
    /// Canvas policy
    pub canvas: CanvasSettings,
    /// Storage layout
    pub storage: StorageSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_for(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn out_of_range(key: &str, value: impl ToString) -> SettingsError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_for(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when it is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring configuration at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match format_for(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !is_hex_color(&self.tools.color) {
            return Err(ConfigError::InvalidColor {
                key: "tools.color".to_string(),
                value: self.tools.color.clone(),
            }
            .into());
        }

        if self.tools.pen_width <= 0.0 {
            return Err(out_of_range("tools.pen_width", self.tools.pen_width));
        }

        if self.tools.smoothing > 100 {
            return Err(out_of_range("tools.smoothing", self.tools.smoothing));
        }

        if self.tools.eraser_size <= 0.0 {
            return Err(out_of_range("tools.eraser_size", self.tools.eraser_size));
        }

        if self.tools.font_size == 0 {
            return Err(out_of_range("tools.font_size", self.tools.font_size));
        }

        if self.canvas.z_band <= 0 {
            return Err(out_of_range("canvas.z_band", self.canvas.z_band));
        }

        if self.canvas.image_max_width <= 0.0 {
            return Err(out_of_range(
                "canvas.image_max_width",
                self.canvas.image_max_width,
            ));
        }

        if self.canvas.handle_size <= 0.0 {
            return Err(out_of_range("canvas.handle_size", self.canvas.handle_size));
        }

        if self.canvas.min_zoom <= 0.0 || self.canvas.min_zoom >= self.canvas.max_zoom {
            return Err(out_of_range("canvas.min_zoom", self.canvas.min_zoom));
        }

        Ok(())
    }
}

/// Platform location of the configuration file
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notekit")
        .join("config.toml")
}
