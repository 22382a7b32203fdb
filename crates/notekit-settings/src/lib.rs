//! notekit Settings Crate
//!
//! Holds the configuration value the host constructs at startup and
//! passes into the editor and document layers.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, CanvasSettings, Config, ShapeKind, StorageSettings, ToolSettings,
};
pub use error::{ConfigError, Result, SettingsError};
