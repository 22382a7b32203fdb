//! Error handling for notekit
//!
//! Provides the error types shared by the editing engine and its
//! persistence boundary:
//! - Geometry errors (path construction and boolean operations)
//! - Scene errors (layer management requests that cannot be honored)
//! - Page format errors (reading and writing page records)
//! - Document errors (page navigation and document files)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::ids::{ItemId, LayerId};

/// Geometry error type
///
/// Raised by path conversions and boolean operations. Tools treat these
/// as recoverable: the offending item is skipped and the gesture goes on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The path has no drawable commands
    #[error("Path is empty")]
    EmptyPath,

    /// The path does not start with a move command
    #[error("Path must start with a move command")]
    MissingMoveTo,

    /// A stroke width that cannot be outlined
    #[error("Invalid stroke width {width}")]
    InvalidWidth {
        /// The rejected width.
        width: f64,
    },

    /// A coordinate is NaN or infinite
    #[error("Non-finite coordinate in {context}")]
    NonFinite {
        /// Where the coordinate was found.
        context: String,
    },

    /// The boolean backend failed
    #[error("Boolean operation '{op}' failed: {reason}")]
    BooleanFailed {
        /// The operation name.
        op: String,
        /// The reason reported for the failure.
        reason: String,
    },
}

/// Scene error type
///
/// Returned by layer management operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The last remaining layer cannot be removed
    #[error("Cannot remove the last layer")]
    LastLayer,

    /// No layer with this id exists in the scene
    #[error("Unknown layer {0}")]
    UnknownLayer(LayerId),

    /// No item with this id exists in the scene
    #[error("Unknown item {0}")]
    UnknownItem(ItemId),

    /// A layer index outside the layer list
    #[error("Layer index {index} out of range ({count} layers)")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of layers.
        count: usize,
    },
}

/// Page format error type
///
/// Represents failures while decoding or encoding a page record.
#[derive(Error, Debug)]
pub enum PageFormatError {
    /// The page is not valid JSON or does not match the record layout
    #[error("Malformed page data: {0}")]
    Json(#[from] serde_json::Error),

    /// A record is structurally invalid
    #[error("Malformed {record} record: {reason}")]
    MalformedRecord {
        /// The record kind (layer, item, element).
        record: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A color string could not be parsed
    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    /// I/O error while reading or writing page data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Document error type
#[derive(Error, Debug)]
pub enum DocumentError {
    /// A page index outside the document
    #[error("Page index {index} out of range (document has {count} pages)")]
    PageOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of pages.
        count: usize,
    },

    /// The page data could not be read or written
    #[error(transparent)]
    Page(#[from] PageFormatError),

    /// I/O error while accessing the document file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main error type for notekit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Scene error
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Page format error
    #[error(transparent)]
    PageFormat(#[from] PageFormatError),

    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this error happened at the load/save boundary
    pub fn is_persistence_error(&self) -> bool {
        matches!(
            self,
            Error::PageFormat(_) | Error::Document(_) | Error::Io(_)
        )
    }
}

/// Result type alias for notekit operations
pub type Result<T> = std::result::Result<T, Error>;
