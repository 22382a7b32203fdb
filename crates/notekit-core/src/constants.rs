//! Application-wide constants.

/// Z value given to live preview items so they paint above committed content.
pub const PREVIEW_Z: i64 = 99_999;

/// Width of the z range reserved for each layer's items.
pub const DEFAULT_Z_BAND: i64 = 10_000;

/// Band width used by pages written before the wider band was introduced.
pub const LEGACY_Z_BAND: i64 = 1_000;

/// Images wider than this are scaled down proportionally on insert.
pub const DEFAULT_IMAGE_MAX_WIDTH: f64 = 500.0;

/// Name given to the layer created for a fresh or unreadable page.
pub const DEFAULT_LAYER_NAME: &str = "Layer 1";

/// Initial content of a text item created by the text tool.
pub const DEFAULT_TEXT_CONTENT: &str = "Text";

/// Tolerance used when flattening curves for boolean operations.
pub const FLATTEN_TOLERANCE: f64 = 0.25;

/// Minimum manhattan distance between two captured pen samples.
pub const PEN_MIN_MOVEMENT: f64 = 2.0;

/// Zoom rubber bands narrower than this (in scene units) count as clicks.
pub const ZOOM_CLICK_THRESHOLD: f64 = 10.0;

/// Zoom factor of a single zoom-in click.
pub const ZOOM_IN_STEP: f64 = 1.25;

/// Zoom factor of a single zoom-out click.
pub const ZOOM_OUT_STEP: f64 = 0.8;

/// Smallest zoom factor a drag-out may request at once.
pub const MIN_ZOOM_OUT_FACTOR: f64 = 0.05;
