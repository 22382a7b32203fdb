//! # notekit Editor
//!
//! The vector editing engine of the notekit drawing notebook: the scene of
//! layered items, the tools that turn pointer input into edits, and the
//! undo stack that makes every edit reversible.
//!
//! ## Architecture
//!
//! ```text
//! Editor (session)
//!   ├── Scene ── Layers ── Items (path, text, image)
//!   ├── UndoStack ── SceneCommand (add, delete, replace, transform, text)
//!   ├── Tools (pen, eraser, text, shape, selection, zoom, pan)
//!   ├── Selection + Gizmo (overlay, never part of the scene)
//!   ├── Viewport (zoom and scroll)
//!   └── Document ── PageRecord (JSON page format)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use notekit_editor::{Editor, Modifiers, PointerButton, Point};
//!
//! let mut editor = Editor::default();
//! editor.pointer_down(Point::new(0.0, 0.0), PointerButton::Left, Modifiers::NONE);
//! editor.pointer_move(Point::new(40.0, 10.0), Some(PointerButton::Left), Modifiers::NONE);
//! editor.pointer_up(Point::new(40.0, 10.0), PointerButton::Left, Modifiers::NONE);
//! assert!(editor.history().can_undo());
//! ```

pub mod commands;
pub mod document;
pub mod editor;
pub mod geometry;
pub mod gizmo;
pub mod history;
pub mod layer;
pub mod model;
pub mod scene;
pub mod selection;
pub mod serialization;
pub mod tools;
pub mod viewport;

pub use commands::SceneCommand;
pub use document::Document;
pub use editor::{cut_item, Editor, PointerPhase};
pub use geometry::{
    circle_path, intersect, rect_path, smooth_stroke, split_components, stroke_to_fill, subtract,
    LineCap, LineJoin, PathCommand, PathGeometry, Point, Rect,
};
pub use gizmo::{Gizmo, HandleRole};
pub use history::UndoStack;
pub use layer::Layer;
pub use model::{
    ApproximateTextMetrics, Color, ImageItem, Item, ItemKind, ItemTransform, PathItem,
    StrokePaint, TextItem, TextMetrics,
};
pub use scene::Scene;
pub use selection::Selection;
pub use serialization::{
    load_scene, load_scene_from_json, save_scene, AssetResolver, DirAssetResolver, ItemRecord,
    LayerRecord, NoAssets, PageRecord, PathElement,
};
pub use tools::{
    erase_item, EraseOutcome, Key, KeyEvent, Modifiers, PointerButton, PointerEvent, ShapeMode,
    ShapeState, Tool, ToolKind, ToolPreview,
};
pub use viewport::Viewport;
