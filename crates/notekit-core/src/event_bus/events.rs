//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so hosts can log or replay them.

use serde::{Deserialize, Serialize};

use crate::ids::{ItemId, LayerId};

/// Root event enum for everything the editor publishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    /// Committed scene content changed
    Scene(SceneEvent),
    /// The selection set changed
    Selection(SelectionEvent),
    /// Zoom or scroll offsets changed
    View(ViewEvent),
    /// Undo/redo availability changed
    History(HistoryEvent),
    /// The text-editing collaborator should take over
    Text(TextEvent),
    /// The active tool changed
    Tool(ToolEvent),
}

impl EditorEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            EditorEvent::Scene(_) => EventCategory::Scene,
            EditorEvent::Selection(_) => EventCategory::Selection,
            EditorEvent::View(_) => EventCategory::View,
            EditorEvent::History(_) => EventCategory::History,
            EditorEvent::Text(_) => EventCategory::Text,
            EditorEvent::Tool(_) => EventCategory::Tool,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            EditorEvent::Scene(e) => e.description(),
            EditorEvent::Selection(e) => e.description(),
            EditorEvent::View(e) => e.description(),
            EditorEvent::History(e) => e.description(),
            EditorEvent::Text(e) => e.description(),
            EditorEvent::Tool(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Scene content events.
    Scene,
    /// Selection events.
    Selection,
    /// Viewport events.
    View,
    /// Undo stack events.
    History,
    /// Text editing requests.
    Text,
    /// Tool switching events.
    Tool,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Scene => write!(f, "Scene"),
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::View => write!(f, "View"),
            EventCategory::History => write!(f, "History"),
            EventCategory::Text => write!(f, "Text"),
            EventCategory::Tool => write!(f, "Tool"),
        }
    }
}

/// Scene content events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// Items were added, removed, replaced, or transformed.
    Changed {
        /// Human readable label of the command that caused the change.
        label: String,
    },
    /// The layer list changed (added, removed, renamed, reordered, flags).
    LayersChanged {
        /// Number of layers after the change.
        layer_count: usize,
    },
    /// A new current layer was chosen.
    CurrentLayerChanged {
        /// The new current layer.
        layer: LayerId,
    },
    /// The whole scene was replaced by a page load.
    Loaded {
        /// Number of items in the loaded scene.
        item_count: usize,
    },
}

impl SceneEvent {
    fn description(&self) -> String {
        match self {
            SceneEvent::Changed { label } => format!("Scene changed: {}", label),
            SceneEvent::LayersChanged { layer_count } => {
                format!("Layers changed ({} layers)", layer_count)
            }
            SceneEvent::CurrentLayerChanged { layer } => format!("Current layer {}", layer),
            SceneEvent::Loaded { item_count } => format!("Scene loaded ({} items)", item_count),
        }
    }
}

/// Selection events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// The selected set changed.
    Changed {
        /// Selected items in selection order.
        items: Vec<ItemId>,
    },
}

impl SelectionEvent {
    fn description(&self) -> String {
        match self {
            SelectionEvent::Changed { items } => format!("{} item(s) selected", items.len()),
        }
    }
}

/// Viewport events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// Zoom or scroll offsets changed.
    Changed {
        /// Current zoom factor.
        zoom: f64,
        /// Horizontal scroll offset in view pixels.
        scroll_x: f64,
        /// Vertical scroll offset in view pixels.
        scroll_y: f64,
    },
}

impl ViewEvent {
    fn description(&self) -> String {
        match self {
            ViewEvent::Changed {
                zoom,
                scroll_x,
                scroll_y,
            } => format!(
                "View zoom {:.0}% at ({:.1}, {:.1})",
                zoom * 100.0,
                scroll_x,
                scroll_y
            ),
        }
    }
}

/// Undo stack events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// The stack position or contents changed.
    Changed {
        /// Whether an undo is available.
        can_undo: bool,
        /// Whether a redo is available.
        can_redo: bool,
    },
}

impl HistoryEvent {
    fn description(&self) -> String {
        match self {
            HistoryEvent::Changed { can_undo, can_redo } => {
                format!("History undo={} redo={}", can_undo, can_redo)
            }
        }
    }
}

/// Text editing requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TextEvent {
    /// Enter interactive edit mode on a text item.
    EditRequested {
        /// The text item to edit.
        item: ItemId,
        /// Whether the whole content should start selected.
        select_all: bool,
    },
}

impl TextEvent {
    fn description(&self) -> String {
        match self {
            TextEvent::EditRequested { item, select_all } => {
                format!("Edit {} (select all: {})", item, select_all)
            }
        }
    }
}

/// Tool events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolEvent {
    /// The active tool changed.
    Activated {
        /// Name of the newly active tool.
        name: String,
    },
}

impl ToolEvent {
    fn description(&self) -> String {
        match self {
            ToolEvent::Activated { name } => format!("Tool {} active", name),
        }
    }
}
