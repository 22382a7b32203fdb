//! # notekit Core
//!
//! Shared building blocks for the notekit workspace: stable item and
//! layer identifiers, the error taxonomy used across crates, and the
//! typed event bus the editing engine publishes to after every committed
//! mutation.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod ids;

pub use error::{DocumentError, Error, GeometryError, PageFormatError, Result, SceneError};

pub use event_bus::{
    EditorEvent, EventBus, EventBusConfig, EventCategory, EventFilter, HistoryEvent, LoggedEvent,
    SceneEvent, SelectionEvent, SubscriptionId, TextEvent, ToolEvent, ViewEvent,
};

pub use ids::{ItemId, LayerId};
