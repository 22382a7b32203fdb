//! # Event Bus Module
//!
//! Typed publish/subscribe channel between the editing engine and the
//! host shell. The engine publishes after committing a mutation; hosts
//! subscribe to refresh their views.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use notekit_core::event_bus::{EditorEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Selection]),
//!     |event| {
//!         if let EditorEvent::Selection(change) = event {
//!             println!("selection: {:?}", change);
//!         }
//!     },
//! );
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
