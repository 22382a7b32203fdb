//! Event Bus implementation.
//!
//! Handlers run synchronously on the publishing thread, in the order the
//! editor commits its mutations. Every published event gets a sequence
//! number; with the replay log enabled, hosts that cannot take callbacks
//! poll [`EventBus::events_since`] instead.

use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use super::events::{EditorEvent, EventCategory};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &EditorEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Box<dyn Fn(EditorEvent) + Send + Sync>;

/// Configuration for the event bus
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Whether published events are kept in the replay log.
    pub keep_log: bool,
    /// Maximum number of events in the replay log.
    pub log_capacity: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            keep_log: false,
            log_capacity: 1000,
        }
    }
}

/// A published event with its position in the publish order.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedEvent {
    /// Sequence number, starting at 1 for the first published event.
    pub seq: u64,
    pub event: EditorEvent,
}

/// Event bus owned by an editor session
pub struct EventBus {
    handlers: RwLock<HashMap<SubscriptionId, (EventFilter, EventHandler)>>,
    log: RwLock<VecDeque<LoggedEvent>>,
    next_seq: AtomicU64,
    config: EventBusConfig,
}

impl EventBus {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            log: RwLock::new(VecDeque::new()),
            next_seq: AtomicU64::new(1),
            config,
        }
    }

    /// Publish an event to all matching subscribers
    ///
    /// Returns the number of handlers that received the event.
    pub fn publish(&self, event: EditorEvent) -> usize {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        if self.config.keep_log {
            self.append_to_log(seq, &event);
        }

        tracing::trace!("Publishing #{} {}", seq, event.description());

        let handlers = self.handlers.read();
        let mut delivered = 0;
        for (filter, handler) in handlers.values() {
            if filter.matches(&event) {
                handler(event.clone());
                delivered += 1;
            }
        }
        delivered
    }

    /// Subscribe to events with a synchronous handler
    ///
    /// Handlers must not subscribe or unsubscribe from inside the callback.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(EditorEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Logged events with a sequence number greater than `after`.
    ///
    /// Pass 0 for the whole log, or the `seq` of the last event seen to
    /// poll for new ones. Always empty when the log is disabled.
    pub fn events_since(&self, after: u64) -> Vec<LoggedEvent> {
        self.log
            .read()
            .iter()
            .filter(|logged| logged.seq > after)
            .cloned()
            .collect()
    }

    /// Sequence number of the most recently published event, 0 if none.
    pub fn last_seq(&self) -> u64 {
        self.next_seq.load(Ordering::Relaxed) - 1
    }

    pub fn clear_log(&self) {
        self.log.write().clear();
    }

    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    fn append_to_log(&self, seq: u64, event: &EditorEvent) {
        let mut log = self.log.write();
        log.push_back(LoggedEvent {
            seq,
            event: event.clone(),
        });
        while log.len() > self.config.log_capacity {
            log.pop_front();
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("last_seq", &self.last_seq())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::events::{HistoryEvent, SelectionEvent};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    fn history_event() -> EditorEvent {
        EditorEvent::History(HistoryEvent::Changed {
            can_undo: true,
            can_redo: false,
        })
    }

    #[test]
    fn test_event_bus_creation() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.last_seq(), 0);
        assert_eq!(bus.publish(history_event()), 0);
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let bus = EventBus::new();

        let id = bus.subscribe(EventFilter::All, |_| {});
        assert_eq!(bus.subscriber_count(), 1);

        assert!(bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(), 0);
        assert!(!bus.unsubscribe(id));
    }

    #[test]
    fn test_event_delivery() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        bus.subscribe(EventFilter::All, move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(bus.publish(history_event()), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_event_filtering() {
        let bus = EventBus::new();
        let history_count = Arc::new(AtomicUsize::new(0));
        let selection_count = Arc::new(AtomicUsize::new(0));

        let hc = history_count.clone();
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::History]),
            move |_| {
                hc.fetch_add(1, Ordering::SeqCst);
            },
        );

        let sc = selection_count.clone();
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Selection]),
            move |_| {
                sc.fetch_add(1, Ordering::SeqCst);
            },
        );

        bus.publish(history_event());
        bus.publish(EditorEvent::Selection(SelectionEvent::Changed {
            items: Vec::new(),
        }));
        bus.publish(EditorEvent::Selection(SelectionEvent::Changed {
            items: Vec::new(),
        }));

        assert_eq!(history_count.load(Ordering::SeqCst), 1);
        assert_eq!(selection_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_log_keeps_latest_events() {
        let config = EventBusConfig {
            keep_log: true,
            log_capacity: 3,
        };
        let bus = EventBus::with_config(config);

        for _ in 0..5 {
            bus.publish(history_event());
        }

        let logged = bus.events_since(0);
        assert_eq!(logged.len(), 3);
        assert_eq!(logged[0].seq, 3);
        assert_eq!(bus.last_seq(), 5);
        assert_eq!(bus.events_since(4).len(), 1);

        bus.clear_log();
        assert!(bus.events_since(0).is_empty());
    }

    #[test]
    fn test_log_disabled_by_default() {
        let bus = EventBus::new();
        bus.publish(history_event());
        assert!(bus.events_since(0).is_empty());
        assert_eq!(bus.last_seq(), 1);
    }
}
