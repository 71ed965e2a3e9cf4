//! Change notifications and the publish/subscribe capability
//!
//! Handlers are invoked synchronously, in subscription order, before
//! [`Observable::emit`] returns.

use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// Notification emitted by the game controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum GameEvent {
    GravityForceChanged { value: f32 },
    ShapesPerSecondChanged { value: u32 },
    ShapeCountChanged { count: usize },
    ShapeAreaChanged {
        #[serde(rename = "totalArea")]
        total_area: f32,
    },
    ShapeSpawned(Shape),
}

/// Event discriminant used for subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    GravityForceChanged,
    ShapesPerSecondChanged,
    ShapeCountChanged,
    ShapeAreaChanged,
    ShapeSpawned,
}

impl EventKind {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::GravityForceChanged => "gravityForceChanged",
            EventKind::ShapesPerSecondChanged => "shapesPerSecondChanged",
            EventKind::ShapeCountChanged => "shapeCountChanged",
            EventKind::ShapeAreaChanged => "shapeAreaChanged",
            EventKind::ShapeSpawned => "shapeSpawned",
        }
    }
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::GravityForceChanged { .. } => EventKind::GravityForceChanged,
            GameEvent::ShapesPerSecondChanged { .. } => EventKind::ShapesPerSecondChanged,
            GameEvent::ShapeCountChanged { .. } => EventKind::ShapeCountChanged,
            GameEvent::ShapeAreaChanged { .. } => EventKind::ShapeAreaChanged,
            GameEvent::ShapeSpawned(_) => EventKind::ShapeSpawned,
        }
    }
}

/// Token returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

pub type Handler = Box<dyn FnMut(&GameEvent)>;

/// Publish/subscribe capability
pub trait Observable {
    /// Register a handler for one event kind
    fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static;

    /// Register a handler for every event
    fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static;

    /// Returns false if the id was unknown
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    fn emit(&mut self, event: &GameEvent);
}

struct Subscriber {
    id: SubscriptionId,
    /// `None` receives every event
    kind: Option<EventKind>,
    handler: Handler,
}

/// Single-threaded event bus
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    next_id: u32,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, kind: Option<EventKind>, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber { id, kind, handler });
        id
    }
}

impl Observable for EventBus {
    fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.add(Some(kind), Box::new(handler))
    }

    fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.add(None, Box::new(handler))
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    fn emit(&mut self, event: &GameEvent) {
        let kind = event.kind();
        log::trace!("emit {}", kind.name());
        for subscriber in &mut self.subscribers {
            if subscriber.kind.is_none_or(|k| k == kind) {
                (subscriber.handler)(event);
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shape::{ShapeKind, build_shape};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_handlers_filtered_by_kind() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        bus.subscribe(EventKind::GravityForceChanged, move |e| {
            sink.borrow_mut().push(e.clone())
        });

        bus.emit(&GameEvent::ShapesPerSecondChanged { value: 3 });
        bus.emit(&GameEvent::GravityForceChanged { value: 10.0 });

        assert_eq!(
            *seen.borrow(),
            vec![GameEvent::GravityForceChanged { value: 10.0 }]
        );
    }

    #[test]
    fn test_subscription_order_and_unsubscribe() {
        let mut bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = order.clone();
        let a = bus.subscribe_all(move |_| first.borrow_mut().push("a"));
        let second = order.clone();
        bus.subscribe(EventKind::ShapeCountChanged, move |_| {
            second.borrow_mut().push("b")
        });

        bus.emit(&GameEvent::ShapeCountChanged { count: 1 });
        assert!(bus.unsubscribe(a));
        assert!(!bus.unsubscribe(a));
        bus.emit(&GameEvent::ShapeCountChanged { count: 2 });

        assert_eq!(*order.borrow(), vec!["a", "b", "b"]);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&GameEvent::ShapeAreaChanged { total_area: 0.0 }).unwrap();
        assert_eq!(json, r#"{"event":"shapeAreaChanged","payload":{"totalArea":0.0}}"#);

        let json = serde_json::to_string(&GameEvent::ShapesPerSecondChanged { value: 15 }).unwrap();
        assert_eq!(json, r#"{"event":"shapesPerSecondChanged","payload":{"value":15}}"#);
    }

    #[test]
    fn test_kind_names_match_wire_tags() {
        let shape = build_shape(ShapeKind::Circle, Vec2::new(100.0, -60.0), 60.0, 0);
        let events = [
            GameEvent::GravityForceChanged { value: 9.0 },
            GameEvent::ShapesPerSecondChanged { value: 15 },
            GameEvent::ShapeCountChanged { count: 0 },
            GameEvent::ShapeAreaChanged { total_area: 0.0 },
            GameEvent::ShapeSpawned(shape),
        ];
        for event in &events {
            let json: serde_json::Value = serde_json::to_value(event).unwrap();
            assert_eq!(json["event"], event.kind().name());
        }
    }
}
