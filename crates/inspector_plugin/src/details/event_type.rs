//! Event type hierarchy.
//!
//! Host events form a tree rooted at [`EVENT`]. Each member is declared once
//! as a static [`EventType`] pointing at its parent, and an event value
//! carries the payload of each ancestor level through
//! [`InspectableEvent::parent_event`].

use std::any::Any;

/// Static descriptor of one member of the event hierarchy.
#[derive(Debug)]
pub struct EventType {
    path: &'static str,
    parent: Option<&'static EventType>,
}

/// Root of every event hierarchy.
pub static EVENT: EventType = EventType {
    path: "Event",
    parent: None,
};

impl EventType {
    /// Declares a type extending `parent`.
    ///
    /// `path` is the qualified name; only its last `::` segment is used to
    /// look up descriptors. Prefer the [`crate::event_type!`] macro, which
    /// fills in the module path.
    pub const fn new(path: &'static str, parent: &'static EventType) -> Self {
        Self {
            path,
            parent: Some(parent),
        }
    }

    /// Fully qualified name.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Name without the module path.
    pub fn simple_name(&self) -> &'static str {
        self.path.rsplit("::").next().unwrap_or(self.path)
    }

    /// Immediate ancestor, `None` only for [`EVENT`].
    pub fn parent(&self) -> Option<&'static EventType> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether `self` is `ancestor` or descends from it.
    pub fn is_a(&self, ancestor: &EventType) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if ty == ancestor {
                return true;
            }
            current = ty.parent;
        }
        false
    }
}

impl PartialEq for EventType {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for EventType {}

/// An event value that can be introspected.
///
/// Rust events extend their parents by embedding them: a block break event
/// holds a block event, which in turn is the first level under the root.
/// `parent_event` exposes that embedded value so every ancestor level can be
/// read from the same instance.
pub trait InspectableEvent: Any + Send + Sync {
    /// The concrete type of this event.
    fn event_type(&self) -> &'static EventType;

    /// This level's payload, for descriptor accessors.
    fn as_any(&self) -> &dyn Any;

    /// The embedded payload of the parent level, if the parent is not the root.
    fn parent_event(&self) -> Option<&dyn InspectableEvent> {
        None
    }
}

/// Finds the payload of `event` at hierarchy level `ty`.
pub fn level_view<'a>(event: &'a dyn InspectableEvent, ty: &EventType) -> Option<&'a dyn Any> {
    let mut current = Some(event);
    while let Some(level) = current {
        if level.event_type() == ty {
            return Some(level.as_any());
        }
        current = level.parent_event();
    }
    None
}
