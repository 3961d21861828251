//! Hierarchy walking.

use super::catalog::EventCatalog;
use super::event_type::{level_view, EventType, InspectableEvent};
use std::fmt;
use tracing::debug;

/// Separator between type names in a hierarchy label.
pub const HIERARCHY_SEPARATOR: &str = " < ";

/// Human-readable description of an event.
///
/// `hierarchy` reads root first, e.g. `Event < BlockEvent < BlockBreakEvent`.
/// `fields` holds ancestor fields before descendant fields, each level in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub hierarchy: String,
    pub fields: Vec<(String, String)>,
}

impl EventDetails {
    /// Describes `event`, starting from its concrete type.
    pub fn for_event(catalog: &EventCatalog, event: &dyn InspectableEvent) -> Self {
        Self::for_event_from(catalog, event, event.event_type())
    }

    /// Describes `event` as an instance of `start_type` (one of its ancestors
    /// or its own type).
    pub fn for_event_from(
        catalog: &EventCatalog,
        event: &dyn InspectableEvent,
        start_type: &EventType,
    ) -> Self {
        let Some(parent) = start_type.parent() else {
            return Self {
                hierarchy: start_type.simple_name().to_string(),
                fields: Vec::new(),
            };
        };

        let mut details = Self::for_event_from(catalog, event, parent);
        let name = start_type.simple_name();

        if let Some(descriptor) = catalog.get(name) {
            match level_view(event, start_type) {
                Some(level) => details.fields.extend(descriptor.extract(level)),
                None => debug!("Event {} has no '{}' level", event.event_type().path(), name),
            }
        }

        details.hierarchy.push_str(HIERARCHY_SEPARATOR);
        details.hierarchy.push_str(name);
        details
    }

    /// Fields formatted as `name: value`.
    pub fn lines(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect()
    }
}

impl fmt::Display for EventDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event: {}", self.hierarchy)?;
        for line in self.lines() {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}
