//! # Event Introspection
//!
//! Produces a readable dump of any host event without per-event code at the
//! call site. Each hierarchy level registers a [`StructDescriptor`] in an
//! [`EventCatalog`] at startup; [`EventDetails::for_event`] then walks from
//! the event's concrete type up to the root [`EVENT`], collecting a label and
//! the fields of every registered level.
//!
//! ## Example
//!
//! ```rust
//! use inspector_plugin::details::*;
//! use inspector_plugin::{event_descriptor, event_type};
//! use std::any::Any;
//!
//! event_type!(pub static BLOCK_EVENT: BlockEvent extends EVENT);
//! event_type!(pub static BLOCK_BREAK_EVENT: BlockBreakEvent extends BLOCK_EVENT);
//!
//! pub struct BlockEvent { block: String }
//! pub struct BlockBreakEvent { base: BlockEvent, player: String }
//!
//! impl InspectableEvent for BlockEvent {
//!     fn event_type(&self) -> &'static EventType { &BLOCK_EVENT }
//!     fn as_any(&self) -> &dyn Any { self }
//! }
//!
//! impl InspectableEvent for BlockBreakEvent {
//!     fn event_type(&self) -> &'static EventType { &BLOCK_BREAK_EVENT }
//!     fn as_any(&self) -> &dyn Any { self }
//!     fn parent_event(&self) -> Option<&dyn InspectableEvent> { Some(&self.base) }
//! }
//!
//! let catalog = EventCatalog::builder()
//!     .register(event_descriptor!(BLOCK_EVENT => BlockEvent { block }))
//!     .register(event_descriptor!(BLOCK_BREAK_EVENT => BlockBreakEvent { player }))
//!     .build();
//!
//! let event = BlockBreakEvent {
//!     base: BlockEvent { block: "STONE".into() },
//!     player: "Alice".into(),
//! };
//!
//! let details = EventDetails::for_event(&catalog, &event);
//! assert_eq!(details.hierarchy, "Event < BlockEvent < BlockBreakEvent");
//! assert_eq!(details.lines(), vec!["block: STONE", "player: Alice"]);
//! ```

mod catalog;
mod descriptor;
mod event_type;
mod value;
mod walker;

#[cfg(test)]
mod tests;

pub use catalog::{EventCatalog, EventCatalogBuilder};
pub use descriptor::{FieldDescriptor, FieldReadError, StructDescriptor, StructDescriptorBuilder};
pub use event_type::{level_view, EventType, InspectableEvent, EVENT};
pub use value::FieldValue;
pub use walker::{EventDetails, HIERARCHY_SEPARATOR};

/// Declares a static [`EventType`] member of the event hierarchy.
///
/// ```rust
/// use inspector_plugin::{event_type, details::EVENT};
///
/// event_type!(pub static PLAYER_EVENT: PlayerEvent extends EVENT);
/// event_type!(pub static PLAYER_JOIN_EVENT: PlayerJoinEvent extends PLAYER_EVENT);
///
/// assert_eq!(PLAYER_JOIN_EVENT.simple_name(), "PlayerJoinEvent");
/// assert!(PLAYER_JOIN_EVENT.is_a(&EVENT));
/// ```
#[macro_export]
macro_rules! event_type {
    ($(#[$meta:meta])* $vis:vis static $ident:ident : $name:ident extends $parent:path $(;)?) => {
        $(#[$meta])*
        $vis static $ident: $crate::details::EventType = $crate::details::EventType::new(
            concat!(module_path!(), "::", stringify!($name)),
            &$parent,
        );
    };
}
