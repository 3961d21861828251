use super::*;
use crate::{event_descriptor, event_type};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

event_type!(static BLOCK_EVENT: BlockEvent extends EVENT);
event_type!(static BLOCK_BREAK_EVENT: BlockBreakEvent extends BLOCK_EVENT);
event_type!(static FANCY_BREAK_EVENT: FancyBreakEvent extends BLOCK_BREAK_EVENT);
event_type!(static PLAYER_EVENT: PlayerEvent extends EVENT);

#[derive(Debug)]
struct BlockEvent {
    block: String,
    broken: Arc<AtomicBool>,
}

#[derive(Debug)]
struct BlockBreakEvent {
    base: BlockEvent,
    player: String,
    exp: u32,
}

#[derive(Debug)]
struct FancyBreakEvent {
    base: BlockBreakEvent,
    particles: Option<String>,
}

#[derive(Debug)]
struct PlayerEvent {
    player: String,
}

impl InspectableEvent for BlockEvent {
    fn event_type(&self) -> &'static EventType {
        &BLOCK_EVENT
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl InspectableEvent for BlockBreakEvent {
    fn event_type(&self) -> &'static EventType {
        &BLOCK_BREAK_EVENT
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn parent_event(&self) -> Option<&dyn InspectableEvent> {
        Some(&self.base)
    }
}

impl InspectableEvent for FancyBreakEvent {
    fn event_type(&self) -> &'static EventType {
        &FANCY_BREAK_EVENT
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn parent_event(&self) -> Option<&dyn InspectableEvent> {
        Some(&self.base)
    }
}

impl InspectableEvent for PlayerEvent {
    fn event_type(&self) -> &'static EventType {
        &PLAYER_EVENT
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn block_descriptor() -> StructDescriptor {
    StructDescriptor::builder::<BlockEvent>(&BLOCK_EVENT)
        .try_field("block", |event: &BlockEvent| {
            if event.broken.load(Ordering::SeqCst) {
                Err(FieldReadError::unreadable("block", "chunk unloaded"))
            } else {
                Ok(event.block.clone())
            }
        })
        .build()
}

fn catalog() -> EventCatalog {
    EventCatalog::builder()
        .register(block_descriptor())
        .register(event_descriptor!(BLOCK_BREAK_EVENT => BlockBreakEvent { player }))
        .register(event_descriptor!(PLAYER_EVENT => PlayerEvent { player }))
        .build()
}

fn block_break(block: &str, player: &str) -> BlockBreakEvent {
    BlockBreakEvent {
        base: BlockEvent {
            block: block.to_string(),
            broken: Arc::new(AtomicBool::new(false)),
        },
        player: player.to_string(),
        exp: 3,
    }
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[test]
fn test_block_break_event_details() {
    let event = block_break("STONE", "Alice");
    let details = EventDetails::for_event(&catalog(), &event);

    assert_eq!(details.hierarchy, "Event < BlockEvent < BlockBreakEvent");
    assert_eq!(details.fields, pairs(&[("block", "STONE"), ("player", "Alice")]));
}

#[test]
fn test_unreadable_field_drops_only_its_level() {
    let event = block_break("STONE", "Alice");
    event.base.broken.store(true, Ordering::SeqCst);

    let details = EventDetails::for_event(&catalog(), &event);

    assert_eq!(details.hierarchy, "Event < BlockEvent < BlockBreakEvent");
    assert_eq!(details.fields, pairs(&[("player", "Alice")]));
}

#[test]
fn test_failing_field_empties_whole_level() {
    let descriptor = StructDescriptor::builder::<BlockBreakEvent>(&BLOCK_BREAK_EVENT)
        .field("player", |event: &BlockBreakEvent| event.player.clone())
        .try_field("exp", |_: &BlockBreakEvent| {
            Err(FieldReadError::unreadable("exp", "not computed yet"))
        })
        .build();

    let event = block_break("STONE", "Alice");
    assert!(descriptor.extract(&event).is_empty());
}

#[test]
fn test_panicking_accessor_counts_as_unreadable() {
    let descriptor = StructDescriptor::builder::<BlockBreakEvent>(&BLOCK_BREAK_EVENT)
        .field("exp", |_: &BlockBreakEvent| -> String { panic!("lazy value failed") })
        .build();

    let event = block_break("STONE", "Alice");
    assert!(descriptor.extract(&event).is_empty());
}

#[test]
fn test_extract_with_wrong_payload_is_empty() {
    let event = PlayerEvent {
        player: "Bob".to_string(),
    };
    assert!(block_descriptor().extract(&event).is_empty());
}

#[test]
fn test_unregistered_leaf_still_walks_ancestors() {
    let event = FancyBreakEvent {
        base: block_break("DIRT", "Carol"),
        particles: None,
    };

    let details = EventDetails::for_event(&catalog(), &event);

    assert_eq!(
        details.hierarchy,
        "Event < BlockEvent < BlockBreakEvent < FancyBreakEvent"
    );
    assert_eq!(details.fields, pairs(&[("block", "DIRT"), ("player", "Carol")]));
}

#[test]
fn test_registered_leaf_under_unregistered_parent() {
    let catalog = EventCatalog::builder()
        .register(event_descriptor!(FANCY_BREAK_EVENT => FancyBreakEvent { particles }))
        .build();
    let event = FancyBreakEvent {
        base: block_break("DIRT", "Carol"),
        particles: None,
    };

    let details = EventDetails::for_event(&catalog, &event);

    assert_eq!(
        details.hierarchy,
        "Event < BlockEvent < BlockBreakEvent < FancyBreakEvent"
    );
    assert_eq!(details.fields, pairs(&[("particles", "null")]));
}

#[test]
fn test_empty_catalog_gives_label_only() {
    let event = block_break("STONE", "Alice");
    let details = EventDetails::for_event(&EventCatalog::default(), &event);

    assert_eq!(details.hierarchy, "Event < BlockEvent < BlockBreakEvent");
    assert!(details.fields.is_empty());
}

#[test]
fn test_root_start_type_is_base_case() {
    let event = block_break("STONE", "Alice");
    let details = EventDetails::for_event_from(&catalog(), &event, &EVENT);

    assert_eq!(details.hierarchy, "Event");
    assert!(details.fields.is_empty());
}

#[test]
fn test_start_from_ancestor_type() {
    let event = block_break("STONE", "Alice");
    let details = EventDetails::for_event_from(&catalog(), &event, &BLOCK_EVENT);

    assert_eq!(details.hierarchy, "Event < BlockEvent");
    assert_eq!(details.fields, pairs(&[("block", "STONE")]));
}

#[test]
fn test_describe_is_repeatable() {
    let catalog = catalog();
    let event = block_break("GRAVEL", "Dave");

    let first = EventDetails::for_event(&catalog, &event);
    let second = EventDetails::for_event(&catalog, &event);

    assert_eq!(first, second);
}

#[test]
fn test_same_simple_name_registration_is_idempotent() {
    let catalog = EventCatalog::builder()
        .register(block_descriptor())
        .register(block_descriptor())
        .build();

    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains("BlockEvent"));
    assert!(!catalog.contains("tests::BlockEvent"));
}

#[test]
fn test_catalog_from_iterator() {
    let catalog: EventCatalog = vec![
        block_descriptor(),
        event_descriptor!(PLAYER_EVENT => PlayerEvent { player }),
    ]
    .into_iter()
    .collect();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("PlayerEvent").unwrap().fields()[0].name(), "player");
}

#[test]
fn test_event_type_names() {
    assert_eq!(BLOCK_BREAK_EVENT.simple_name(), "BlockBreakEvent");
    assert!(BLOCK_BREAK_EVENT.path().ends_with("::BlockBreakEvent"));
    assert_eq!(EVENT.simple_name(), "Event");
    assert!(EVENT.is_root());
    assert!(!BLOCK_EVENT.is_root());
}

#[test]
fn test_event_type_ancestry() {
    assert!(FANCY_BREAK_EVENT.is_a(&BLOCK_EVENT));
    assert!(FANCY_BREAK_EVENT.is_a(&EVENT));
    assert!(BLOCK_EVENT.is_a(&BLOCK_EVENT));
    assert!(!BLOCK_EVENT.is_a(&BLOCK_BREAK_EVENT));
    assert!(!PLAYER_EVENT.is_a(&BLOCK_EVENT));
}

#[test]
fn test_level_view_finds_embedded_payload() {
    let event = block_break("STONE", "Alice");

    let level = level_view(&event, &BLOCK_EVENT).expect("block level");
    assert_eq!(level.downcast_ref::<BlockEvent>().unwrap().block, "STONE");
    assert!(level_view(&event, &PLAYER_EVENT).is_none());
}

#[test]
fn test_details_display() {
    let event = block_break("STONE", "Alice");
    let details = EventDetails::for_event(&catalog(), &event);

    assert_eq!(
        details.to_string(),
        "Event: Event < BlockEvent < BlockBreakEvent\n  block: STONE\n  player: Alice"
    );
}
