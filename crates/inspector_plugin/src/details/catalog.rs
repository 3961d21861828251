//! Catalog of known event descriptors.

use super::descriptor::StructDescriptor;
use std::collections::HashMap;

/// Immutable map from a type's simple name to its [`StructDescriptor`].
///
/// Built once when the host starts and shared by reference afterwards.
/// Types missing from the catalog simply contribute no fields.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    descriptors: HashMap<&'static str, StructDescriptor>,
}

impl EventCatalog {
    pub fn builder() -> EventCatalogBuilder {
        EventCatalogBuilder::default()
    }

    /// Looks up the descriptor registered under `simple_name`.
    pub fn get(&self, simple_name: &str) -> Option<&StructDescriptor> {
        self.descriptors.get(simple_name)
    }

    pub fn contains(&self, simple_name: &str) -> bool {
        self.descriptors.contains_key(simple_name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Builder for [`EventCatalog`].
#[derive(Debug, Default)]
pub struct EventCatalogBuilder {
    descriptors: HashMap<&'static str, StructDescriptor>,
}

impl EventCatalogBuilder {
    /// Registers a descriptor under its simple name.
    ///
    /// Registering the same name again replaces the earlier descriptor.
    pub fn register(mut self, descriptor: StructDescriptor) -> Self {
        self.descriptors.insert(descriptor.simple_name(), descriptor);
        self
    }

    pub fn build(self) -> EventCatalog {
        EventCatalog {
            descriptors: self.descriptors,
        }
    }
}

impl FromIterator<StructDescriptor> for EventCatalog {
    fn from_iter<I: IntoIterator<Item = StructDescriptor>>(iter: I) -> Self {
        iter.into_iter()
            .fold(EventCatalog::builder(), EventCatalogBuilder::register)
            .build()
    }
}
