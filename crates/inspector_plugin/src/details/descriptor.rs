//! Structural descriptors and field extraction.
//!
//! A [`StructDescriptor`] lists the fields one hierarchy level declares
//! itself, as `(name, accessor)` pairs. Descriptors are built once, at
//! startup, and never change afterwards.

use super::event_type::EventType;
use std::any::Any;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::debug;

/// Errors raised while reading a field for introspection.
///
/// These never leave the extractor; they only decide that a level has no
/// readable details.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldReadError {
    /// The accessor could not produce a value
    #[error("field '{field}' is unreadable: {reason}")]
    Unreadable { field: String, reason: String },
    /// The instance has no payload of the descriptor's type
    #[error("no '{0}' level in this event")]
    LevelUnavailable(&'static str),
}

impl FieldReadError {
    pub fn unreadable(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unreadable {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

type Accessor = Arc<dyn Fn(&dyn Any) -> Result<String, FieldReadError> + Send + Sync>;

/// One declared field of a hierarchy level.
#[derive(Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    accessor: Accessor,
}

impl FieldDescriptor {
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn read(&self, instance: &dyn Any) -> Result<String, FieldReadError> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.accessor)(instance))) {
            Ok(result) => result,
            Err(payload) => {
                let panic = inspector_report::PanicError::from_payload(payload);
                Err(FieldReadError::unreadable(self.name, panic.message()))
            }
        }
    }
}

impl std::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The fields a single hierarchy level declares, in declaration order.
#[derive(Debug, Clone)]
pub struct StructDescriptor {
    simple_name: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    /// Starts a descriptor for level `event_type`, whose payload type is `T`.
    pub fn builder<T: Any>(event_type: &'static EventType) -> StructDescriptorBuilder<T> {
        StructDescriptorBuilder {
            simple_name: event_type.simple_name(),
            fields: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Simple name of the described type, the catalog key.
    pub fn simple_name(&self) -> &'static str {
        self.simple_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Reads every field of this level from `instance`.
    ///
    /// Returns `(name, value)` pairs in declaration order. If any single field
    /// cannot be read, the whole level yields nothing rather than a partial
    /// list.
    // TODO: one bad field hides its readable siblings too; decide whether
    // to skip only the failing field instead.
    pub fn extract(&self, instance: &dyn Any) -> Vec<(String, String)> {
        let mut details = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            match field.read(instance) {
                Ok(value) => details.push((field.name.to_string(), value)),
                Err(err) => {
                    debug!("Dropping '{}' details: {}", self.simple_name, err);
                    return Vec::new();
                }
            }
        }

        details
    }
}

/// Builder for [`StructDescriptor`].
pub struct StructDescriptorBuilder<T> {
    simple_name: &'static str,
    fields: Vec<FieldDescriptor>,
    _phantom: PhantomData<fn(&T)>,
}

impl<T: Any> StructDescriptorBuilder<T> {
    /// Adds a field whose value can always be read.
    pub fn field<F>(self, name: &'static str, read: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.try_field(name, move |level: &T| Ok(read(level)))
    }

    /// Adds a field whose accessor may fail.
    pub fn try_field<F>(mut self, name: &'static str, read: F) -> Self
    where
        F: Fn(&T) -> Result<String, FieldReadError> + Send + Sync + 'static,
    {
        let simple_name = self.simple_name;
        let accessor: Accessor = Arc::new(move |instance: &dyn Any| {
            let level = instance
                .downcast_ref::<T>()
                .ok_or(FieldReadError::LevelUnavailable(simple_name))?;
            read(level)
        });

        self.fields.push(FieldDescriptor { name, accessor });
        self
    }

    pub fn build(self) -> StructDescriptor {
        StructDescriptor {
            simple_name: self.simple_name,
            fields: self.fields,
        }
    }
}

/// Builds a [`StructDescriptor`] from a list of fields rendered with
/// [`crate::details::FieldValue`].
///
/// ```rust
/// use inspector_plugin::{event_descriptor, event_type, details::EVENT};
///
/// event_type!(pub static BLOCK_EVENT: BlockEvent extends EVENT);
///
/// pub struct BlockEvent {
///     block: String,
///     light_level: u8,
/// }
///
/// let descriptor = event_descriptor!(BLOCK_EVENT => BlockEvent { block, light_level });
/// assert_eq!(descriptor.fields().len(), 2);
/// ```
#[macro_export]
macro_rules! event_descriptor {
    ($event_type:path => $ty:ty { $($field:ident),* $(,)? }) => {
        $crate::details::StructDescriptor::builder::<$ty>(&$event_type)
            $(
                .field(stringify!($field), |level: &$ty| {
                    $crate::details::FieldValue::render(&level.$field)
                })
            )*
            .build()
    };
}
