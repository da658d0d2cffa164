//! Type-keyed serializer registry for reflection-free typed round trips.
//!
//! Each domain type maps to at most one [`JsonSerializer`] implementation,
//! keyed by [`TypeId`]. The map is concurrent: registrations for distinct
//! types never contend, and insert-if-absent is atomic, so a racing
//! double-register without `allow_overwrite` keeps exactly one winner.
//!
//! There is no reflective fallback — looking up an unregistered type is a
//! [`JsonError::NoSerializer`], reported to the caller.

use crate::error::{JsonError, Result};
use crate::parser;
use crate::value::JsonValue;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::{type_name, Any, TypeId};
use std::sync::{Arc, OnceLock};

/// Converts between one domain type and the document model. Round-trip
/// fidelity is the implementor's contract; the registry only stores and
/// finds serializers.
pub trait JsonSerializer<T>: Send + Sync {
    /// Convert an instance into a document value.
    fn to_json(&self, instance: &T) -> Result<JsonValue>;

    /// Rebuild an instance from a document value.
    fn from_json(&self, value: &JsonValue) -> Result<T>;
}

/// A concurrent map from type identity to serializer instance.
#[derive(Default)]
pub struct SerializerRegistry {
    entries: DashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl SerializerRegistry {
    pub fn new() -> Self {
        SerializerRegistry::default()
    }

    /// Register a serializer for `T`. When an entry already exists and
    /// `allow_overwrite` is false the existing entry wins and this is a
    /// no-op. Returns whether the given serializer was stored.
    pub fn register<T, S>(&self, serializer: S, allow_overwrite: bool) -> bool
    where
        T: 'static,
        S: JsonSerializer<T> + 'static,
    {
        let handle: Arc<dyn JsonSerializer<T>> = Arc::new(serializer);
        let entry: Box<dyn Any + Send + Sync> = Box::new(handle);
        if allow_overwrite {
            self.entries.insert(TypeId::of::<T>(), entry);
            return true;
        }
        match self.entries.entry(TypeId::of::<T>()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
        }
    }

    /// Find the serializer registered for `T`, if any.
    pub fn lookup<T: 'static>(&self) -> Option<Arc<dyn JsonSerializer<T>>> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<Arc<dyn JsonSerializer<T>>>().cloned())
    }

    fn require<T: 'static>(&self) -> Result<Arc<dyn JsonSerializer<T>>> {
        self.lookup::<T>().ok_or(JsonError::NoSerializer {
            type_name: type_name::<T>(),
        })
    }

    /// Convert an instance into a document value via its registered
    /// serializer.
    pub fn serialize<T: 'static>(&self, instance: &T) -> Result<JsonValue> {
        self.require::<T>()?.to_json(instance)
    }

    /// Rebuild an instance from a document value via its registered
    /// serializer.
    pub fn deserialize<T: 'static>(&self, value: &JsonValue) -> Result<T> {
        self.require::<T>()?.from_json(value)
    }

    /// Serialize an instance straight to JSON text.
    pub fn to_text<T: 'static>(&self, instance: &T, pretty: bool) -> Result<String> {
        Ok(self.serialize(instance)?.to_text(pretty))
    }

    /// Parse JSON text and rebuild an instance from it.
    pub fn from_text<T: 'static>(&self, text: &str) -> Result<T> {
        self.deserialize(&parser::parse(text)?)
    }
}

/// The process-wide default registry.
pub fn global() -> &'static SerializerRegistry {
    static GLOBAL: OnceLock<SerializerRegistry> = OnceLock::new();
    GLOBAL.get_or_init(SerializerRegistry::new)
}
