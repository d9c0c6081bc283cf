//! User-defined, field-tracked data classes, reconstructable from a recorded
//! event stream.
//!
//! Rust has no decorators, so the feature is a [`Component`] trait
//! (`schema`/`get_field`/`set_field`) plus a per-`Context`
//! [`ComponentRegistry`] keyed by `(module, qualname)` — one instance table
//! per user-registered type, since components here are singletons addressed
//! by name rather than per-agent rows.

use std::collections::HashMap;

use gsim_core::{CoreError, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{RecordError, RecordResult};

/// `(module, qualname)` — the recorder's key for a user-registered
/// component type.
pub type ComponentKey = (String, String);

/// Restricted field type tags: immutable scalars (`int, float, str, bool`)
/// and recursive `Optional/Union/Tuple` thereof.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldType {
    Int,
    Float,
    Str,
    Bool,
    Optional(Box<FieldType>),
    Union(Vec<FieldType>),
    Tuple(Vec<FieldType>),
}

/// A user-defined, field-tracked data class. Object-safe so instances can be
/// stored as `Box<dyn Component>` in the registry; `schema()` is an
/// associated function (not a method) since it describes the type, not an
/// instance.
pub trait Component: 'static {
    fn schema() -> IndexMap<String, FieldType>
    where
        Self: Sized;

    fn get_field(&self, field: &str) -> Option<Value>;

    /// Assign a tracked field. Each call is what `COMPONENT_UPDATE` records.
    fn set_field(&mut self, field: &str, value: Value);
}

/// A schema-less field map standing in for a component type whose concrete
/// Rust implementation isn't registered in this process (see
/// [`ComponentRegistry::register_schema_only`]).
#[derive(Default)]
struct DynamicComponent {
    fields: IndexMap<String, Value>,
}

impl Component for DynamicComponent {
    fn schema() -> IndexMap<String, FieldType> {
        IndexMap::new()
    }

    fn get_field(&self, field: &str) -> Option<Value> {
        self.fields.get(field).cloned()
    }

    fn set_field(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_string(), value);
    }
}

struct Factory {
    schema: IndexMap<String, FieldType>,
    make: Box<dyn Fn() -> Box<dyn Component>>,
}

/// Per-`Context` registry of component types and their live instances.
#[derive(Default)]
pub struct ComponentRegistry {
    factories: HashMap<ComponentKey, Factory>,
    instances: IndexMap<String, (ComponentKey, Box<dyn Component>)>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a component type under `key` (`COMPONENT_REGISTER`).
    /// Duplicate keys fail [`CoreError::AlreadyExists`].
    pub fn register<T: Component + Default + 'static>(&mut self, key: ComponentKey) -> RecordResult<()> {
        if self.factories.contains_key(&key) {
            return Err(RecordError::Core(CoreError::AlreadyExists(format!(
                "component {}.{}",
                key.0, key.1
            ))));
        }
        self.factories.insert(
            key,
            Factory {
                schema: T::schema(),
                make: Box::new(|| Box::new(T::default())),
            },
        );
        Ok(())
    }

    pub fn schema_of(&self, key: &ComponentKey) -> Option<&IndexMap<String, FieldType>> {
        self.factories.get(key).map(|f| &f.schema)
    }

    /// Register a schema for replay without a concrete Rust type backing it:
    /// the type is re-synthesized at its `(module, qualname)` key using only
    /// the recorded schema. Instances created under this key are
    /// [`DynamicComponent`]s — plain field maps — since Rust can't
    /// synthesize a new struct type at runtime.
    pub fn register_schema_only(&mut self, key: ComponentKey, schema: IndexMap<String, FieldType>) {
        self.factories.entry(key).or_insert_with(|| Factory {
            schema,
            make: Box::new(|| Box::new(DynamicComponent::default())),
        });
    }

    /// Instantiate `key` under instance name `name` (`COMPONENT_CREATE`).
    pub fn create(&mut self, key: ComponentKey, name: impl Into<String>) -> RecordResult<()> {
        let factory = self
            .factories
            .get(&key)
            .ok_or_else(|| RecordError::NotFound(format!("component type {}.{}", key.0, key.1)))?;
        let instance = (factory.make)();
        self.instances.insert(name.into(), (key, instance));
        Ok(())
    }

    /// Assign a field on a live instance (`COMPONENT_UPDATE`).
    pub fn set_field(&mut self, name: &str, field: &str, value: Value) -> RecordResult<()> {
        let (_, instance) = self
            .instances
            .get_mut(name)
            .ok_or_else(|| RecordError::NotFound(format!("component instance {name}")))?;
        instance.set_field(field, value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Component> {
        self.instances.get(name).map(|(_, c)| c.as_ref())
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}
