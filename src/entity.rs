//! Entities, their declared fields, and per-instance views.
//!
//! An [`Entity`] owns two kinds of fields. Static fields hold a single value
//! on the entity; once bound they are resolved and written back, then stay
//! fixed. Instance fields are templates: every [`Instance`] gets its own copy
//! of the defaults, and fields tagged with a binder re-resolve on every read.
//!
//! Binding metadata is kept in a private [`OptionStore`], never among the
//! fields themselves, so serialization and listings only show field values.

use std::collections::BTreeSet;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::EnvbindError;
use crate::resolve::bind_value;
use crate::store::OptionStore;
use crate::types::FieldScope;

#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    statics: Map<String, Value>,
    instance_defaults: Map<String, Value>,
    bound_instance: BTreeSet<String>,
    options: OptionStore,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statics: Map::new(),
            instance_defaults: Map::new(),
            bound_instance: BTreeSet::new(),
            options: OptionStore::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a static field with its default value.
    ///
    /// If entity-level options are already attached, the new field is bound
    /// right away, so fields declared after whole-entity binding are resolved
    /// the same as those declared before it.
    pub fn declare_static(
        &mut self,
        name: impl Into<String>,
        default: impl Into<Value>,
    ) -> Result<(), EnvbindError> {
        let name = name.into();
        self.insert_field(name.clone(), FieldScope::Static, default.into());
        if self.options.has_entity() {
            self.bind_static(&name)?;
        }
        Ok(())
    }

    /// Declare an instance field with the default each instance starts from.
    pub fn declare_instance(&mut self, name: impl Into<String>, default: impl Into<Value>) {
        self.insert_field(name.into(), FieldScope::Instance, default.into());
    }

    /// Current value of a static field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.statics.get(field)
    }

    /// Deserialize one static field into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, field: &str) -> Result<T, EnvbindError> {
        let value = self
            .statics
            .get(field)
            .ok_or_else(|| EnvbindError::UnknownField(field.to_string()))?;
        Ok(T::deserialize(value)?)
    }

    /// Deserialize every static field into a typed config struct.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T, EnvbindError> {
        Ok(T::deserialize(Value::Object(self.statics.clone()))?)
    }

    /// Overwrite a static field's value.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<(), EnvbindError> {
        let slot = self
            .statics
            .get_mut(field)
            .ok_or_else(|| EnvbindError::UnknownField(field.to_string()))?;
        *slot = value.into();
        Ok(())
    }

    /// Static field names in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.statics.keys().map(String::as_str)
    }

    /// Instance field names in declaration order.
    pub fn instance_fields(&self) -> impl Iterator<Item = &str> {
        self.instance_defaults.keys().map(String::as_str)
    }

    pub fn field_scope(&self, field: &str) -> Option<FieldScope> {
        if self.statics.contains_key(field) {
            Some(FieldScope::Static)
        } else if self.instance_defaults.contains_key(field) {
            Some(FieldScope::Instance)
        } else {
            None
        }
    }

    /// Binding metadata attached to this entity and its fields.
    pub fn options(&self) -> &OptionStore {
        &self.options
    }

    /// Create an instance from the current instance templates and options.
    pub fn instantiate(&self) -> Instance {
        Instance {
            entity: self.name.clone(),
            values: self.instance_defaults.clone(),
            bound: self.bound_instance.clone(),
            options: self.options.clone(),
        }
    }

    /// Insert or replace a field without binding it. A name lives in exactly
    /// one scope; redeclaring it under the other scope moves it.
    pub(crate) fn insert_field(&mut self, name: String, scope: FieldScope, default: Value) {
        match scope {
            FieldScope::Static => {
                self.instance_defaults.shift_remove(&name);
                self.bound_instance.remove(&name);
                self.statics.insert(name, default);
            }
            FieldScope::Instance => {
                self.statics.shift_remove(&name);
                self.instance_defaults.insert(name, default);
            }
        }
    }

    pub(crate) fn options_mut(&mut self) -> &mut OptionStore {
        &mut self.options
    }

    pub(crate) fn mark_instance_bound(&mut self, field: &str) {
        self.bound_instance.insert(field.to_string());
    }

    pub(crate) fn statics_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> {
        self.statics.iter_mut()
    }

    /// Resolve a static field once and store the result as its value.
    pub(crate) fn bind_static(&mut self, field: &str) -> Result<(), EnvbindError> {
        let current = self
            .statics
            .get(field)
            .ok_or_else(|| EnvbindError::UnknownField(field.to_string()))?;
        let resolved = bind_value(&self.options, field, current)?;
        self.statics.insert(field.to_string(), resolved);
        Ok(())
    }

    pub(crate) fn bind_all_statics(&mut self) -> Result<(), EnvbindError> {
        let names: Vec<String> = self.statics.keys().cloned().collect();
        for name in &names {
            self.bind_static(name)?;
        }
        Ok(())
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.statics.serialize(serializer)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.statics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{key} = {}", format_value(value))?;
        }
        Ok(())
    }
}

/// Format a value for display: strings bare, everything else as JSON.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A per-object view of an entity's instance fields.
///
/// Tagged fields are read-only and resolve from their sources on every read,
/// so a changed source is visible on the next [`get`](Self::get).
#[derive(Debug, Clone)]
pub struct Instance {
    entity: String,
    values: Map<String, Value>,
    bound: BTreeSet<String>,
    options: OptionStore,
}

impl Instance {
    pub fn entity_name(&self) -> &str {
        &self.entity
    }

    pub fn get(&self, field: &str) -> Result<Value, EnvbindError> {
        let current = self
            .values
            .get(field)
            .ok_or_else(|| EnvbindError::UnknownField(field.to_string()))?;
        if self.bound.contains(field) {
            bind_value(&self.options, field, current)
        } else {
            Ok(current.clone())
        }
    }

    /// Write an untagged field. Writes to tagged fields are ignored.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<(), EnvbindError> {
        if self.bound.contains(field) {
            trace!(entity = %self.entity, field, "ignoring write to bound field");
            return Ok(());
        }
        let slot = self
            .values
            .get_mut(field)
            .ok_or_else(|| EnvbindError::UnknownField(field.to_string()))?;
        *slot = value.into();
        Ok(())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_bound(&self, field: &str) -> bool {
        self.bound.contains(field)
    }
}
