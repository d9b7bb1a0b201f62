//! Derived entities with selected static values replaced.
//!
//! A [`Scope`] is a set of per-field overrides. Applying it to an entity
//! produces an independent copy whose static fields keep the source's current
//! values except where the scope defines an override. The copy carries the
//! source's binding options, so it can be scoped again or inspected the same
//! way as the original.
//!
//! An override counts when it is *defined*: `""`, `0`, `false`, and `null`
//! all replace the source value. A field marked with [`Scope::unset`], or
//! absent from the scope, keeps the source value.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::entity::Entity;
use crate::error::EnvbindError;
use crate::types::Target;

/// Build a scope from `(field, value)` pairs.
pub fn scope<K, V>(overrides: impl IntoIterator<Item = (K, V)>) -> Scope
where
    K: Into<String>,
    V: Into<Value>,
{
    overrides
        .into_iter()
        .fold(Scope::new(), |scope, (field, value)| scope.set(field, value))
}

#[derive(Debug, Clone, Default)]
pub struct Scope {
    overrides: HashMap<String, Option<Value>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override `field` with `value`. Later calls for the same field win.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(field.into(), Some(value.into()));
        self
    }

    /// Mention `field` without defining it; the source value is kept.
    pub fn unset(mut self, field: impl Into<String>) -> Self {
        self.overrides.insert(field.into(), None);
        self
    }

    /// Collect overrides from any serializable map or struct.
    ///
    /// `None` fields serialize to `null` and are treated as undefined, so an
    /// `Option` left empty never clobbers a value. Use [`set`](Self::set) with
    /// `Value::Null` to override with an explicit null.
    pub fn from_serialize<S: Serialize>(source: &S) -> Result<Self, EnvbindError> {
        let map = match serde_json::to_value(source)? {
            Value::Object(map) => map,
            other => {
                return Err(EnvbindError::InvalidOverrides(format!(
                    "expected a map or struct, got {other}"
                )));
            }
        };
        Ok(map.into_iter().fold(Scope::new(), |scope, (field, value)| {
            if value.is_null() {
                scope.unset(field)
            } else {
                scope.set(field, value)
            }
        }))
    }

    /// The defined override for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.overrides.get(field).and_then(Option::as_ref)
    }

    pub fn apply(&self, entity: &Entity, target: Target<'_>) -> Result<Entity, EnvbindError> {
        match target {
            Target::Entity => Ok(self.apply_to_entity(entity)),
            Target::Field(field) => Err(EnvbindError::ScopeMisuse(field.to_string())),
        }
    }

    /// Copy `entity`, replacing static values this scope defines.
    ///
    /// Overrides for fields the entity does not declare are ignored.
    pub fn apply_to_entity(&self, entity: &Entity) -> Entity {
        let mut scoped = entity.clone();
        let mut replaced = 0usize;
        for (field, value) in scoped.statics_mut() {
            if let Some(over) = self.get(field) {
                *value = over.clone();
                replaced += 1;
            }
        }
        debug!(entity = scoped.name(), replaced, "scoped entity");
        scoped
    }
}
