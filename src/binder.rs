//! Attaching binding options to entities and fields.
//!
//! [`bind`] validates options up front and returns a [`Binder`]. Applying the
//! binder is what a declaration does: it records the options in the entity's
//! option store and resolves what needs resolving.
//!
//! - On a static field: the value is resolved now and written back.
//! - On an instance field: the field becomes read-only and resolves per read.
//! - On the entity: the options become the base layer for every field, and
//!   every declared static field is re-resolved against them.

use tracing::debug;

use crate::entity::Entity;
use crate::error::EnvbindError;
use crate::options::BindingOptions;
use crate::types::{FieldScope, Target};

/// Validate `options` and produce a binder.
///
/// A blank `key` fails here, before anything is resolved.
pub fn bind(options: BindingOptions) -> Result<Binder, EnvbindError> {
    if options.get_key().is_some_and(|key| key.trim().is_empty()) {
        return Err(EnvbindError::InvalidKeyOption);
    }
    Ok(Binder { options })
}

#[derive(Debug, Clone)]
pub struct Binder {
    options: BindingOptions,
}

impl Binder {
    pub fn options(&self) -> &BindingOptions {
        &self.options
    }

    pub fn apply(&self, entity: &mut Entity, target: Target<'_>) -> Result<(), EnvbindError> {
        match target {
            Target::Entity => self.apply_to_entity(entity),
            Target::Field(field) => self.apply_to_field(entity, field),
        }
    }

    pub fn apply_to_field(&self, entity: &mut Entity, field: &str) -> Result<(), EnvbindError> {
        let scope = entity
            .field_scope(field)
            .ok_or_else(|| EnvbindError::UnknownField(field.to_string()))?;
        entity.options_mut().persist(&self.options, Some(field));
        match scope {
            FieldScope::Static => entity.bind_static(field),
            FieldScope::Instance => {
                entity.mark_instance_bound(field);
                Ok(())
            }
        }
    }

    /// Attach the options to the entity as a whole and re-resolve every
    /// declared static field against them.
    ///
    /// Static fields already resolved by a field-level binder fall back to
    /// their resolved value on a miss, so apply entity options last (or use
    /// [`EntityBuilder`](crate::EntityBuilder), which orders this for you).
    pub fn apply_to_entity(&self, entity: &mut Entity) -> Result<(), EnvbindError> {
        self.check_entity_scope()?;
        entity.options_mut().persist(&self.options, None);
        debug!(entity = entity.name(), "applied entity-level binding");
        entity.bind_all_statics()
    }

    pub(crate) fn check_entity_scope(&self) -> Result<(), EnvbindError> {
        if self.options.get_key().is_some() {
            return Err(EnvbindError::KeyOptionAtEntityScope);
        }
        Ok(())
    }
}
