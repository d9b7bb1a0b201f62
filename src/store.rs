//! Per-entity side table of binding options.
//!
//! Options live here rather than among an entity's fields, so they never show
//! up when fields are listed, serialized, or displayed. One slot holds the
//! entity-level options; one slot per tagged field holds that field's options.

use std::collections::HashMap;

use crate::options::BindingOptions;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Slot {
    Entity,
    Field(String),
}

impl Slot {
    fn of(field: Option<&str>) -> Self {
        match field {
            Some(name) => Slot::Field(name.to_string()),
            None => Slot::Entity,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OptionStore {
    slots: HashMap<Slot, BindingOptions>,
}

impl OptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `options` into the slot for `field` (`None` = entity level).
    /// Attributes set in `options` overwrite stored ones; the rest are kept.
    pub fn persist(&mut self, options: &BindingOptions, field: Option<&str>) {
        let slot = Slot::of(field);
        let current = self.slots.remove(&slot).unwrap_or_default();
        self.slots.insert(slot, current.merge(options));
    }

    /// Field options layered over entity options. Unset slots contribute
    /// nothing; an empty store yields empty options.
    pub fn retrieve(&self, field: Option<&str>) -> BindingOptions {
        let entity = self.slots.get(&Slot::Entity).cloned().unwrap_or_default();
        match field.and_then(|name| self.slots.get(&Slot::Field(name.to_string()))) {
            Some(field_opts) => entity.merge(field_opts),
            None => entity,
        }
    }

    pub fn has_entity(&self) -> bool {
        self.slots.contains_key(&Slot::Entity)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.slots.contains_key(&Slot::Field(field.to_string()))
    }
}
