//! Binding options and their attribute-wise layering.
//!
//! Options can be attached to a whole entity and to individual fields. Each
//! attribute (`prefix`, `key`, `validate`, `sources`) layers independently:
//! a field that only sets `prefix` still inherits the entity's validator and
//! sources. Whatever is left unset after layering falls back to the built-in
//! defaults in [`EffectiveOptions`].

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::BoxError;
use crate::key::derive_key;
use crate::source::{self, Source};
use crate::validate::{self, Validator};

/// Options attached to an entity or to one of its fields.
///
/// Every attribute is optional so that layering can tell "unset" from "set".
#[derive(Clone, Default)]
pub struct BindingOptions {
    prefix: Option<String>,
    key: Option<String>,
    validate: Option<Validator>,
    sources: Option<Vec<Source>>,
}

impl BindingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespace segment joined in front of the derived key.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Explicit lookup key. Bypasses key derivation and ignores `prefix`.
    ///
    /// Only valid on fields; a blank key is rejected by [`bind`](crate::bind).
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Transform applied to a resolved raw value.
    pub fn validate<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(f));
        self
    }

    /// Append a source. Sources are queried in the order they were added.
    pub fn source(mut self, source: Source) -> Self {
        self.sources.get_or_insert_with(Vec::new).push(source);
        self
    }

    /// Replace the source list.
    pub fn sources(mut self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources = Some(sources.into_iter().collect());
        self
    }

    pub fn get_prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn get_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn has_validator(&self) -> bool {
        self.validate.is_some()
    }

    /// Number of explicitly configured sources (`0` when unset).
    pub fn source_count(&self) -> usize {
        self.sources.as_ref().map_or(0, Vec::len)
    }

    /// Layer `overlay` on top of `self`. Attributes set in `overlay` win;
    /// unset ones keep the value from `self`. A non-empty source list replaces
    /// the lower one; an empty list counts as unset. Lists never concatenate.
    pub fn merge(self, overlay: &BindingOptions) -> BindingOptions {
        BindingOptions {
            prefix: overlay.prefix.clone().or(self.prefix),
            key: overlay.key.clone().or(self.key),
            validate: overlay.validate.clone().or(self.validate),
            sources: overlay
                .sources
                .clone()
                .filter(|sources| !sources.is_empty())
                .or(self.sources),
        }
    }

    /// Fill unset attributes with the built-in defaults. An empty source list
    /// counts as unset.
    pub fn into_effective(self) -> EffectiveOptions {
        EffectiveOptions {
            prefix: self.prefix,
            key: self.key,
            validate: self.validate.unwrap_or_else(|| Arc::new(validate::identity)),
            sources: self
                .sources
                .filter(|sources| !sources.is_empty())
                .unwrap_or_else(|| vec![source::env_source()]),
        }
    }
}

impl fmt::Debug for BindingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingOptions")
            .field("prefix", &self.prefix)
            .field("key", &self.key)
            .field("validate", &self.validate.is_some())
            .field("sources", &self.sources.as_ref().map(Vec::len))
            .finish()
    }
}

/// Fully layered options with defaults applied, ready for resolution.
#[derive(Clone)]
pub struct EffectiveOptions {
    pub prefix: Option<String>,
    pub key: Option<String>,
    pub validate: Validator,
    pub sources: Vec<Source>,
}

impl EffectiveOptions {
    /// The key to look up for `field`: the explicit key when set, otherwise
    /// the derived (and possibly prefixed) key.
    pub fn lookup_key(&self, field: &str) -> String {
        match &self.key {
            Some(key) => key.clone(),
            None => derive_key(field, self.prefix.as_deref()),
        }
    }
}

impl fmt::Debug for EffectiveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectiveOptions")
            .field("prefix", &self.prefix)
            .field("key", &self.key)
            .field("sources", &self.sources.len())
            .finish_non_exhaustive()
    }
}
