//! Declarative configuration fields bound to environment-backed values.
//!
//! Envbind resolves named fields from an external key/value source (the
//! process environment by default) with a fixed precedence of naming, source
//! lookup, and transformation rules. Declare the fields, attach options, and
//! read typed values back out.
//!
//! ```ignore
//! let config = Entity::builder("Config")
//!     .static_field("url", "http://localhost")
//!     .static_field("secretKey", "")
//!     .bind(bind(BindingOptions::new().prefix("NEXT_PUBLIC"))?)
//!     .bind_field("secretKey", bind(BindingOptions::new().prefix("APP"))?)
//!     .build()?;
//!
//! // NEXT_PUBLIC_URL, APP_SECRET_KEY
//! let url = config.get_as::<String>("url")?;
//! ```
//!
//! # Resolving a field
//!
//! For every bound field:
//!
//! 1. The field's options are layered over the entity's options, attribute by
//!    attribute. Unset attributes fall back to the defaults: identity
//!    validator, environment source.
//! 2. The lookup key is the explicit `key` if one was given, otherwise the
//!    field name in upper snake case, prefixed with `<prefix>_` when a prefix
//!    is set (`settingUrl` with prefix `APP` → `APP_SETTING_URL`).
//! 3. Sources are queried in order; the first one with a non-empty value wins
//!    and the rest are skipped.
//! 4. A found value runs through the validator. When no source has a value,
//!    the field keeps the value it already had.
//!
//! # Option layering
//!
//! ```text
//! Built-in defaults     identity validator, env_source()
//!        ↑ overridden by
//! Entity options        bind(...) applied to the entity
//!        ↑ overridden by
//! Field options         bind(...) applied to a field
//! ```
//!
//! Layering is **per attribute**. A field that only sets `prefix` still uses
//! the entity's sources and validator. Attaching options twice to the same
//! slot merges them the same way.
//!
//! # Static and instance fields
//!
//! Static fields belong to the [`Entity`]. They are resolved once, when bound,
//! and the result is stored as their value. Changing the source afterwards
//! has no effect.
//!
//! Instance fields are templates for [`Instance`]s. A tagged instance field is
//! read-only and resolves again on every [`Instance::get`], so it always
//! reflects the current source.
//!
//! Applying options to the entity re-resolves every declared static field
//! against the new base layer. [`EntityBuilder`] defers all resolution until
//! [`build()`](EntityBuilder::build), so the order in which binders are added
//! does not matter there.
//!
//! # Scopes
//!
//! [`scope()`] produces an override layer. Applying it to an entity gives an
//! independent copy with the selected static values replaced and the binding
//! options carried along:
//!
//! ```ignore
//! let staging = scope([("url", "https://staging")]).apply_to_entity(&config);
//! ```
//!
//! Any defined override counts, including `""`, `0`, and `null`.
//!
//! # Sources
//!
//! A [`Source`] is any `Fn(&str) -> Option<String>`. [`env_source`] reads the
//! process environment, [`map_source`] serves an in-memory snapshot. Tests can
//! swap the environment out entirely by passing their own sources.
//!
//! # Error handling
//!
//! Fallible operations return [`EnvbindError`]. Misconfiguration fails at
//! attachment time: a blank `key` when calling [`bind`], a `key` on
//! entity-level options when applying it. A validator error surfaces as
//! [`EnvbindError::Validation`] from whichever call triggered the resolution.
//! A missing value is never an error.

pub mod error;
pub mod source;
pub mod types;
pub mod validate;

mod binder;
mod builder;
mod entity;
mod key;
mod options;
mod resolve;
mod scope;
mod store;

#[cfg(test)]
mod fixtures;

pub use binder::{Binder, bind};
pub use builder::EntityBuilder;
pub use entity::{Entity, Instance};
pub use error::{BoxError, EnvbindError};
pub use key::derive_key;
pub use options::{BindingOptions, EffectiveOptions};
pub use resolve::bind_value;
pub use scope::{Scope, scope};
pub use source::{Source, env_source, map_source};
pub use store::OptionStore;
pub use types::{FieldScope, Target};
pub use validate::Validator;
