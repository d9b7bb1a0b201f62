//! Core field resolution: compute one field's effective value.
//!
//! Operates on an [`OptionStore`] and the field's current value, with no
//! knowledge of how the field was declared. Steps:
//!
//! 1. Layer the field's options over the entity's options, fill defaults
//! 2. Use the explicit `key`, or derive one from the field name and `prefix`
//! 3. Query the sources in order, first value wins
//! 4. Run the validator on a found value
//! 5. Otherwise keep the current value unchanged

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::EnvbindError;
use crate::source;
use crate::store::OptionStore;

/// Resolve `field` against the options in `store`, falling back to `current`.
///
/// A validator error is returned as [`EnvbindError::Validation`]; a miss in
/// every source is not an error.
pub fn bind_value(
    store: &OptionStore,
    field: &str,
    current: &Value,
) -> Result<Value, EnvbindError> {
    let effective = store.retrieve(Some(field)).into_effective();
    let key = effective.lookup_key(field);

    let Some(raw) = source::resolve(&effective.sources, &key) else {
        trace!(field, %key, "no source value, keeping current");
        return Ok(current.clone());
    };

    debug!(field, %key, "resolved from source");
    (effective.validate)(raw).map_err(|source| EnvbindError::Validation {
        field: field.to_string(),
        key,
        source,
    })
}
