use serde_json::Value;

use crate::binder::Binder;
use crate::entity::Entity;
use crate::error::EnvbindError;
use crate::types::FieldScope;

impl Entity {
    pub fn builder(name: &str) -> EntityBuilder {
        EntityBuilder::new(name)
    }
}

/// Declarative builder for an [`Entity`].
///
/// Collects field declarations and binders, then resolves everything in
/// [`build()`](Self::build) once the full field list is known:
///
/// 1. Declare every field with its default.
/// 2. Record entity-level options, then field-level options.
/// 3. Resolve each static field exactly once: all of them when entity-level
///    options exist, only the tagged ones otherwise.
///
/// Because nothing resolves before step 3, the order of `bind` and
/// `bind_field` calls does not matter.
#[derive(Debug)]
pub struct EntityBuilder {
    name: String,
    fields: Vec<(String, FieldScope, Value)>,
    field_binders: Vec<(String, Binder)>,
    entity_binders: Vec<Binder>,
}

impl EntityBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
            field_binders: Vec::new(),
            entity_binders: Vec::new(),
        }
    }

    /// Declare a static field.
    pub fn static_field(mut self, name: &str, default: impl Into<Value>) -> Self {
        self.fields
            .push((name.to_string(), FieldScope::Static, default.into()));
        self
    }

    /// Declare an instance field.
    pub fn instance_field(mut self, name: &str, default: impl Into<Value>) -> Self {
        self.fields
            .push((name.to_string(), FieldScope::Instance, default.into()));
        self
    }

    /// Tag a field with a binder. Repeated tags on the same field merge,
    /// later attributes winning.
    pub fn bind_field(mut self, name: &str, binder: Binder) -> Self {
        self.field_binders.push((name.to_string(), binder));
        self
    }

    /// Tag the whole entity with a binder.
    pub fn bind(mut self, binder: Binder) -> Self {
        self.entity_binders.push(binder);
        self
    }

    pub fn build(self) -> Result<Entity, EnvbindError> {
        let mut entity = Entity::new(self.name);
        for (name, scope, default) in self.fields {
            entity.insert_field(name, scope, default);
        }

        for binder in &self.entity_binders {
            binder.check_entity_scope()?;
            entity.options_mut().persist(binder.options(), None);
        }

        for (field, binder) in &self.field_binders {
            let scope = entity
                .field_scope(field)
                .ok_or_else(|| EnvbindError::UnknownField(field.clone()))?;
            entity.options_mut().persist(binder.options(), Some(field.as_str()));
            if scope == FieldScope::Instance {
                entity.mark_instance_bound(field);
            }
        }

        let to_bind: Vec<String> = entity
            .fields()
            .filter(|field| entity.options().has_entity() || entity.options().has_field(field))
            .map(str::to_string)
            .collect();
        for field in &to_bind {
            entity.bind_static(field)?;
        }

        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::bind;
    use crate::fixtures::test::{prefixed_env, switchable, values};
    use crate::options::BindingOptions;
    use serde_json::json;

    fn opts() -> BindingOptions {
        BindingOptions::new().source(prefixed_env())
    }

    #[test]
    fn end_to_end_entity_prefix() {
        let config = Entity::builder("Config")
            .static_field("url", "")
            .static_field("settingUrl", "")
            .bind(bind(opts().prefix("PREFIX")).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.get("url"), Some(&json!("X")));
        assert_eq!(config.get("settingUrl"), Some(&json!("Y")));
    }

    #[test]
    fn end_to_end_validator() {
        let config = Entity::builder("Config")
            .static_field("url", "")
            .bind(
                bind(
                    opts()
                        .prefix("PREFIX")
                        .validate(|raw| Ok(json!(format!("class({raw})")))),
                )
                .unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(config.get("url"), Some(&json!("class(X)")));
    }

    #[test]
    fn mixed_field_options_under_entity_prefix() {
        let config = Entity::builder("Config")
            .bind(bind(opts().prefix("PREFIX")).unwrap())
            .static_field("url", "")
            .static_field("secretKey", "")
            .static_field("custom", "")
            .static_field("databaseUrl", "")
            .bind_field("secretKey", bind(BindingOptions::new().prefix("APP")).unwrap())
            .bind_field(
                "custom",
                bind(BindingOptions::new().key("CUSTOM_KEY_WHATEVER")).unwrap(),
            )
            .bind_field("databaseUrl", bind(BindingOptions::new().prefix("")).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.get("url"), Some(&json!("X")));
        assert_eq!(config.get("secretKey"), Some(&json!("app_secret")));
        assert_eq!(config.get("custom"), Some(&json!("custom")));
        assert_eq!(config.get("databaseUrl"), Some(&json!("pg://db")));
    }

    #[test]
    fn entity_binder_order_does_not_matter() {
        let first = Entity::builder("A")
            .static_field("url", "")
            .bind_field("url", bind(BindingOptions::new()).unwrap())
            .bind(bind(opts().prefix("PREFIX")).unwrap())
            .build()
            .unwrap();
        let last = Entity::builder("B")
            .bind(bind(opts().prefix("PREFIX")).unwrap())
            .bind_field("url", bind(BindingOptions::new()).unwrap())
            .static_field("url", "")
            .build()
            .unwrap();
        assert_eq!(first.get("url"), Some(&json!("X")));
        assert_eq!(last.get("url"), Some(&json!("X")));
    }

    #[test]
    fn untagged_statics_stay_default_without_entity_binder() {
        let config = Entity::builder("Config")
            .static_field("url", "")
            .static_field("otherUrl", "initial")
            .bind_field(
                "url",
                bind(BindingOptions::new().key("CUSTOM_URL").source(values(&[
                    ("CUSTOM_URL", "mocked_CUSTOM_URL"),
                    ("OTHER_URL", "mocked_OTHER_URL"),
                ])))
                .unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(config.get("url"), Some(&json!("mocked_CUSTOM_URL")));
        assert_eq!(config.get("otherUrl"), Some(&json!("initial")));
    }

    #[test]
    fn defaults_survive_when_nothing_resolves() {
        let config = Entity::builder("Config")
            .static_field("url", "initializedUrl")
            .static_field("settingUrl", "initializedSettingUrl")
            .bind(bind(BindingOptions::new().source(values(&[]))).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.get("url"), Some(&json!("initializedUrl")));
        assert_eq!(config.get("settingUrl"), Some(&json!("initializedSettingUrl")));
    }

    #[test]
    fn key_on_entity_fails_build() {
        let result = Entity::builder("Config")
            .static_field("url", "")
            .bind(bind(BindingOptions::new().key("CUSTOM_KEY")).unwrap())
            .build();
        assert!(matches!(result, Err(EnvbindError::KeyOptionAtEntityScope)));
    }

    #[test]
    fn bind_field_on_undeclared_fails_build() {
        let result = Entity::builder("Config")
            .bind_field("ghost", bind(BindingOptions::new()).unwrap())
            .build();
        assert!(matches!(result, Err(EnvbindError::UnknownField(f)) if f == "ghost"));
    }

    #[test]
    fn static_resolved_once_instance_every_read() {
        let (cell, source) = switchable(Some("v1"));
        let config = Entity::builder("Config")
            .static_field("staticUrl", "")
            .instance_field("instanceUrl", "")
            .bind(bind(BindingOptions::new().source(source)).unwrap())
            .bind_field("instanceUrl", bind(BindingOptions::new()).unwrap())
            .build()
            .unwrap();
        let instance = config.instantiate();
        assert_eq!(instance.get("instanceUrl").unwrap(), json!("v1"));

        *cell.lock().unwrap() = Some("v2".into());
        assert_eq!(config.get("staticUrl"), Some(&json!("v1")));
        assert_eq!(instance.get("instanceUrl").unwrap(), json!("v2"));
    }

    #[test]
    fn options_stay_out_of_field_listing() {
        let config = Entity::builder("Config")
            .static_field("url", "")
            .bind(bind(opts().prefix("PREFIX")).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.fields().collect::<Vec<_>>(), vec!["url"]);
        assert_eq!(serde_json::to_value(&config).unwrap(), json!({"url": "X"}));
    }
}
