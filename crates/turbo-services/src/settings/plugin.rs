//! Plugin settings document.

use std::path::Path;

use serde_json::Value;

use crate::error::{Result, ServiceError};
use crate::service::ServiceKind;
use crate::settings::node;

/// Root of the pricing configuration tree.
///
/// Recognized top-level keys are the service types (`shippings`,
/// `payments`, `specials`), `taxClasses`, `taxClassRepository` and
/// `settings`. Everything else is carried along untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginSettings {
    root: Value,
}

impl PluginSettings {
    /// Wrap an already parsed tree. The root must be a mapping.
    pub fn from_value(root: Value) -> Result<Self> {
        match root {
            Value::Object(_) => Ok(Self { root }),
            other => Err(ServiceError::InvalidSettings(format!(
                "expected a mapping at the root, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Parse settings from JSON.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(content)?)
    }

    /// Parse settings from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        Self::from_value(serde_json::to_value(table)?)
    }

    /// Load settings from a file: JSON for `.json`, TOML otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// The whole tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Configured fallback country (`settings.defaultCountry`).
    pub fn default_country(&self) -> Option<String> {
        node::scalar_text(node::get(node::get(&self.root, "settings"), "defaultCountry"))
            .filter(|country| !country.is_empty())
    }

    /// Type-level settings for a service kind, null when unconfigured.
    pub fn service_settings(&self, kind: ServiceKind) -> &Value {
        node::get(&self.root, kind.settings_key())
    }

    /// Static tax-class table (`taxClasses`), if it is a structure.
    pub fn tax_class_settings(&self) -> Option<&Value> {
        Some(node::get(&self.root, "taxClasses")).filter(|n| node::is_structure(n))
    }

    /// External tax-class repository directive (`taxClassRepository`),
    /// if it is a structure.
    pub fn tax_class_repository(&self) -> Option<&Value> {
        Some(node::get(&self.root, "taxClassRepository")).filter(|n| node::is_structure(n))
    }
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            root: Value::Object(serde_json::Map::new()),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_mapping_root() {
        let err = PluginSettings::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidSettings(_)));
    }

    #[test]
    fn test_default_country() {
        let settings =
            PluginSettings::from_value(json!({ "settings": { "defaultCountry": "de" } })).unwrap();
        assert_eq!(settings.default_country(), Some("de".to_string()));

        let empty =
            PluginSettings::from_value(json!({ "settings": { "defaultCountry": "" } })).unwrap();
        assert_eq!(empty.default_country(), None);
        assert_eq!(PluginSettings::default().default_country(), None);
    }

    #[test]
    fn test_from_toml_keeps_option_order() {
        let settings = PluginSettings::from_toml_str(
            r#"
            [shippings.options.express]
            title = "Express"

            [shippings.options.standard]
            title = "Standard"
            "#,
        )
        .unwrap();

        let options = node::get(settings.service_settings(ServiceKind::Shipping), "options");
        let keys: Vec<String> = node::entries(options)
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["express", "standard"]);
    }

    #[test]
    fn test_tax_sources_require_structures() {
        let settings = PluginSettings::from_value(json!({
            "taxClasses": "none",
            "taxClassRepository": { "table": "tax" }
        }))
        .unwrap();

        assert!(settings.tax_class_settings().is_none());
        assert!(settings.tax_class_repository().is_some());
    }

    #[test]
    fn test_invalid_json() {
        let err = PluginSettings::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ServiceError::Json(_)));
    }
}
