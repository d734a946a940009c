//! Tax class resolution.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::ids::TaxClassId;
use crate::settings::{node, PluginSettings};
use crate::tax::TaxClass;

/// Tax classes available to a cart, keyed by tax class id.
pub type TaxClassTable = HashMap<TaxClassId, Arc<TaxClass>>;

/// External source of tax classes, consulted when the settings carry a
/// `taxClassRepository` directive.
///
/// Called synchronously; retry and timeout policy belong to the
/// implementation.
pub trait TaxClassProvider: Send + Sync {
    /// Tax-class records for a country, keyed by tax class id.
    ///
    /// Records that do not have the shape of a [`TaxClass`] are ignored.
    fn tax_classes(&self, repository_settings: &Value, country_code: Option<&str>)
        -> Map<String, Value>;
}

/// Shape a provider record must have to become a tax class.
#[derive(Debug, Deserialize)]
struct ProviderRecord {
    #[serde(default)]
    id: Option<TaxClassId>,
    value: f64,
    calc: String,
    name: String,
}

/// Builds the tax-class table for a country.
#[derive(Clone, Default)]
pub struct TaxClassResolver {
    provider: Option<Arc<dyn TaxClassProvider>>,
}

impl TaxClassResolver {
    /// Resolver reading static `taxClasses` tables only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver delegating `taxClassRepository` directives to `provider`.
    pub fn with_provider(provider: Arc<dyn TaxClassProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Tax classes for `country_code`.
    ///
    /// A `taxClassRepository` directive takes precedence over a static
    /// `taxClasses` table. Without either the table is empty.
    pub fn resolve(&self, settings: &PluginSettings, country_code: Option<&str>) -> TaxClassTable {
        if let Some(repository) = settings.tax_class_repository() {
            return self.load_from_provider(repository, country_code);
        }

        if let Some(table) = settings.tax_class_settings() {
            return parse_from_static(table, country_code);
        }

        TaxClassTable::new()
    }

    fn load_from_provider(&self, repository: &Value, country_code: Option<&str>) -> TaxClassTable {
        let Some(provider) = &self.provider else {
            tracing::debug!("tax class repository configured without a provider");
            return TaxClassTable::new();
        };

        provider
            .tax_classes(repository, country_code)
            .into_iter()
            .filter_map(|(key, record)| {
                match serde_json::from_value::<ProviderRecord>(record) {
                    Ok(record) => {
                        let id = record.id.unwrap_or_else(|| TaxClassId::new(key.clone()));
                        let tax_class = TaxClass::new(id, record.value, record.calc, record.name);
                        Some((TaxClassId::new(key), Arc::new(tax_class)))
                    }
                    Err(err) => {
                        tracing::debug!(%key, error = %err, "dropping non-conforming tax class record");
                        None
                    }
                }
            })
            .collect()
    }
}

/// Tax classes from a static table.
///
/// Uses the country's subtree when it is a non-empty structure, otherwise
/// the `fallback` subtree, otherwise the table as is.
pub fn parse_from_static(table: &Value, country_code: Option<&str>) -> TaxClassTable {
    let selected = country_code
        .filter(|code| !code.is_empty())
        .and_then(|code| node::non_empty_structure(node::get(table, code)))
        .or_else(|| node::non_empty_structure(node::get(table, "fallback")))
        .unwrap_or(table);

    node::entries(selected)
        .unwrap_or_default()
        .into_iter()
        .filter(|(_, entry)| node::is_structure(entry))
        .map(|(key, entry)| {
            let tax_class = TaxClass::new(
                key.as_str(),
                node::to_float(node::get(entry, "value")),
                node::text(node::get(entry, "calc")),
                node::text(node::get(entry, "name")),
            );
            (TaxClassId::new(key), Arc::new(tax_class))
        })
        .collect()
}
