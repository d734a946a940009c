//! Country-specific service settings.

use serde_json::Value;

use crate::cart::Cart;
use crate::service::ServiceKind;
use crate::settings::node;
use crate::settings::zone::ZoneMatcher;
use crate::settings::PluginSettings;

/// Which rung of the precedence chain produced the effective settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSource {
    /// `<type>.countries.<cc>`.
    Country,
    /// First zone listing the cart's country.
    Zone,
    /// `<type>.<cc>`, countries keyed directly under the type.
    LegacyCountry,
    /// `<type>` itself.
    TypeDefault,
}

/// Selects the effective settings subtree of a service type for a cart.
///
/// Precedence, first non-empty wins:
///
/// 1. `countries.<cc>`
/// 2. the first matching entry of `zones`
/// 3. `<cc>` directly under the type
/// 4. the type settings unchanged
///
/// Payments are selected by the billing country, everything else by the
/// shipping country. A cart without a country uses the configured default
/// country. Zones are always matched against the cart's own country.
pub struct SettingsResolver;

impl SettingsResolver {
    /// Effective settings for `kind`. Null when the type is unconfigured.
    pub fn resolve<'a>(settings: &'a PluginSettings, cart: &Cart, kind: ServiceKind) -> &'a Value {
        Self::resolve_with_source(settings, cart, kind).0
    }

    /// Effective settings together with the rung that produced them.
    pub fn resolve_with_source<'a>(
        settings: &'a PluginSettings,
        cart: &Cart,
        kind: ServiceKind,
    ) -> (&'a Value, SettingsSource) {
        let type_settings = settings.service_settings(kind);

        let Some(country) = Self::selected_country(settings, cart, kind) else {
            tracing::debug!(kind = kind.settings_key(), "no country selected, using type settings");
            return (type_settings, SettingsSource::TypeDefault);
        };

        let countries = node::get(type_settings, "countries");
        if let Some(found) = node::non_empty_structure(node::get(countries, &country)) {
            tracing::debug!(kind = kind.settings_key(), %country, "using country settings");
            return (found, SettingsSource::Country);
        }

        let zones = node::get(type_settings, "zones");
        if node::is_structure(zones) {
            if let Some(zone) = ZoneMatcher::find(zones, cart.country())
                .and_then(|zone| node::non_empty_structure(zone.settings))
            {
                tracing::debug!(kind = kind.settings_key(), %country, "using zone settings");
                return (zone, SettingsSource::Zone);
            }
        }

        if let Some(found) = node::non_empty_structure(node::get(type_settings, &country)) {
            tracing::debug!(kind = kind.settings_key(), %country, "using legacy country settings");
            return (found, SettingsSource::LegacyCountry);
        }

        tracing::debug!(kind = kind.settings_key(), %country, "using type settings");
        (type_settings, SettingsSource::TypeDefault)
    }

    /// Country driving the lookup, if any.
    pub fn selected_country(
        settings: &PluginSettings,
        cart: &Cart,
        kind: ServiceKind,
    ) -> Option<String> {
        if cart.country().is_none() {
            return settings.default_country();
        }

        let country = match kind {
            ServiceKind::Payment => cart.billing_country(),
            ServiceKind::Shipping | ServiceKind::Special => cart.country(),
        };
        country.map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(tree: Value) -> PluginSettings {
        PluginSettings::from_value(tree).unwrap()
    }

    fn cart(country: &str) -> Cart {
        Cart::new()
            .with_country(country)
            .with_billing_country(country)
    }

    fn full_chain() -> PluginSettings {
        settings(json!({
            "shippings": {
                "preset": "type",
                "countries": { "DE": { "preset": "country" } },
                "zones": [
                    { "countries": "DE, AT", "preset": "zone" },
                    { "countries": "AT, CH", "preset": "zone-2" }
                ],
                "DE": { "preset": "legacy-de" },
                "CH": { "preset": "legacy-ch" },
                "FR": { "preset": "legacy-fr" }
            }
        }))
    }

    #[test]
    fn test_country_beats_zone() {
        let plugin = full_chain();
        let (found, source) =
            SettingsResolver::resolve_with_source(&plugin, &cart("DE"), ServiceKind::Shipping);
        assert_eq!(found["preset"], "country");
        assert_eq!(source, SettingsSource::Country);
    }

    #[test]
    fn test_zone_beats_legacy() {
        let plugin = full_chain();
        let (found, source) =
            SettingsResolver::resolve_with_source(&plugin, &cart("CH"), ServiceKind::Shipping);
        assert_eq!(found["preset"], "zone-2");
        assert_eq!(source, SettingsSource::Zone);

        let found = SettingsResolver::resolve(&plugin, &cart("AT"), ServiceKind::Shipping);
        assert_eq!(found["preset"], "zone");
    }

    #[test]
    fn test_legacy_beats_type_default() {
        let plugin = full_chain();
        let (found, source) =
            SettingsResolver::resolve_with_source(&plugin, &cart("FR"), ServiceKind::Shipping);
        assert_eq!(found["preset"], "legacy-fr");
        assert_eq!(source, SettingsSource::LegacyCountry);
    }

    #[test]
    fn test_type_default() {
        let plugin = full_chain();
        let (found, source) =
            SettingsResolver::resolve_with_source(&plugin, &cart("US"), ServiceKind::Shipping);
        assert_eq!(found["preset"], "type");
        assert_eq!(source, SettingsSource::TypeDefault);
    }

    #[test]
    fn test_empty_country_settings_fall_through() {
        let plugin = settings(json!({
            "shippings": {
                "preset": "type",
                "countries": { "DE": {} },
                "zones": [{ "countries": "DE", "preset": "zone" }]
            }
        }));

        let found = SettingsResolver::resolve(&plugin, &cart("DE"), ServiceKind::Shipping);
        assert_eq!(found["preset"], "zone");
    }

    #[test]
    fn test_scalar_country_settings_fall_through() {
        let plugin = settings(json!({
            "shippings": { "preset": "type", "countries": { "DE": "off" }, "DE": "off" }
        }));

        let (found, source) =
            SettingsResolver::resolve_with_source(&plugin, &cart("DE"), ServiceKind::Shipping);
        assert_eq!(found["preset"], "type");
        assert_eq!(source, SettingsSource::TypeDefault);
    }

    #[test]
    fn test_payments_use_billing_country() {
        let plugin = settings(json!({
            "payments": {
                "countries": {
                    "DE": { "preset": "de" },
                    "AT": { "preset": "at" }
                }
            }
        }));

        let cart = Cart::new().with_country("DE").with_billing_country("AT");
        let found = SettingsResolver::resolve(&plugin, &cart, ServiceKind::Payment);
        assert_eq!(found["preset"], "at");

        let shipping_plugin =
            settings(json!({ "shippings": { "countries": { "DE": { "preset": "de" } } } }));
        let found = SettingsResolver::resolve(
            &shipping_plugin,
            &cart,
            ServiceKind::Shipping,
        );
        assert_eq!(found["preset"], "de");
    }

    #[test]
    fn test_payment_zones_match_shipping_country() {
        let plugin = settings(json!({
            "payments": {
                "preset": "type",
                "zones": [{ "countries": "DE", "preset": "zone-de" }]
            }
        }));

        let cart = Cart::new().with_country("DE").with_billing_country("AT");
        let found = SettingsResolver::resolve(&plugin, &cart, ServiceKind::Payment);
        assert_eq!(found["preset"], "zone-de");
    }

    #[test]
    fn test_payment_without_billing_country_uses_type_settings() {
        let plugin = settings(json!({
            "payments": {
                "preset": "type",
                "countries": { "DE": { "preset": "de" } }
            }
        }));

        let cart = Cart::new().with_country("DE");
        let (found, source) =
            SettingsResolver::resolve_with_source(&plugin, &cart, ServiceKind::Payment);
        assert_eq!(found["preset"], "type");
        assert_eq!(source, SettingsSource::TypeDefault);
    }

    #[test]
    fn test_cart_without_country_uses_default_country() {
        let plugin = settings(json!({
            "settings": { "defaultCountry": "AT" },
            "shippings": {
                "preset": "type",
                "countries": { "AT": { "preset": "at" } },
                "zones": [{ "countries": "AT", "preset": "zone" }]
            },
            "payments": {
                "preset": "type",
                "zones": [{ "countries": "AT", "preset": "zone" }]
            }
        }));

        let cart = Cart::new();
        let found = SettingsResolver::resolve(&plugin, &cart, ServiceKind::Shipping);
        assert_eq!(found["preset"], "at");

        // Zones only ever match the cart's own country.
        let found = SettingsResolver::resolve(&plugin, &cart, ServiceKind::Payment);
        assert_eq!(found["preset"], "type");
    }

    #[test]
    fn test_no_country_at_all_returns_type_settings() {
        let plugin = full_chain();
        let (found, source) =
            SettingsResolver::resolve_with_source(&plugin, &Cart::new(), ServiceKind::Shipping);
        assert_eq!(found, plugin.service_settings(ServiceKind::Shipping));
        assert_eq!(source, SettingsSource::TypeDefault);
    }

    #[test]
    fn test_unconfigured_type_is_null() {
        let plugin = settings(json!({}));
        let found = SettingsResolver::resolve(&plugin, &cart("DE"), ServiceKind::Special);
        assert!(found.is_null());
    }
}
