//! Service assembly from settings.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::cart::Cart;
use crate::error::{Result, ServiceError};
use crate::ids::ServiceId;
use crate::service::{Availability, ExtraFeeBuilder, FreeRange, Service, ServiceKind, Services};
use crate::settings::{node, PluginSettings, SettingsResolver};
use crate::tax::TaxClassResolver;

/// Turns the effective settings of a service type into typed services.
#[derive(Clone, Default)]
pub struct ServiceAssembler {
    tax_resolver: TaxClassResolver,
}

impl ServiceAssembler {
    /// Assembler resolving tax classes from static tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembler using a specific tax class resolver.
    pub fn with_tax_resolver(tax_resolver: TaxClassResolver) -> Self {
        Self { tax_resolver }
    }

    /// Assemble the services of a kind given by class name ("Shipping",
    /// "Payment", "Special").
    pub fn assemble_by_class_name(
        class_name: &str,
        settings: &PluginSettings,
        cart: &Cart,
    ) -> Result<Services> {
        let kind = ServiceKind::from_class_name(class_name)
            .ok_or_else(|| ServiceError::UnknownServiceClass(class_name.to_string()))?;
        Ok(Self::assemble(kind, settings, cart))
    }

    /// Assemble the services of `kind` for `cart`.
    ///
    /// Options are taken from the settings selected by
    /// [`SettingsResolver`], in configuration order. The cart is only read;
    /// installing the result is up to the caller.
    pub fn assemble(kind: ServiceKind, settings: &PluginSettings, cart: &Cart) -> Services {
        let type_settings = SettingsResolver::resolve(settings, cart, kind);
        let options = node::get(type_settings, "options");

        let mut services = Services::new();
        if !node::is_truthy(options) {
            return services;
        }

        let preset = node::scalar_text(node::get(type_settings, "preset"));

        for (key, option) in node::entries(options).unwrap_or_default() {
            if !node::is_structure(option) {
                tracing::debug!(kind = kind.settings_key(), %key, "skipping scalar service option");
                continue;
            }

            let mut service = build_service(kind, &key, option, cart);
            service.is_preset = preset.as_deref() == Some(key.as_str());
            services.insert(service);
        }

        tracing::debug!(
            kind = kind.settings_key(),
            count = services.len(),
            "assembled services"
        );
        services
    }

    /// Resolve tax classes and all service kinds onto `cart`.
    ///
    /// Tax classes are resolved for the cart's country, or the default
    /// country when the cart has none, and installed before any service is
    /// assembled so that services can reference them.
    pub fn populate_cart(&self, settings: &PluginSettings, cart: &mut Cart) {
        let country = cart
            .country()
            .map(str::to_string)
            .or_else(|| settings.default_country());

        let tax_classes = self.tax_resolver.resolve(settings, country.as_deref());
        cart.set_tax_classes(tax_classes);

        for kind in ServiceKind::ALL {
            let services = Self::assemble(kind, settings, cart);
            cart.set_services(kind, services);
        }
    }
}

fn build_service(kind: ServiceKind, key: &str, option: &Value, cart: &Cart) -> Service {
    let tax_class_id = node::text(node::get(option, "taxClassId"));
    let tax_class = cart.tax_class(&tax_class_id);
    if tax_class.is_none() {
        tracing::debug!(
            kind = kind.settings_key(),
            %key,
            tax_class_id = %tax_class_id,
            "tax class not found"
        );
    }

    let mut service = Service::new(
        kind,
        key,
        node::text(node::get(option, "title")),
        tax_class,
        node::text(node::get(option, "status")),
        node::text(node::get(option, "note")),
        cart.is_net_cart,
    );

    if kind == ServiceKind::Payment {
        let provider = node::get(option, "provider");
        if node::is_truthy(provider) {
            service.provider = node::scalar_text(provider);
        }
    }

    let built = ExtraFeeBuilder::build(
        node::get(option, "extra"),
        service.tax_class.as_ref(),
        cart.is_net_cart,
    );
    service.extra_type = built.extra_type;
    for extra in built.extras {
        service.add_extra(extra);
    }

    let free = node::get(option, "free");
    if node::is_truthy(free) {
        service.free = Some(FreeRange {
            from: optional_float(node::get(free, "from")),
            until: optional_float(node::get(free, "until")),
        });
    }

    let available = node::get(option, "available");
    if node::is_truthy(available) {
        let fall_back_id = node::get(available, "fallBackId");
        service.available = Some(Availability {
            from: optional_float(node::get(available, "from")),
            until: optional_float(node::get(available, "until")),
            fall_back_id: node::is_truthy(fall_back_id)
                .then(|| node::scalar_text(fall_back_id).map(ServiceId::new))
                .flatten(),
        });
    }

    service.additional = additional_data(node::get(option, "additional"));
    service.cart_id = Some(cart.id.clone());
    service
}

/// Bound of a range; null and the empty string leave it open.
fn optional_float(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        other => Some(node::to_float(other)),
    }
}

/// Entries of `additional` whose `value` is truthy, keyed like the entry.
fn additional_data(additional: &Value) -> BTreeMap<String, String> {
    node::entries(additional)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, entry)| {
            let value = node::get(entry, "value");
            if !node::is_truthy(value) {
                return None;
            }
            node::scalar_text(value).map(|text| (key, text))
        })
        .collect()
}
