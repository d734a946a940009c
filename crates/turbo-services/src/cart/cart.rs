//! Cart as seen by service resolution.

use std::sync::Arc;

use crate::ids::CartId;
use crate::service::{ServiceKind, Services};
use crate::tax::{TaxClass, TaxClassTable};
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Only the fields service resolution reads or writes live here; line
/// items and totals are owned elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Shipping country code.
    pub country: Option<String>,
    /// Billing country code.
    pub billing_country: Option<String>,
    /// Whether stored prices exclude tax.
    pub is_net_cart: bool,
    /// Tax classes available to the cart.
    pub tax_classes: TaxClassTable,
    /// Assembled shipping methods.
    pub shippings: Services,
    /// Assembled payment methods.
    pub payments: Services,
    /// Assembled special services.
    pub specials: Services,
}

impl Cart {
    /// Create an empty gross cart without a country.
    pub fn new() -> Self {
        Self {
            id: CartId::generate(),
            country: None,
            billing_country: None,
            is_net_cart: false,
            tax_classes: TaxClassTable::new(),
            shippings: Services::new(),
            payments: Services::new(),
            specials: Services::new(),
        }
    }

    /// Set the shipping country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the billing country.
    pub fn with_billing_country(mut self, country: impl Into<String>) -> Self {
        self.billing_country = Some(country.into());
        self
    }

    /// Set whether the cart stores net prices.
    pub fn with_net_cart(mut self, is_net_cart: bool) -> Self {
        self.is_net_cart = is_net_cart;
        self
    }

    /// Shipping country, if set and non-empty.
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref().filter(|c| !c.is_empty())
    }

    /// Billing country, if set and non-empty.
    pub fn billing_country(&self) -> Option<&str> {
        self.billing_country.as_deref().filter(|c| !c.is_empty())
    }

    /// Get a tax class by key.
    pub fn tax_class(&self, key: &str) -> Option<Arc<TaxClass>> {
        self.tax_classes.get(key).cloned()
    }

    /// Replace the tax class table.
    pub fn set_tax_classes(&mut self, tax_classes: TaxClassTable) {
        self.tax_classes = tax_classes;
    }

    /// Services of a kind.
    pub fn services(&self, kind: ServiceKind) -> &Services {
        match kind {
            ServiceKind::Shipping => &self.shippings,
            ServiceKind::Payment => &self.payments,
            ServiceKind::Special => &self.specials,
        }
    }

    /// Replace the services of a kind.
    pub fn set_services(&mut self, kind: ServiceKind, services: Services) {
        match kind {
            ServiceKind::Shipping => self.shippings = services,
            ServiceKind::Payment => self.payments = services,
            ServiceKind::Special => self.specials = services,
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TaxClassId;
    use crate::service::Service;

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new().with_country("DE").with_net_cart(true);
        assert_eq!(cart.country(), Some("DE"));
        assert_eq!(cart.billing_country(), None);
        assert!(cart.is_net_cart);
        assert!(cart.shippings.is_empty());
    }

    #[test]
    fn test_empty_country_counts_as_unset() {
        let cart = Cart::new().with_country("").with_billing_country("");
        assert_eq!(cart.country(), None);
        assert_eq!(cart.billing_country(), None);
    }

    #[test]
    fn test_tax_class_lookup() {
        let mut cart = Cart::new();
        let mut table = TaxClassTable::new();
        table.insert(
            TaxClassId::new("1"),
            Arc::new(TaxClass::new("1", 19.0, "0.19", "normal")),
        );
        cart.set_tax_classes(table);

        assert_eq!(cart.tax_class("1").unwrap().name, "normal");
        assert!(cart.tax_class("2").is_none());
    }

    #[test]
    fn test_set_services() {
        let mut cart = Cart::new();
        let mut services = Services::new();
        services.insert(Service::new(
            ServiceKind::Payment,
            "invoice",
            "Invoice",
            None,
            "open",
            "",
            false,
        ));

        cart.set_services(ServiceKind::Payment, services);
        assert_eq!(cart.services(ServiceKind::Payment).len(), 1);
        assert!(cart.services(ServiceKind::Shipping).is_empty());
    }
}
