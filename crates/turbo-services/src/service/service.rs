//! Cart service types.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ids::{CartId, ServiceId};
use crate::service::Extra;
use crate::tax::TaxClass;

/// Kind of purchasable cart service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    /// Shipping method.
    Shipping,
    /// Payment method.
    Payment,
    /// Additional cart-level service (e.g. gift wrapping).
    Special,
}

impl ServiceKind {
    /// All kinds, in the order a cart is populated.
    pub const ALL: [ServiceKind; 3] = [Self::Shipping, Self::Payment, Self::Special];

    /// Parse a service class name (e.g. "Payment").
    pub fn from_class_name(name: &str) -> Option<Self> {
        match name {
            "Shipping" => Some(Self::Shipping),
            "Payment" => Some(Self::Payment),
            "Special" => Some(Self::Special),
            _ => None,
        }
    }

    /// Service class name (e.g. "Payment").
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Shipping => "Shipping",
            Self::Payment => "Payment",
            Self::Special => "Special",
        }
    }

    /// Key of the type's settings: lower-cased plural of the class name.
    pub fn settings_key(&self) -> &'static str {
        match self {
            Self::Shipping => "shippings",
            Self::Payment => "payments",
            Self::Special => "specials",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

/// Cart gross range in which a service is free of charge.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FreeRange {
    /// Lower bound (inclusive).
    pub from: Option<f64>,
    /// Upper bound (inclusive).
    pub until: Option<f64>,
}

/// Cart gross range in which a service may be selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Availability {
    /// Lower bound (inclusive).
    pub from: Option<f64>,
    /// Upper bound (inclusive).
    pub until: Option<f64>,
    /// Service to switch to when this one is unavailable.
    pub fall_back_id: Option<ServiceId>,
}

/// A shipping, payment or special service offered to a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    /// Service kind.
    pub kind: ServiceKind,
    /// Option key from the settings.
    pub id: ServiceId,
    /// Display title.
    pub title: String,
    /// Tax class, shared with the cart's tax class table.
    pub tax_class: Option<Arc<TaxClass>>,
    /// Status (e.g. "open").
    pub status: String,
    /// Free-form note.
    pub note: String,
    /// Whether the owning cart stores net prices.
    pub is_net_cart: bool,
    /// Fee computation tag (e.g. "simple", "by_price", "0").
    pub extra_type: Option<String>,
    /// Fee components.
    pub extras: Vec<Extra>,
    /// Payment provider (payments only).
    pub provider: Option<String>,
    /// Selected by default.
    pub is_preset: bool,
    /// Free-of-charge range.
    pub free: Option<FreeRange>,
    /// Availability range.
    pub available: Option<Availability>,
    /// Additional key/value data.
    pub additional: BTreeMap<String, String>,
    /// Owning cart.
    pub cart_id: Option<CartId>,
}

impl Service {
    /// Create a new service without fees.
    pub fn new(
        kind: ServiceKind,
        id: impl Into<ServiceId>,
        title: impl Into<String>,
        tax_class: Option<Arc<TaxClass>>,
        status: impl Into<String>,
        note: impl Into<String>,
        is_net_cart: bool,
    ) -> Self {
        Self {
            kind,
            id: id.into(),
            title: title.into(),
            tax_class,
            status: status.into(),
            note: note.into(),
            is_net_cart,
            extra_type: None,
            extras: Vec::new(),
            provider: None,
            is_preset: false,
            free: None,
            available: None,
            additional: BTreeMap::new(),
            cart_id: None,
        }
    }

    /// Add a fee component.
    pub fn add_extra(&mut self, extra: Extra) {
        self.extras.push(extra);
    }

    /// Whether the service is free for the given cart gross.
    ///
    /// Requires a free range with a lower bound.
    pub fn is_free_for(&self, amount: f64) -> bool {
        match &self.free {
            Some(FreeRange {
                from: Some(from),
                until,
            }) => *from <= amount && until.map_or(true, |until| amount <= until),
            _ => false,
        }
    }

    /// Whether the service may be selected for the given cart gross.
    ///
    /// Services without an availability range are always available.
    pub fn is_available_for(&self, amount: f64) -> bool {
        match &self.available {
            Some(available) => {
                available.from.map_or(true, |from| from <= amount)
                    && available.until.map_or(true, |until| amount <= until)
            }
            None => true,
        }
    }

    /// Service to fall back to when this one is unavailable.
    pub fn fallback(&self) -> Option<&ServiceId> {
        self.available.as_ref().and_then(|a| a.fall_back_id.as_ref())
    }
}

/// Services of one kind, in configuration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Services {
    items: Vec<Service>,
}

impl Services {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a service. A service with the same id is replaced in place.
    pub fn insert(&mut self, service: Service) {
        match self.items.iter_mut().find(|s| s.id == service.id) {
            Some(existing) => *existing = service,
            None => self.items.push(service),
        }
    }

    /// Look up a service by id.
    pub fn get(&self, id: &str) -> Option<&Service> {
        self.items.iter().find(|s| s.id.as_str() == id)
    }

    /// The preset service, if any.
    pub fn preset(&self) -> Option<&Service> {
        self.items.iter().find(|s| s.is_preset)
    }

    /// Service ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &ServiceId> {
        self.items.iter().map(|s| &s.id)
    }

    /// Iterate over services in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Service> {
        self.items.iter()
    }

    /// Number of services.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Services {
    type Item = &'a Service;
    type IntoIter = std::slice::Iter<'a, Service>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
