//! Per-country service and tax-class resolution for TurboCommerce carts.
//!
//! Turns a pricing configuration tree into the services a cart can offer:
//!
//! - **Settings**: Settings document, country/zone precedence chain
//! - **Tax**: Tax classes from static tables or an external provider
//! - **Service**: Shipping, payment and special services with their fees
//! - **Cart**: The cart fields resolution reads and writes
//!
//! # Example
//!
//! ```rust
//! use turbo_services::prelude::*;
//!
//! let settings = PluginSettings::from_json_str(r#"{
//!     "taxClasses": { "1": { "value": "19", "calc": "0.19", "name": "normal" } },
//!     "shippings": {
//!         "preset": "standard",
//!         "options": {
//!             "standard": { "title": "Standard", "taxClassId": "1", "extra": "4.90" }
//!         }
//!     }
//! }"#).unwrap();
//!
//! let mut cart = Cart::new().with_country("DE").with_billing_country("DE");
//! ServiceAssembler::new().populate_cart(&settings, &mut cart);
//!
//! let standard = cart.shippings.preset().unwrap();
//! assert_eq!(standard.extra_type.as_deref(), Some("simple"));
//! assert_eq!(standard.extras[0].fee_percentage, 4.9);
//! ```

pub mod cart;
pub mod error;
pub mod ids;
pub mod service;
pub mod settings;
pub mod tax;

pub use error::{Result, ServiceError};
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::Cart;
    pub use crate::error::{Result, ServiceError};
    pub use crate::ids::*;

    // Settings
    pub use crate::settings::{PluginSettings, SettingsResolver, SettingsSource, Zone, ZoneMatcher};

    // Tax
    pub use crate::tax::{TaxClass, TaxClassProvider, TaxClassResolver, TaxClassTable};

    // Services
    pub use crate::service::{
        Availability, BuiltExtras, Extra, ExtraFeeBuilder, FeeMode, FreeRange, Service,
        ServiceAssembler, ServiceKind, Services,
    };
}
