//! Service fee components.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::ExtraId;
use crate::settings::node;
use crate::tax::TaxClass;

/// Key holding the fee type inside a structured `extra` node.
pub const EXTRA_TYPE_KEY: &str = "_typoScriptNodeValue";

/// Fee type of a service with a single flat fee.
pub const SIMPLE_EXTRA_TYPE: &str = "simple";

/// A fee component of a service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Extra {
    /// Key from the settings, "0" for single-fee services.
    pub id: ExtraId,
    /// Threshold the fee applies from (weight, price, quantity, ...).
    pub value: f64,
    /// Fixed fee amount.
    pub fee_amount: f64,
    /// Fee as a percentage.
    pub fee_percentage: f64,
    /// Tax class of the owning service.
    pub tax_class: Option<Arc<TaxClass>>,
    /// Whether the owning cart stores net prices.
    pub is_net_cart: bool,
}

impl Extra {
    /// A fee component with a fixed amount.
    pub fn with_amount(
        id: impl Into<ExtraId>,
        value: f64,
        fee_amount: f64,
        tax_class: Option<Arc<TaxClass>>,
        is_net_cart: bool,
    ) -> Self {
        Self {
            id: id.into(),
            value,
            fee_amount,
            fee_percentage: 0.0,
            tax_class,
            is_net_cart,
        }
    }

    /// A fee component charging a percentage.
    pub fn with_percentage(
        id: impl Into<ExtraId>,
        fee_percentage: f64,
        tax_class: Option<Arc<TaxClass>>,
        is_net_cart: bool,
    ) -> Self {
        Self {
            id: id.into(),
            value: 0.0,
            fee_amount: 0.0,
            fee_percentage,
            tax_class,
            is_net_cart,
        }
    }

    /// A fee component that charges nothing.
    pub fn zero(tax_class: Option<Arc<TaxClass>>, is_net_cart: bool) -> Self {
        Self::with_amount("0", 0.0, 0.0, tax_class, is_net_cart)
    }
}

/// How a service's fee is computed, derived from its `extra` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeMode {
    /// Mapping of fee components plus a fee type.
    Structured,
    /// Missing, zero or non-numeric: no fee.
    Zero,
    /// A single number: percentage fee.
    Flat,
}

impl FeeMode {
    /// Mode for a raw `extra` setting. Exactly one mode applies.
    pub fn of(extra: &Value) -> Self {
        if node::is_structure(extra) {
            Self::Structured
        } else if node::to_float(extra) == 0.0 {
            Self::Zero
        } else {
            Self::Flat
        }
    }
}

/// Fee type and fee components built for one service option.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltExtras {
    /// Fee type tag.
    pub extra_type: Option<String>,
    /// Fee components, in configuration order.
    pub extras: Vec<Extra>,
}

/// Builds fee components from a service option's `extra` setting.
pub struct ExtraFeeBuilder;

impl ExtraFeeBuilder {
    /// Build the fee type and fee components for `extra`.
    ///
    /// - A mapping yields one component per entry, keyed like the entry,
    ///   with `value` and `extra` as threshold and fee amount. The
    ///   [`EXTRA_TYPE_KEY`] entry is the fee type.
    /// - A value that reads as zero yields a single zero component, and the
    ///   raw value itself becomes the fee type.
    /// - Any other number yields a single percentage component with fee
    ///   type [`SIMPLE_EXTRA_TYPE`].
    pub fn build(extra: &Value, tax_class: Option<&Arc<TaxClass>>, is_net_cart: bool) -> BuiltExtras {
        let mode = FeeMode::of(extra);
        tracing::trace!(?mode, "building service extras");

        match mode {
            FeeMode::Structured => {
                let extra_type = node::scalar_text(node::get(extra, EXTRA_TYPE_KEY));
                let extras = node::entries(extra)
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|(key, _)| key != EXTRA_TYPE_KEY)
                    .map(|(key, entry)| {
                        Extra::with_amount(
                            key,
                            node::to_float(node::get(entry, "value")),
                            node::to_float(node::get(entry, "extra")),
                            tax_class.cloned(),
                            is_net_cart,
                        )
                    })
                    .collect();

                BuiltExtras { extra_type, extras }
            }
            FeeMode::Zero => BuiltExtras {
                extra_type: node::scalar_text(extra),
                extras: vec![Extra::zero(tax_class.cloned(), is_net_cart)],
            },
            FeeMode::Flat => BuiltExtras {
                extra_type: Some(SIMPLE_EXTRA_TYPE.to_string()),
                extras: vec![Extra::with_percentage(
                    "0",
                    node::to_float(extra),
                    tax_class.cloned(),
                    is_net_cart,
                )],
            },
        }
    }
}
