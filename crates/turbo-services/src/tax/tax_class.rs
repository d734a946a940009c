//! Tax class type.

use crate::ids::TaxClassId;
use serde::{Deserialize, Serialize};

/// A named tax rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxClass {
    /// Key the tax class is referenced by.
    pub id: TaxClassId,
    /// Rate value as configured (e.g. 19 for 19 %).
    pub value: f64,
    /// Calculation mode tag (e.g. "0.19").
    pub calc: String,
    /// Display name.
    pub name: String,
}

impl TaxClass {
    /// Create a new tax class.
    pub fn new(
        id: impl Into<TaxClassId>,
        value: f64,
        calc: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            value,
            calc: calc.into(),
            name: name.into(),
        }
    }
}
