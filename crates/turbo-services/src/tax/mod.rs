//! Tax module.
//!
//! Contains the tax class type and its resolution from static tables or an
//! external provider.

mod resolver;
mod tax_class;

pub use resolver::{parse_from_static, TaxClassProvider, TaxClassResolver, TaxClassTable};
pub use tax_class::TaxClass;
