//! Service module.
//!
//! Contains cart services, their fee components and assembly from settings.

mod assembler;
mod extra;
mod service;

pub use assembler::ServiceAssembler;
pub use extra::{
    BuiltExtras, Extra, ExtraFeeBuilder, FeeMode, EXTRA_TYPE_KEY, SIMPLE_EXTRA_TYPE,
};
pub use service::{Availability, FreeRange, Service, ServiceKind, Services};
