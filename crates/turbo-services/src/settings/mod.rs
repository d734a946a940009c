//! Settings module.
//!
//! Contains the settings document, lenient tree accessors, zone matching
//! and the country precedence chain.

pub mod node;
mod plugin;
mod resolver;
mod zone;

pub use plugin::PluginSettings;
pub use resolver::{SettingsResolver, SettingsSource};
pub use zone::{Zone, ZoneMatcher};
