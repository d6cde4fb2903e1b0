//! portfolio-i18n
//!
//! Translation lookup, locale handling and content backup for a personal
//! portfolio site.

pub mod config;
pub mod content;
pub mod context;
pub mod input;
pub mod locale;
pub mod render;
pub mod resolver;
pub mod store;

pub use context::I18n;
