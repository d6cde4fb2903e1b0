//! Site configuration (`.portfolio-i18n.json`)
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    DEFAULT_SUPPORTED_LANGUAGES,
    I18nSettings,
    ValidationError,
};
