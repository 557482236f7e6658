//! Configuration
//!
//! - `settings`: project-level `basecamp.yaml` driving the tooling itself
//! - `application`: WordPress runtime constants resolved from `.env` files

pub mod application;
pub mod settings;

pub use application::{AppConfig, ConfigFormat, ConstValue};
pub use settings::{DbWait, DevSettings, Settings, SETTINGS_FILE, WP_COMMAND_ENV};
