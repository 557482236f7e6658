//! Basecamp Core - bootstrap and development tooling for Lando-based WordPress projects
//!
//! The library holds every behaviour of the `basecamp` binary so it can be
//! driven from the interactive flow, from a non-interactive install inside a
//! container, or from tests with a scripted command runner.
//!
//! # Architecture
//!
//! - **Project setup** - `project`, `secrets`, `templates`: slug, salts, generated `.env` / `.lando.yml`
//! - **Runtime** - `runtime`: prerequisite checks, Lando lifecycle, dependency installs
//! - **Installer** - `installer`: scripted WordPress install through WP-CLI
//! - **Config** - `config`: `basecamp.yaml` settings and WordPress constants from `.env`
//! - **Dev-runner** - `devrunner`: filtered output for parallel npm watchers
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based bootstrap prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use basecamp_core::config::Settings;
//! use basecamp_core::installer::{InstallOptions, InstallRequest, Installer};
//! use basecamp_core::runtime::SystemRunner;
//!
//! let root = std::env::current_dir()?;
//! let settings = Settings::load(&root)?;
//! let runner = SystemRunner::in_dir(&root);
//! let installer = Installer::new(&runner, InstallOptions::from_settings(&root, &settings));
//! installer.run(&InstallRequest { /* ... */ })?;
//! ```

pub mod config;
pub mod devrunner;
pub mod error;
pub mod installer;
pub mod output;
pub mod project;
pub mod runtime;
pub mod secrets;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{AppConfig, ConfigFormat, Settings};
pub use error::BasecampError;
pub use installer::{InstallOptions, InstallRequest, InstallSummary, Installer};
pub use project::{sanitize_project_name, ProjectIdentity};
pub use runtime::{CommandRunner, SystemRunner};

#[cfg(feature = "tui")]
pub use tui::run;
