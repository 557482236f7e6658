//! Container runtime and external tool management
//!
//! This module provides:
//! - A `CommandRunner` seam over process execution
//! - Prerequisite detection for CLI tools like Lando
//! - Lando lifecycle (list/start) and in-container dependency installs

pub mod check;
pub mod command;
pub mod deps;
pub mod lando;

pub use check::{check_prerequisites, lando_tool, ToolConfig, ToolManager, ToolStatus};
pub use command::{CommandOutput, CommandRunner, CommandSpec, SystemRunner};
pub use deps::{
    composer_install, create_required_directories, npm_dependencies, NpmOutcome,
    REQUIRED_DIRECTORIES,
};
pub use lando::{lando_command, Lando, StartOutcome};
