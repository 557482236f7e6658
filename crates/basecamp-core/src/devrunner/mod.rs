//! Dev-runner: a quieter, colorized front-end for `npm-run-all`
//!
//! The parallel task runner prints every line of every watcher. This module
//! keeps errors and warnings, collapses compile chatter into one status line
//! per workspace, and debounces repeats.

pub mod classify;
pub mod filter;
pub mod runner;
pub mod workspaces;

pub use classify::{classify, workspace_label, LineKind};
pub use filter::{Emission, OutputFilter, DEBOUNCE};
pub use runner::{run, DevMode};
pub use workspaces::{Workspace, WorkspaceCatalog};
