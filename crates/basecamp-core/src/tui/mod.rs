//! Interactive bootstrap flow using cliclack
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use prompts::{run, BootstrapArgs};

/// Restore the terminal cursor and exit 130 on Ctrl+C while prompts are active
#[cfg(feature = "tui")]
pub fn install_cursor_guard() {
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();
}
