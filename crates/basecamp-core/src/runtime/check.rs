//! Prerequisite detection for host CLI tools

use crate::error::BasecampError;
use anyhow::Result;
use colored::Colorize;
use semver::Version;
use std::process::Command;

/// Configuration for a host CLI tool
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "lando")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Arguments that print the tool's version
    pub version_args: &'static [&'static str],
    /// Oldest version known to work; older versions only produce a warning
    pub min_version: Option<&'static str>,
    /// Where to download the tool
    pub download_url: &'static str,
}

/// Result of checking one tool
#[derive(Debug, Clone)]
pub struct ToolStatus {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
    /// Set when the installed version is older than `min_version`
    pub warning: Option<String>,
}

/// Manager for checking host CLI tools
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Check if the tool is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        Command::new("which")
            .arg(self.config.name)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Get the installed tool version (if available)
    pub fn get_version(&self) -> Option<String> {
        Command::new(self.config.name)
            .args(self.config.version_args)
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.trim().to_string())
                } else {
                    None
                }
            })
    }

    pub fn status(&self) -> ToolStatus {
        if !self.is_installed() {
            return ToolStatus {
                name: self.config.display_name,
                version: None,
                available: false,
                warning: None,
            };
        }

        let version = self.get_version();
        let warning = match (&version, self.config.min_version) {
            (Some(installed), Some(minimum)) => check_minimum(
                self.config.display_name,
                installed,
                minimum,
                self.config.download_url,
            ),
            _ => None,
        };

        ToolStatus {
            name: self.config.display_name,
            version,
            available: true,
            warning,
        }
    }

    /// Missing-tool line, e.g. `Lando (https://lando.dev/download/)`
    pub fn missing_message(&self) -> String {
        format!("{} ({})", self.config.display_name, self.config.download_url)
    }

    /// Open the tool's download page in the default browser
    pub fn open_download_page(&self) -> Result<()> {
        println!(
            "{}",
            format!(
                "Opening {} download page in your browser...",
                self.config.display_name
            )
            .cyan()
        );
        open::that(self.config.download_url)?;
        Ok(())
    }
}

/// Pre-configured tool manager for Lando
pub fn lando_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "lando",
        display_name: "Lando",
        version_args: &["version"],
        min_version: Some("3.0.0"),
        download_url: "https://lando.dev/download/",
    })
}

/// Check every tool; fail listing all missing ones
pub fn check_prerequisites(tools: &[ToolManager]) -> Result<Vec<ToolStatus>, BasecampError> {
    let mut results = Vec::new();
    let mut missing = Vec::new();

    for tool in tools {
        let status = tool.status();
        if status.available {
            results.push(status);
        } else {
            missing.push(tool.missing_message());
        }
    }

    if !missing.is_empty() {
        return Err(BasecampError::MissingTools(missing));
    }

    Ok(results)
}

/// Parse version output such as `v3.21.2` or `3.6.0-rc.1`
pub fn parse_version(version_str: &str) -> Option<Version> {
    let token = version_str
        .split_whitespace()
        .find(|t| t.trim_start_matches('v').starts_with(|c: char| c.is_ascii_digit()))?;
    Version::parse(token.trim_start_matches('v')).ok()
}

/// Warning text when `installed` is older than `minimum`; `None` if newer or unparseable
pub fn check_minimum(
    display_name: &str,
    installed: &str,
    minimum: &str,
    download_url: &str,
) -> Option<String> {
    let installed_ver = parse_version(installed)?;
    let minimum_ver = parse_version(minimum)?;

    if installed_ver < minimum_ver {
        Some(format!(
            "{} {} is older than the supported minimum {}. Consider updating: {}",
            display_name, installed_ver, minimum_ver, download_url
        ))
    } else {
        None
    }
}
