//! Project directories and dependency installation inside the container

use super::command::CommandRunner;
use super::lando::lando_command;
use crate::error::BasecampError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Content directories WordPress and the installer expect
pub const REQUIRED_DIRECTORIES: [&str; 4] = [
    "wp-content/plugins",
    "wp-content/themes",
    "wp-content/mu-plugins",
    "wp-content/uploads",
];

/// Create missing content directories; returns the ones created
pub fn create_required_directories(root: &Path) -> Result<Vec<&'static str>> {
    let mut created = Vec::new();
    for dir in REQUIRED_DIRECTORIES {
        let path = root.join(dir);
        if !path.is_dir() {
            std::fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {}", dir))?;
            created.push(dir);
        }
    }
    Ok(created)
}

/// `lando composer install`; failure is fatal and includes composer's output
pub fn composer_install<R: CommandRunner>(runner: &R) -> Result<()> {
    let output = runner.run(&lando_command(["composer", "install"]));
    if !output.success() {
        anyhow::bail!(
            "Composer output:\n{}\n\n{}",
            output.combined(),
            BasecampError::CommandFailed {
                step: "Composer install".to_string(),
                code: output.code.unwrap_or(-1),
            }
        );
    }
    Ok(())
}

/// What happened to the NPM step; none of these are fatal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NpmOutcome {
    NoPackageJson,
    NodeUnavailable,
    InstallFailed(String),
    Installed {
        /// `None` without a `build` script, otherwise whether the build succeeded
        build: Option<bool>,
    },
}

#[derive(Debug, Default, Deserialize)]
struct PackageScripts {
    #[serde(default)]
    scripts: HashMap<String, serde_json::Value>,
}

/// Install NPM dependencies and build assets when a `package.json` exists
pub fn npm_dependencies<R: CommandRunner>(root: &Path, runner: &R) -> NpmOutcome {
    let package_json = root.join("package.json");
    if !package_json.exists() {
        return NpmOutcome::NoPackageJson;
    }

    if !runner.run(&lando_command(["node", "--version"])).success() {
        return NpmOutcome::NodeUnavailable;
    }

    let install = runner.run(&lando_command(["npm", "install"]));
    if !install.success() {
        return NpmOutcome::InstallFailed(install.combined());
    }

    if !has_build_script(&package_json) {
        return NpmOutcome::Installed { build: None };
    }

    let build = runner.run(&lando_command(["npm", "run", "build"]));
    NpmOutcome::Installed {
        build: Some(build.success()),
    }
}

fn has_build_script(package_json: &Path) -> bool {
    std::fs::read_to_string(package_json)
        .ok()
        .and_then(|content| serde_json::from_str::<PackageScripts>(&content).ok())
        .is_some_and(|pkg| pkg.scripts.contains_key("build"))
}
