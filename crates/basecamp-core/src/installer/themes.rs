//! Theme discovery, copying and activation

use super::wp::WpCli;
use crate::output;
use crate::runtime::command::CommandRunner;
use anyhow::{Context, Result};
use regex::Regex;
use std::sync::LazyLock;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

static THEME_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"themes?/").expect("static pattern"));

/// Which theme ended up active, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeOutcome {
    /// A bundled default theme was installed from wordpress.org
    InstalledDefault(String),
    Activated(String),
    /// Activation or default install failed; a warning was printed
    NoneActive,
}

#[derive(Debug, Default, Deserialize)]
struct ComposerManifest {
    #[serde(default)]
    require: BTreeMap<String, serde_json::Value>,
    #[serde(default, rename = "require-dev")]
    require_dev: BTreeMap<String, serde_json::Value>,
}

/// First composer package that looks like a theme, if any
pub fn composer_theme_package(composer_json: &str) -> Option<String> {
    let manifest: ComposerManifest = serde_json::from_str(composer_json).ok()?;
    manifest
        .require
        .keys()
        .chain(manifest.require_dev.keys())
        .find(|package| {
            package.contains("/theme")
                || package.contains("wp-content/themes/")
                || THEME_PACKAGE.is_match(package)
        })
        .cloned()
}

/// Immediate subdirectories of `dir`, sorted by name; empty when `dir` is missing
pub fn theme_directories(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}

/// Recursively copy `source` into `dest`
pub fn copy_dir(source: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(source) {
        let entry = entry.with_context(|| format!("Failed to read {}", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .context("Walked outside the source directory")?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            std::fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Install/copy themes and make sure one is active
pub fn setup_themes<R: CommandRunner>(
    wp: &WpCli<R>,
    root: &Path,
    source_dir: &Path,
    default_themes: &[String],
) -> ThemeOutcome {
    output::line("Checking for themes...");

    let composer_theme = std::fs::read_to_string(root.join("composer.json"))
        .ok()
        .and_then(|content| composer_theme_package(&content));
    if let Some(package) = &composer_theme {
        output::line(format!("Found theme package in composer.json: {}", package));
    }

    let to_copy = theme_directories(source_dir);
    if !to_copy.is_empty() {
        output::line(format!(
            "Found {} theme(s) in setup/data/themes/",
            to_copy.len()
        ));
    }

    let themes_dir = root.join("wp-content").join("themes");
    for theme_path in &to_copy {
        let name = dir_name(theme_path);
        output::line(format!("Copying theme: {}", name));
        match copy_dir(theme_path, &themes_dir.join(&name)) {
            Ok(_) => output::success(format!("Copied theme: {}", name)),
            Err(e) => output::warning(format!("Failed to copy theme {}: {:#}", name, e)),
        }
    }

    let available = theme_directories(&themes_dir);

    if composer_theme.is_none() && to_copy.is_empty() && available.is_empty() {
        output::line("No themes found, installing default theme...");
        return install_default_theme(wp, default_themes);
    }

    output::line(format!(
        "Found {} theme(s) in wp-content/themes/",
        available.len()
    ));

    let Some(first) = available.first() else {
        return ThemeOutcome::NoneActive;
    };
    let name = dir_name(first);
    let activate = wp.run(["theme", "activate", name.as_str()]);
    if activate.success() {
        output::success(format!("Activated theme: {}", name));
        ThemeOutcome::Activated(name)
    } else {
        output::warning(format!(
            "Failed to activate theme {}: {}",
            name,
            output::one_line(&activate.combined())
        ));
        ThemeOutcome::NoneActive
    }
}

fn install_default_theme<R: CommandRunner>(wp: &WpCli<R>, candidates: &[String]) -> ThemeOutcome {
    for theme in candidates {
        if wp
            .run(["theme", "install", theme.as_str(), "--activate"])
            .success()
        {
            output::success(format!("Theme {} installed and activated", theme));
            return ThemeOutcome::InstalledDefault(theme.clone());
        }
    }

    output::warning("Could not install any default theme. You may need to install one manually.");
    ThemeOutcome::NoneActive
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::command::testing::ScriptedRunner;
    use crate::runtime::command::CommandOutput;

    fn defaults() -> Vec<String> {
        vec!["twentytwentyfive".into(), "twentytwentyfour".into()]
    }

    #[test]
    fn test_composer_theme_detection() {
        let json = r#"{"require": {"php": ">=8.1", "builtnorth/theme-base": "^1.0"}}"#;
        assert_eq!(
            composer_theme_package(json),
            Some("builtnorth/theme-base".to_string())
        );

        let json = r#"{"require-dev": {"wpackagist-theme/twentytwentyfive": "*"}}"#;
        assert_eq!(
            composer_theme_package(json),
            Some("wpackagist-theme/twentytwentyfive".to_string())
        );

        let json = r#"{"require": {"roots/wordpress": "^6.5", "wpackagist-plugin/akismet": "*"}}"#;
        assert_eq!(composer_theme_package(json), None);
        assert_eq!(composer_theme_package("not json"), None);
    }

    #[test]
    fn test_copy_dir_recursive() {
        let src = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(src.path().join("parts")).unwrap();
        std::fs::write(src.path().join("style.css"), "/* Theme Name: X */").unwrap();
        std::fs::write(src.path().join("parts/header.html"), "<header/>").unwrap();

        let dest = tempfile::tempdir().unwrap();
        let target = dest.path().join("x");
        assert_eq!(copy_dir(src.path(), &target).unwrap(), 2);
        assert!(target.join("parts/header.html").is_file());
    }

    #[test]
    fn test_installs_default_when_no_themes() {
        let root = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new();
        runner.on(
            "wp theme install twentytwentyfive --activate",
            CommandOutput::failed(1, "offline"),
        );
        let wp = WpCli::new(&runner, vec!["wp".into()]);

        let outcome = setup_themes(&wp, root.path(), &root.path().join("setup/data/themes"), &defaults());
        assert_eq!(
            outcome,
            ThemeOutcome::InstalledDefault("twentytwentyfour".to_string())
        );
    }

    #[test]
    fn test_no_default_theme_available() {
        let root = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new();
        for theme in defaults() {
            runner.on(
                &format!("wp theme install {} --activate", theme),
                CommandOutput::failed(1, "offline"),
            );
        }
        let wp = WpCli::new(&runner, vec!["wp".into()]);

        let outcome = setup_themes(&wp, root.path(), &root.path().join("missing"), &defaults());
        assert_eq!(outcome, ThemeOutcome::NoneActive);
    }

    #[test]
    fn test_copies_bundled_themes_and_activates_first() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("setup/data/themes");
        std::fs::create_dir_all(source.join("zeta")).unwrap();
        std::fs::create_dir_all(source.join("alpha")).unwrap();
        std::fs::write(source.join("alpha/style.css"), "").unwrap();
        std::fs::create_dir_all(root.path().join("wp-content/themes")).unwrap();

        let runner = ScriptedRunner::new();
        let wp = WpCli::new(&runner, vec!["wp".into()]);

        let outcome = setup_themes(&wp, root.path(), &source, &defaults());
        assert_eq!(outcome, ThemeOutcome::Activated("alpha".to_string()));
        assert!(root.path().join("wp-content/themes/alpha/style.css").is_file());
        assert!(root.path().join("wp-content/themes/zeta").is_dir());
        assert!(!runner.calls().iter().any(|c| c.contains("theme install")));
    }

    #[test]
    fn test_composer_theme_skips_default_install() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join("composer.json"),
            r#"{"require": {"acme/theme": "^2"}}"#,
        )
        .unwrap();
        let runner = ScriptedRunner::new();
        let wp = WpCli::new(&runner, vec!["wp".into()]);

        let outcome = setup_themes(&wp, root.path(), &root.path().join("none"), &defaults());
        assert_eq!(outcome, ThemeOutcome::NoneActive);
        assert!(runner.calls().is_empty());
    }
}
