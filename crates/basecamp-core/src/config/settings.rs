//! Project settings (`basecamp.yaml`)

use crate::project::DEFAULT_DOMAIN_SUFFIX;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings file name, looked up in the project root
pub const SETTINGS_FILE: &str = "basecamp.yaml";

/// Environment variable overriding `wp_command` (space-separated)
pub const WP_COMMAND_ENV: &str = "BASECAMP_WP_COMMAND";

/// Tooling settings; every field is optional in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Command prefix used to reach WP-CLI (`lando wp` on the host, `wp` in the container)
    pub wp_command: Vec<String>,

    /// Domain suffix the container runtime serves apps on
    pub domain_suffix: String,

    pub timezone: String,

    pub permalink_structure: String,

    /// Themes tried in order when the project ships none
    pub default_themes: Vec<String>,

    pub db_wait: DbWait,

    pub dev: DevSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wp_command: vec!["lando".to_string(), "wp".to_string()],
            domain_suffix: DEFAULT_DOMAIN_SUFFIX.to_string(),
            timezone: "America/New_York".to_string(),
            permalink_structure: "/%postname%/".to_string(),
            default_themes: vec![
                "twentytwentyfive".to_string(),
                "twentytwentyfour".to_string(),
                "twentytwentythree".to_string(),
            ],
            db_wait: DbWait::default(),
            dev: DevSettings::default(),
        }
    }
}

/// Database readiness polling budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbWait {
    pub attempts: u32,
    pub interval_secs: u64,
}

impl Default for DbWait {
    fn default() -> Self {
        Self {
            attempts: 60,
            interval_secs: 2,
        }
    }
}

impl DbWait {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Total time budget, used in the timeout message
    pub fn budget(&self) -> Duration {
        Duration::from_secs(self.interval_secs * u64::from(self.attempts))
    }
}

/// npm-run-all script patterns for the dev-runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevSettings {
    pub watch_scripts: Vec<String>,
    pub build_scripts: Vec<String>,
}

impl Default for DevSettings {
    fn default() -> Self {
        Self {
            watch_scripts: vec!["theme-json:watch".to_string(), "watch:*".to_string()],
            build_scripts: vec!["build:*".to_string()],
        }
    }
}

impl Settings {
    /// Load `basecamp.yaml` from the project root, falling back to defaults,
    /// then apply environment overrides
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(SETTINGS_FILE);
        let mut settings = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Self::from_yaml(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(value) = std::env::var(WP_COMMAND_ENV) {
            settings.apply_wp_command_override(&value);
        }

        Ok(settings)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Replace `wp_command` with a space-separated override; blank values are ignored
    pub fn apply_wp_command_override(&mut self, value: &str) {
        let parts: Vec<String> = value.split_whitespace().map(str::to_string).collect();
        if !parts.is_empty() {
            self.wp_command = parts;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = Settings::from_yaml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.wp_command, vec!["lando", "wp"]);
        assert_eq!(settings.db_wait.attempts, 60);
        assert_eq!(settings.db_wait.budget(), Duration::from_secs(120));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let yaml = r#"
wp_command: [wp]
timezone: Europe/Oslo
db_wait:
  attempts: 5
dev:
  build_scripts: ["build", "theme-json:build"]
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.wp_command, vec!["wp"]);
        assert_eq!(settings.timezone, "Europe/Oslo");
        assert_eq!(settings.db_wait.attempts, 5);
        assert_eq!(settings.db_wait.interval_secs, 2);
        assert_eq!(settings.dev.build_scripts, vec!["build", "theme-json:build"]);
        assert_eq!(
            settings.dev.watch_scripts,
            DevSettings::default().watch_scripts
        );
        assert_eq!(settings.permalink_structure, "/%postname%/");
    }

    #[test]
    fn test_wp_command_override() {
        let mut settings = Settings::default();
        settings.apply_wp_command_override("docker compose exec wordpress wp");
        assert_eq!(
            settings.wp_command,
            vec!["docker", "compose", "exec", "wordpress", "wp"]
        );

        settings.apply_wp_command_override("   ");
        assert_eq!(settings.wp_command.len(), 5);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.domain_suffix, "lndo.site");
    }

    #[test]
    fn test_load_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "wp_command: 12: [").unwrap();
        assert!(Settings::load(dir.path()).is_err());
    }
}
