//! Rendering and writing `.env` / `.lando.yml`

use crate::error::BasecampError;
use crate::secrets;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Placeholder replaced by the project slug in every template
pub const PROJECT_PLACEHOLDER: &str = "project-name";

/// Files the bootstrap generates from their `*.example*` counterparts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedFile {
    Env,
    Lando,
}

impl GeneratedFile {
    pub fn template_name(&self) -> &'static str {
        match self {
            GeneratedFile::Env => ".env.example",
            GeneratedFile::Lando => ".lando.example.yml",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            GeneratedFile::Env => ".env",
            GeneratedFile::Lando => ".lando.yml",
        }
    }

    pub fn render(&self, template: &str, slug: &str) -> Result<(String, usize)> {
        match self {
            GeneratedFile::Env => {
                let (content, salts) = render_env(template, slug);
                Ok((content, salts.len()))
            }
            GeneratedFile::Lando => Ok((render_lando(template, slug)?, 0)),
        }
    }
}

/// Result of generating one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Target existed and the caller chose to keep it
    Kept(PathBuf),
    Written {
        path: PathBuf,
        /// Number of salts generated (always 0 for `.lando.yml`)
        salts: usize,
    },
}

/// `.env`: slug substitution, then salt generation
pub fn render_env(template: &str, slug: &str) -> (String, Vec<&'static str>) {
    let content = template.replace(PROJECT_PLACEHOLDER, slug);
    secrets::apply_salts(&content)
}

/// `.lando.yml`: slug substitution; the result must still be valid YAML
pub fn render_lando(template: &str, slug: &str) -> Result<String> {
    let content = template.replace(PROJECT_PLACEHOLDER, slug);
    serde_yaml::from_str::<serde_yaml::Value>(&content)
        .context("Rendered .lando.yml is not valid YAML")?;
    Ok(content)
}

/// Render `file` from its template in `root`.
///
/// A missing template is fatal. When the target already exists, `overwrite`
/// decides whether to replace it.
pub fn generate<F>(root: &Path, file: GeneratedFile, slug: &str, overwrite: F) -> Result<RenderOutcome>
where
    F: FnOnce(&Path) -> Result<bool>,
{
    let template_path = root.join(file.template_name());
    let target = root.join(file.file_name());

    if !template_path.exists() {
        return Err(BasecampError::TemplateNotFound(PathBuf::from(file.template_name())).into());
    }

    if target.exists() && !overwrite(&target)? {
        return Ok(RenderOutcome::Kept(target));
    }

    let template = std::fs::read_to_string(&template_path)
        .with_context(|| format!("Failed to read {}", file.template_name()))?;
    let (content, salts) = file.render(&template, slug)?;

    std::fs::write(&target, content)
        .with_context(|| format!("Failed to create {} file", file.file_name()))?;

    Ok(RenderOutcome::Written {
        path: target,
        salts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV_EXAMPLE: &str = "\
DB_NAME=wordpress
WP_HOME=https://project-name.lndo.site
AUTH_KEY=generate
SECURE_AUTH_KEY=generate
LOGGED_IN_KEY=generate
NONCE_KEY=generate
AUTH_SALT=generate
SECURE_AUTH_SALT=generate
LOGGED_IN_SALT=generate
NONCE_SALT=generate
";

    const LANDO_EXAMPLE: &str = "\
name: project-name
recipe: wordpress
config:
  webroot: .
";

    #[test]
    fn test_render_env() {
        let (content, salts) = render_env(ENV_EXAMPLE, "my-site");
        assert_eq!(salts.len(), 8);
        assert!(content.contains("WP_HOME=https://my-site.lndo.site\n"));
        assert!(!content.contains("project-name"));
        assert!(!content.contains("=generate"));
    }

    #[test]
    fn test_render_lando() {
        let content = render_lando(LANDO_EXAMPLE, "my-site").unwrap();
        assert!(content.starts_with("name: my-site\n"));
    }

    #[test]
    fn test_render_lando_rejects_invalid_yaml() {
        assert!(render_lando("name: [project-name", "x").is_err());
    }

    #[test]
    fn test_generate_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate(dir.path(), GeneratedFile::Env, "x", |_| Ok(true)).unwrap_err();
        assert_eq!(err.to_string(), ".env.example file not found");
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env.example"), ENV_EXAMPLE).unwrap();

        let outcome = generate(dir.path(), GeneratedFile::Env, "my-site", |_| {
            panic!("no existing file to ask about")
        })
        .unwrap();

        assert_eq!(
            outcome,
            RenderOutcome::Written {
                path: dir.path().join(".env"),
                salts: 8
            }
        );
        let written = std::fs::read_to_string(dir.path().join(".env")).unwrap();
        assert!(written.contains("my-site"));
    }

    #[test]
    fn test_generate_keeps_existing_when_declined() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".lando.example.yml"), LANDO_EXAMPLE).unwrap();
        std::fs::write(dir.path().join(".lando.yml"), "name: keep-me\n").unwrap();

        let outcome = generate(dir.path(), GeneratedFile::Lando, "my-site", |_| Ok(false)).unwrap();
        assert!(matches!(outcome, RenderOutcome::Kept(_)));
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".lando.yml")).unwrap(),
            "name: keep-me\n"
        );

        let outcome = generate(dir.path(), GeneratedFile::Lando, "my-site", |_| Ok(true)).unwrap();
        assert!(matches!(outcome, RenderOutcome::Written { salts: 0, .. }));
        assert!(std::fs::read_to_string(dir.path().join(".lando.yml"))
            .unwrap()
            .contains("name: my-site"));
    }
}
