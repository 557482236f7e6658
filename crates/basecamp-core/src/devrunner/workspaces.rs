//! npm workspaces from `package.json`

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct PackageJson {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    workspaces: Option<WorkspacesField>,
}

/// `workspaces` is either a list or `{ "packages": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WorkspacesField {
    List(Vec<String>),
    Object {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl WorkspacesField {
    fn into_paths(self) -> Vec<String> {
        match self {
            WorkspacesField::List(paths) => paths,
            WorkspacesField::Object { packages } => packages,
        }
    }
}

/// One configured workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Path as written in the root `package.json`
    pub path: String,
    /// `name` from the workspace's own `package.json`, else the last path segment
    pub name: String,
    pub emoji: &'static str,
}

impl Workspace {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }

    fn last_segment(&self) -> &str {
        last_segment(&self.path)
    }
}

/// Workspaces configured for the project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceCatalog {
    workspaces: Vec<Workspace>,
}

impl WorkspaceCatalog {
    /// Read the root `package.json` and each workspace's own manifest
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join("package.json");
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let package: PackageJson = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let paths = package
            .workspaces
            .map(WorkspacesField::into_paths)
            .unwrap_or_default();

        let workspaces = paths
            .into_iter()
            .map(|path| {
                let name = workspace_package_name(&root.join(&path))
                    .unwrap_or_else(|| last_segment(&path).to_string());
                Workspace {
                    emoji: emoji_for_path(&path),
                    name,
                    path,
                }
            })
            .collect();

        Ok(Self { workspaces })
    }

    pub fn from_workspaces(workspaces: Vec<Workspace>) -> Self {
        Self { workspaces }
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    /// Human name for a task label such as `watch:my-theme`
    pub fn name_for_label(&self, label: &str) -> String {
        if let Some(workspace) = self
            .workspaces
            .iter()
            .find(|ws| label.contains(ws.last_segment()))
        {
            return workspace.name.clone();
        }

        let cleaned = match (label.find("watch:"), label.find("theme-json:")) {
            (Some(w), Some(t)) if t < w => label.replacen("theme-json:", "", 1),
            (Some(_), _) => label.replacen("watch:", "", 1),
            (None, Some(_)) => label.replacen("theme-json:", "", 1),
            (None, None) => label.to_string(),
        };
        cleaned.trim().to_string()
    }
}

/// Emoji by path pattern; themes first, then libraries, plugins, packages
pub fn emoji_for_path(path: &str) -> &'static str {
    let lower = path.to_lowercase();

    if lower.contains("themes/") || lower.contains("theme") {
        "🎨"
    } else if lower.contains("component") || lower.contains("library") {
        "📦"
    } else if lower.contains("plugins/") {
        "🔌"
    } else if lower.contains("npm_packages/") {
        "📦"
    } else {
        "📋"
    }
}

fn workspace_package_name(dir: &Path) -> Option<String> {
    let content = std::fs::read_to_string(dir.join("package.json")).ok()?;
    serde_json::from_str::<PackageJson>(&content).ok()?.name
}

fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws(path: &str, name: &str) -> Workspace {
        Workspace {
            path: path.to_string(),
            name: name.to_string(),
            emoji: emoji_for_path(path),
        }
    }

    #[test]
    fn test_emoji_patterns() {
        assert_eq!(emoji_for_path("wp-content/themes/north"), "🎨");
        assert_eq!(emoji_for_path("packages/Theme-Utils"), "🎨");
        assert_eq!(emoji_for_path("packages/component-library"), "📦");
        assert_eq!(emoji_for_path("wp-content/plugins/blocks"), "🔌");
        assert_eq!(emoji_for_path("npm_packages/utils"), "📦");
        assert_eq!(emoji_for_path("tools/scripts"), "📋");
    }

    #[test]
    fn test_name_for_label() {
        let catalog = WorkspaceCatalog::from_workspaces(vec![
            ws("wp-content/themes/north", "@builtnorth/north-theme"),
            ws("wp-content/plugins/blocks", "blocks"),
        ]);

        assert_eq!(catalog.name_for_label("watch:north"), "@builtnorth/north-theme");
        assert_eq!(catalog.name_for_label("theme-json:watch"), "watch");
        assert_eq!(catalog.name_for_label("watch:other "), "other");
        assert_eq!(catalog.name_for_label("build"), "build");
    }

    #[test]
    fn test_load_reads_workspace_names() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join("package.json"),
            r#"{"workspaces": ["wp-content/themes/north", "wp-content/plugins/blocks"]}"#,
        )
        .unwrap();
        let theme = root.path().join("wp-content/themes/north");
        std::fs::create_dir_all(&theme).unwrap();
        std::fs::write(theme.join("package.json"), r#"{"name": "north-theme"}"#).unwrap();

        let catalog = WorkspaceCatalog::load(root.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.workspaces()[0].display_name(), "🎨 north-theme");
        assert_eq!(catalog.workspaces()[1].display_name(), "🔌 blocks");
    }

    #[test]
    fn test_load_object_form_and_missing_workspaces() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join("package.json"),
            r#"{"workspaces": {"packages": ["npm_packages/utils"]}}"#,
        )
        .unwrap();
        assert_eq!(WorkspaceCatalog::load(root.path()).unwrap().len(), 1);

        std::fs::write(root.path().join("package.json"), r#"{"name": "site"}"#).unwrap();
        assert!(WorkspaceCatalog::load(root.path()).unwrap().is_empty());
    }

    #[test]
    fn test_load_requires_package_json() {
        let root = tempfile::tempdir().unwrap();
        assert!(WorkspaceCatalog::load(root.path()).is_err());
    }
}
