//! WXR content import and default content cleanup

use super::wp::WpCli;
use crate::output;
use crate::runtime::command::CommandRunner;
use regex::Regex;
use std::sync::LazyLock;
use std::path::{Path, PathBuf};

const IMPORTER_PLUGIN: &str = "wordpress-importer";

static PAGE_POST_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<wp:post_type>\s*(?:<!\[CDATA\[)?page(?:\]\]>)?\s*</wp:post_type>")
        .expect("static pattern")
});

/// Summary of the content step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentReport {
    pub found: usize,
    pub imported: usize,
    /// Importer could not be installed or activated; nothing was imported
    pub skipped: bool,
    pub removed_sample_page: bool,
}

/// Files in `dir` with the given extensions (case-insensitive), sorted
pub fn files_with_extensions(dir: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        })
        .collect();
    files.sort();
    files
}

/// Whether a WXR export contains at least one page
pub fn export_contains_pages(content: &str) -> bool {
    PAGE_POST_TYPE.is_match(content)
}

/// Import every `*.xml` in `content_dir`; paths handed to WP-CLI are relative to `root`
pub fn import_content<R: CommandRunner>(wp: &WpCli<R>, root: &Path, content_dir: &Path) -> ContentReport {
    let files = files_with_extensions(content_dir, &["xml"]);
    let mut report = ContentReport {
        found: files.len(),
        ..ContentReport::default()
    };

    if files.is_empty() {
        output::line("No content files found in setup/data/content/, keeping default content");
        return report;
    }

    output::line(format!("Found {} content file(s) to import...", files.len()));

    if !ensure_importer(wp) {
        output::warning("Skipping content import");
        report.skipped = true;
        return report;
    }

    for file in &files {
        let name = file_name(file);
        output::line(format!("Importing: {}", name));
        let relative = relative_arg(root, file);
        let import = wp.run(["import", relative.as_str(), "--authors=create"]);
        if import.success() {
            output::success(format!("Imported {}", name));
            report.imported += 1;
        } else {
            output::warning(format!(
                "Failed to import {}: {}",
                name,
                output::one_line(&import.combined())
            ));
        }
    }

    if report.imported == 0 {
        output::line("Nothing imported, keeping default content");
        return report;
    }

    output::line("Cleaning default content...");
    // Hello World post
    wp.run(["post", "delete", "1", "--force"]);

    let has_pages = files.iter().any(|file| {
        std::fs::read_to_string(file)
            .map(|content| export_contains_pages(&content))
            .unwrap_or(false)
    });
    if has_pages {
        // Sample Page
        wp.run(["post", "delete", "2", "--force"]);
        report.removed_sample_page = true;
    } else {
        output::line("Keeping default Sample Page as no pages were imported");
    }

    wp.run(["comment", "delete", "1", "--force"]);
    report
}

/// Install or activate the WordPress importer; false when that fails
fn ensure_importer<R: CommandRunner>(wp: &WpCli<R>) -> bool {
    if wp.run(["plugin", "is-installed", IMPORTER_PLUGIN]).success() {
        let activate = wp.run(["plugin", "activate", IMPORTER_PLUGIN]);
        if !activate.success() {
            output::warning(format!(
                "Failed to activate importer: {}",
                output::one_line(&activate.combined())
            ));
            return false;
        }
        return true;
    }

    let install = wp.run(["plugin", "install", IMPORTER_PLUGIN, "--activate"]);
    if !install.success() {
        output::warning(format!(
            "Failed to install importer: {}",
            output::one_line(&install.combined())
        ));
        return false;
    }
    true
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Path argument for WP-CLI; relative so it resolves the same inside the container
pub(crate) fn relative_arg(root: &Path, file: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .to_string_lossy()
        .replace('\\', "/")
}
