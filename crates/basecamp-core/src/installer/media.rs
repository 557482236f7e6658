//! Media library import and site logo/icon assignment

use super::content::{file_name, files_with_extensions, relative_arg};
use super::wp::WpCli;
use crate::output;
use crate::runtime::command::CommandRunner;
use std::path::Path;

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// What an imported image is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaRole {
    Logo,
    Icon,
    Plain,
}

/// The first file named like a logo becomes the logo, the first named like an
/// icon (and not already claimed as logo) becomes the icon
pub fn media_role(filename: &str, have_logo: bool, have_icon: bool) -> MediaRole {
    let lower = filename.to_lowercase();
    if lower.contains("logo") && !have_logo {
        MediaRole::Logo
    } else if lower.contains("icon") && !have_icon {
        MediaRole::Icon
    } else {
        MediaRole::Plain
    }
}

/// Attachment ids assigned a role during import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaReport {
    pub imported: usize,
    pub logo_id: Option<String>,
    pub icon_id: Option<String>,
}

/// Import images from `images_dir` into the media library
pub fn import_media<R: CommandRunner>(wp: &WpCli<R>, root: &Path, images_dir: &Path) -> MediaReport {
    let mut report = MediaReport::default();

    if !images_dir.is_dir() {
        output::line("No images directory found at setup/data/images/");
        return report;
    }

    let files = files_with_extensions(images_dir, &IMAGE_EXTENSIONS);
    if files.is_empty() {
        output::line("No media files found in setup/data/images/");
        return report;
    }

    output::line(format!("Importing {} media file(s)...", files.len()));

    for file in &files {
        let name = file_name(file);
        let relative = relative_arg(root, file);
        let import = wp.run(["media", "import", relative.as_str(), "--porcelain"]);
        if !import.success() {
            output::warning(format!(
                "Failed to import media {}: {}",
                name,
                output::one_line(&import.combined())
            ));
            continue;
        }

        let id = import.first_line().to_string();
        report.imported += 1;

        match media_role(&name, report.logo_id.is_some(), report.icon_id.is_some()) {
            MediaRole::Logo => {
                output::success(format!("Imported {} as site logo (ID: {})", name, id));
                report.logo_id = Some(id);
            }
            MediaRole::Icon => {
                output::success(format!("Imported {} as site icon (ID: {})", name, id));
                report.icon_id = Some(id);
            }
            MediaRole::Plain => output::success(format!("Imported {} (ID: {})", name, id)),
        }
    }

    report
}

/// Point `site_logo` / `site_icon` at the imported attachments
pub fn assign_logo_and_icon<R: CommandRunner>(wp: &WpCli<R>, report: &MediaReport) {
    if report.logo_id.is_none() && report.icon_id.is_none() {
        return;
    }

    output::line("Setting site logo and icon...");

    for (option, id, label) in [
        ("site_logo", &report.logo_id, "site logo"),
        ("site_icon", &report.icon_id, "site icon"),
    ] {
        let Some(id) = id else { continue };
        let update = wp.option_update(option, id);
        if update.success() {
            output::success(format!("Set {}", label));
        } else {
            output::warning(format!(
                "Failed to set {}: {}",
                label,
                output::one_line(&update.combined())
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::command::testing::ScriptedRunner;
    use crate::runtime::command::CommandOutput;

    #[test]
    fn test_media_roles() {
        assert_eq!(media_role("Logo.png", false, false), MediaRole::Logo);
        assert_eq!(media_role("logo-dark.png", true, false), MediaRole::Plain);
        assert_eq!(media_role("favicon.png", true, false), MediaRole::Icon);
        assert_eq!(media_role("logo-icon.png", true, false), MediaRole::Icon);
        assert_eq!(media_role("icon.png", false, true), MediaRole::Plain);
        assert_eq!(media_role("hero.jpg", false, false), MediaRole::Plain);
    }

    #[test]
    fn test_missing_images_dir() {
        let root = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new();
        let wp = WpCli::new(&runner, vec!["wp".into()]);
        let report = import_media(&wp, root.path(), &root.path().join("setup/data/images"));
        assert_eq!(report, MediaReport::default());
    }

    #[test]
    fn test_imports_and_assigns_roles() {
        let root = tempfile::tempdir().unwrap();
        let images = root.path().join("setup/data/images");
        std::fs::create_dir_all(&images).unwrap();
        for name in ["a-logo.png", "b-icon.png", "c-hero.jpg", "d-broken.gif", "notes.txt"] {
            std::fs::write(images.join(name), "").unwrap();
        }

        let runner = ScriptedRunner::new();
        runner.on(
            "wp media import setup/data/images/a-logo.png --porcelain",
            CommandOutput::ok("11\n"),
        );
        runner.on(
            "wp media import setup/data/images/b-icon.png --porcelain",
            CommandOutput::ok("12\n"),
        );
        runner.on(
            "wp media import setup/data/images/c-hero.jpg --porcelain",
            CommandOutput::ok("13\n"),
        );
        runner.on(
            "wp media import setup/data/images/d-broken.gif --porcelain",
            CommandOutput::failed(1, "unsupported"),
        );
        let wp = WpCli::new(&runner, vec!["wp".into()]);

        let report = import_media(&wp, root.path(), &images);
        assert_eq!(report.imported, 3);
        assert_eq!(report.logo_id.as_deref(), Some("11"));
        assert_eq!(report.icon_id.as_deref(), Some("12"));

        assign_logo_and_icon(&wp, &report);
        assert!(runner.called("wp option update site_logo 11"));
        assert!(runner.called("wp option update site_icon 12"));
    }

    #[test]
    fn test_assign_skips_without_ids() {
        let runner = ScriptedRunner::new();
        let wp = WpCli::new(&runner, vec!["wp".into()]);
        assign_logo_and_icon(&wp, &MediaReport::default());
        assert!(runner.calls().is_empty());
    }
}
