//! Scripted WordPress installation
//!
//! Drives WP-CLI through a `CommandRunner`: waits for the database, installs
//! core, then configures themes, plugins, settings, content, media and the
//! reading settings. Core install and everything before it is fatal; every
//! later step logs a warning and moves on.

pub mod configure;
pub mod content;
pub mod database;
pub mod media;
pub mod pages;
pub mod themes;
pub mod wp;

use crate::config::{DbWait, Settings};
use crate::output;
use crate::project::ProjectIdentity;
use crate::runtime::command::CommandRunner;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub use content::ContentReport;
pub use database::DbPreparation;
pub use media::MediaReport;
pub use pages::PageWiring;
pub use themes::ThemeOutcome;
pub use wp::WpCli;

/// Admin account and site title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Project-specific knobs, usually taken from `Settings`
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub root: PathBuf,
    pub wp_command: Vec<String>,
    pub domain_suffix: String,
    pub timezone: String,
    pub permalink_structure: String,
    pub default_themes: Vec<String>,
    pub db_wait: DbWait,
}

impl InstallOptions {
    pub fn from_settings(root: &Path, settings: &Settings) -> Self {
        Self {
            root: root.to_path_buf(),
            wp_command: settings.wp_command.clone(),
            domain_suffix: settings.domain_suffix.clone(),
            timezone: settings.timezone.clone(),
            permalink_structure: settings.permalink_structure.clone(),
            default_themes: settings.default_themes.clone(),
            db_wait: settings.db_wait,
        }
    }

    fn data_dir(&self, name: &str) -> PathBuf {
        self.root.join("setup").join("data").join(name)
    }
}

/// What the installer did, for the caller's final report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSummary {
    pub url: String,
    pub admin_url: String,
    pub database: DbPreparation,
    pub theme: ThemeOutcome,
    pub plugins: usize,
    pub content: ContentReport,
    pub media: MediaReport,
    pub pages: PageWiring,
    /// Final `core is-installed` check passed
    pub verified: bool,
}

impl InstallSummary {
    /// Open the admin dashboard in the default browser
    pub fn open_admin(&self) -> Result<()> {
        output::dimmed(format!("Opening {}...", self.admin_url));
        open::that(&self.admin_url)?;
        Ok(())
    }
}

pub struct Installer<'a, R: CommandRunner> {
    wp: WpCli<'a, R>,
    options: InstallOptions,
}

impl<'a, R: CommandRunner> Installer<'a, R> {
    pub fn new(runner: &'a R, options: InstallOptions) -> Self {
        Self {
            wp: WpCli::new(runner, options.wp_command.clone()),
            options,
        }
    }

    /// Run every step, sleeping between readiness polls
    pub fn run(&self, request: &InstallRequest) -> Result<InstallSummary> {
        self.run_with_sleep(request, std::thread::sleep)
    }

    pub fn run_with_sleep<S>(&self, request: &InstallRequest, sleep: S) -> Result<InstallSummary>
    where
        S: FnMut(std::time::Duration),
    {
        output::line("WordPress Setup");
        output::line("===============");
        output::line("");

        let project = ProjectIdentity::new(&request.name)?;
        let url = project.site_url(&self.options.domain_suffix);
        let admin_url = project.admin_url(&self.options.domain_suffix);

        output::heading("Installing WordPress...");
        if !self.options.root.join("wp").join("index.php").exists() {
            anyhow::bail!(
                "WordPress core files not found. Please ensure composer install has run successfully."
            );
        }

        database::wait_for_db(&self.wp, self.options.db_wait, sleep)?;
        let database = database::prepare_database(&self.wp)?;

        self.install_core(request, &url)?;
        self.verify_install(&url)?;

        output::heading("Configuring WordPress...");
        let theme = themes::setup_themes(
            &self.wp,
            &self.options.root,
            &self.options.data_dir("themes"),
            &self.options.default_themes,
        );
        let plugins = configure::activate_plugins(&self.wp);
        configure::configure_settings(
            &self.wp,
            &self.options.timezone,
            &self.options.permalink_structure,
        );

        let content =
            content::import_content(&self.wp, &self.options.root, &self.options.data_dir("content"));
        let media = media::import_media(&self.wp, &self.options.root, &self.options.data_dir("images"));
        media::assign_logo_and_icon(&self.wp, &media);
        let pages = pages::wire_pages(&self.wp);

        output::line("");
        output::success("Bootstrap complete!");
        output::line("");

        let verified = self.wp.is_installed();
        if verified {
            output::success("WordPress installation verified!");
            output::line("");
            output::line(format!("Frontend: {}", url));
            output::line(format!("Admin: {}", admin_url));
            output::line(format!("Username: {}", request.username));
            output::line(format!("Password: {}", request.password));
        } else {
            output::warning("WordPress may not be properly installed. Please check your site.");
            output::line(format!("Try visiting: {}", url));
        }

        Ok(InstallSummary {
            url,
            admin_url,
            database,
            theme,
            plugins,
            content,
            media,
            pages,
            verified,
        })
    }

    fn install_core(&self, request: &InstallRequest, url: &str) -> Result<()> {
        let args = [
            "core".to_string(),
            "install".to_string(),
            format!("--url={}", url),
            format!("--title={}", request.name),
            format!("--admin_user={}", request.username),
            format!("--admin_password={}", request.password),
            format!("--admin_email={}", request.email),
            "--skip-email".to_string(),
        ];

        output::dimmed(format!(
            "Running: {}",
            self.wp.command(args.clone()).to_string().replace(
                &format!("--admin_password={}", request.password),
                "--admin_password=********"
            )
        ));

        match self.wp.passthrough(args)? {
            Some(0) => Ok(()),
            _ => anyhow::bail!("WordPress installation failed. Please check the configuration."),
        }
    }

    fn verify_install(&self, expected_url: &str) -> Result<()> {
        output::line("Verifying installation...");
        let check = self.wp.run(["core", "is-installed"]);
        if !check.success() {
            anyhow::bail!(
                "WordPress installation verification failed: {}",
                output::one_line(&check.combined())
            );
        }

        output::success("WordPress is installed");
        output::line(format!(
            "Site URL: {}",
            self.wp.option_get("siteurl").first_line()
        ));
        output::line(format!("Home URL: {}", self.wp.option_get("home").first_line()));
        output::line(format!(
            "Table prefix: {}",
            self.wp.run(["db", "prefix"]).first_line()
        ));
        output::line(format!("Expected URL: {}", expected_url));
        Ok(())
    }
}
