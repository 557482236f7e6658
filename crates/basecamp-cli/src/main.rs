//! basecamp CLI - bootstrap and develop Lando-based WordPress projects

use anyhow::{Context, Result};
use basecamp_core::config::{AppConfig, ConfigFormat, Settings};
use basecamp_core::devrunner::{self, DevMode};
use basecamp_core::installer::{InstallOptions, InstallRequest, Installer};
use basecamp_core::output;
use basecamp_core::runtime::SystemRunner;
use basecamp_core::tui::{install_cursor_guard, BootstrapArgs};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "basecamp")]
#[command(about = "Bootstrap and develop Lando-based WordPress projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate config files, start Lando, install dependencies and WordPress (default)
    Bootstrap(CliBootstrapArgs),
    /// Install and configure WordPress through WP-CLI
    Install(InstallArgs),
    /// Print the WordPress constants resolved from .env
    Config(ConfigArgs),
    /// Run workspace watchers or builds with filtered output
    Dev(DevArgs),
}

#[derive(Parser, Debug, Default)]
pub struct CliBootstrapArgs {
    /// Project name (used for the site title and the app slug)
    #[arg(long)]
    pub name: Option<String>,

    /// Admin username
    #[arg(long)]
    pub username: Option<String>,

    /// Admin email
    #[arg(long)]
    pub email: Option<String>,

    /// Admin password
    #[arg(long)]
    pub password: Option<String>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Keep an existing .env / .lando.yml without asking
    #[arg(long = "keep-existing")]
    pub keep_existing: bool,

    /// Open the admin dashboard when done
    #[arg(long)]
    pub open: bool,
}

impl From<CliBootstrapArgs> for BootstrapArgs {
    fn from(args: CliBootstrapArgs) -> Self {
        BootstrapArgs {
            root: project_root(),
            name: args.name,
            username: args.username,
            email: args.email,
            password: args.password,
            yes: args.yes,
            keep_existing: args.keep_existing,
            open: args.open,
        }
    }
}

#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Site title; the site URL is derived from it
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "admin")]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    /// WP-CLI command prefix, e.g. "wp" inside the container (default "lando wp")
    #[arg(long = "wp-command")]
    pub wp_command: Option<String>,

    /// Open the admin dashboard when done
    #[arg(long)]
    pub open: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[arg(short, long, value_enum, default_value_t = ConfigFormat::Table)]
    pub format: ConfigFormat,

    /// Show salts and passwords instead of masking them
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Parser, Debug)]
pub struct DevArgs {
    #[arg(value_enum, default_value_t = DevMode::Watch)]
    pub mode: DevMode,
}

fn project_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn install(args: InstallArgs) -> Result<()> {
    let root = project_root();
    let mut settings = Settings::load(&root)?;
    if let Some(prefix) = &args.wp_command {
        settings.apply_wp_command_override(prefix);
    }

    let runner = SystemRunner::in_dir(&root);
    let installer = Installer::new(&runner, InstallOptions::from_settings(&root, &settings));
    let summary = installer.run(&InstallRequest {
        name: args.name,
        username: args.username,
        email: args.email,
        password: args.password,
    })?;

    if args.open {
        summary.open_admin()?;
    }
    Ok(())
}

fn config(args: ConfigArgs) -> Result<()> {
    let root = project_root();
    let config = AppConfig::load(&root).context("Failed to load application config")?;
    print!("{}", config.render(args.format, args.reveal)?);
    Ok(())
}

async fn execute(args: Args) -> Result<i32> {
    match args.command {
        Some(Command::Bootstrap(bootstrap_args)) => {
            install_cursor_guard();
            basecamp_core::run(bootstrap_args.into())?;
            Ok(0)
        }
        Some(Command::Install(install_args)) => {
            install_cursor_guard();
            install(install_args)?;
            Ok(0)
        }
        Some(Command::Config(config_args)) => {
            config(config_args)?;
            Ok(0)
        }
        Some(Command::Dev(dev_args)) => {
            let root = project_root();
            let settings = Settings::load(&root)?;
            devrunner::run(&root, dev_args.mode, &settings.dev).await
        }
        None => {
            // No subcommand provided, default to bootstrap (interactive mode)
            install_cursor_guard();
            basecamp_core::run(CliBootstrapArgs::default().into())?;
            Ok(0)
        }
    }
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    let args = Args::parse();
    let code = match execute(args).await {
        Ok(code) => code,
        Err(e) => {
            output::fatal(format!("{:#}", e));
            1
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_install_defaults() {
        let args = Args::parse_from([
            "basecamp",
            "install",
            "--name",
            "My Site",
            "--email",
            "a@example.com",
            "--password",
            "pw",
        ]);
        match args.command {
            Some(Command::Install(install)) => {
                assert_eq!(install.username, "admin");
                assert!(install.wp_command.is_none());
                assert!(!install.open);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_dev_and_config() {
        let args = Args::parse_from(["basecamp", "dev", "build"]);
        assert!(matches!(
            args.command,
            Some(Command::Dev(DevArgs { mode: DevMode::Build }))
        ));

        let args = Args::parse_from(["basecamp", "config", "--format", "json", "--reveal"]);
        assert!(matches!(
            args.command,
            Some(Command::Config(ConfigArgs {
                format: ConfigFormat::Json,
                reveal: true
            }))
        ));
    }

    #[test]
    fn test_no_subcommand_is_bootstrap() {
        let args = Args::parse_from(["basecamp"]);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_install_requires_credentials() {
        assert!(Args::try_parse_from(["basecamp", "install", "--name", "x"]).is_err());
    }
}
