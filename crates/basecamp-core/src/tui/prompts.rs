//! Charm-style bootstrap prompts using cliclack

use crate::config::Settings;
use crate::installer::{InstallOptions, InstallRequest, Installer};
use crate::project::{is_valid_email, ProjectIdentity};
use crate::runtime::{self, Lando, NpmOutcome, StartOutcome, SystemRunner};
use crate::templates::{self, GeneratedFile, RenderOutcome};
use anyhow::Result;
use std::path::{Path, PathBuf};

const BANNER: &str = r"
   __
  / /_  ____ _________  _________ _____ ___  ____
 / __ \/ __ `/ ___/ _ \/ ___/ __ `/ __ `__ \/ __ \
/ /_/ / /_/ (__  )  __/ /__/ /_/ / / / / / / /_/ /
\____/\__,_/____/\___/\___/\__,_/_/ /_/ /_/ .___/
                                         /_/
";

/// CLI arguments for the bootstrap command
#[derive(Debug, Clone)]
pub struct BootstrapArgs {
    /// Project root; `.env.example` and `.lando.example.yml` live here
    pub root: PathBuf,

    pub name: Option<String>,

    pub username: Option<String>,

    pub email: Option<String>,

    pub password: Option<String>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,

    /// Never overwrite an existing `.env` or `.lando.yml`
    pub keep_existing: bool,

    /// Open the admin dashboard when done
    pub open: bool,
}

impl Default for BootstrapArgs {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            name: None,
            username: None,
            email: None,
            password: None,
            yes: false,
            keep_existing: false,
            open: false,
        }
    }
}

/// Run the bootstrap flow with interactive prompts
pub fn run(args: BootstrapArgs) -> Result<()> {
    cliclack::intro("basecamp")?;

    // Step 1: Lando must be available before anything is written
    handle_prerequisites(&args)?;

    println!("{}", BANNER);

    // Step 2: Collect project and admin details
    let request = collect_request(&args)?;
    let project = ProjectIdentity::new(&request.name)?;
    cliclack::log::info(format!("Project slug: {}", project.slug))?;

    let settings = Settings::load(&args.root)?;
    let runner = SystemRunner::in_dir(&args.root);

    // Step 3: Environment and Lando config
    create_config_files(&args, &project.slug)?;

    // Step 4: Containers
    start_lando(&runner, &args.root, &project.slug)?;

    // Step 5: Directories and dependencies
    create_directories(&args.root)?;
    install_composer(&runner)?;
    install_npm(&runner, &args.root)?;

    // Step 6: WordPress itself
    cliclack::log::step("Running WordPress setup...")?;
    let installer = Installer::new(&runner, InstallOptions::from_settings(&args.root, &settings));
    let summary = installer.run(&request)?;

    if args.open {
        summary.open_admin()?;
    }

    cliclack::outro("✅ Setup completed successfully!")?;

    Ok(())
}

fn handle_prerequisites(args: &BootstrapArgs) -> Result<()> {
    let tools = [runtime::lando_tool()];

    match runtime::check_prerequisites(&tools) {
        Ok(statuses) => {
            for status in statuses {
                cliclack::log::success(format!(
                    "{} installed ({})",
                    status.name,
                    status.version.as_deref().unwrap_or("unknown")
                ))?;
                if let Some(warning) = status.warning {
                    cliclack::log::warning(warning)?;
                }
            }
            Ok(())
        }
        Err(e) => {
            if args.yes {
                return Err(e.into());
            }

            cliclack::log::error(e.to_string())?;
            let tool = &tools[0];

            let action: &str = cliclack::select("What would you like to do?")
                .item(
                    "open",
                    format!("Open download page ({})", tool.config().download_url),
                    "",
                )
                .item("cancel", "Cancel", "")
                .interact()?;

            if action == "open" {
                tool.open_download_page()?;
                cliclack::outro(format!(
                    "After installing {}, run this command again.",
                    tool.config().display_name
                ))?;
            }

            Err(e.into())
        }
    }
}

fn collect_request(args: &BootstrapArgs) -> Result<InstallRequest> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None if args.yes => anyhow::bail!("--name is required with --yes"),
        None => cliclack::input("Project Name")
            .placeholder("My Project")
            .validate(|input: &String| {
                if input.trim().is_empty() {
                    Err("Project name is required")
                } else {
                    Ok(())
                }
            })
            .interact()?,
    };

    let username = match &args.username {
        Some(username) => username.clone(),
        None if args.yes => "admin".to_string(),
        None => cliclack::input("Admin Username")
            .default_input("admin")
            .interact()?,
    };

    let email = match &args.email {
        Some(email) => email.clone(),
        None if args.yes => anyhow::bail!("--email is required with --yes"),
        None => cliclack::input("Admin Email")
            .placeholder("you@example.com")
            .validate(|input: &String| {
                if is_valid_email(input.trim()) {
                    Ok(())
                } else {
                    Err("Invalid email format. Please try again.")
                }
            })
            .interact()?,
    };

    let password = match &args.password {
        Some(password) => password.clone(),
        None if args.yes => anyhow::bail!("--password is required with --yes"),
        None => cliclack::password("Admin Password")
            .mask('▪')
            .validate(|input: &String| {
                if input.is_empty() {
                    Err("Password is required")
                } else {
                    Ok(())
                }
            })
            .interact()?,
    };

    Ok(InstallRequest {
        name: name.trim().to_string(),
        username,
        email: email.trim().to_string(),
        password,
    })
}

fn create_config_files(args: &BootstrapArgs, slug: &str) -> Result<()> {
    cliclack::log::step("Creating configuration files...")?;

    for file in [GeneratedFile::Env, GeneratedFile::Lando] {
        let outcome = templates::generate(&args.root, file, slug, |target| {
            confirm_overwrite(args, target)
        })?;

        match outcome {
            RenderOutcome::Kept(_) => {
                cliclack::log::info(format!("Keeping existing {} file", file.file_name()))?;
            }
            RenderOutcome::Written { salts, .. } if salts > 0 => {
                cliclack::log::success(format!(
                    "Created {} with {} generated salts",
                    file.file_name(),
                    salts
                ))?;
            }
            RenderOutcome::Written { .. } => {
                cliclack::log::success(format!("Created {}", file.file_name()))?;
            }
        }
    }

    Ok(())
}

fn confirm_overwrite(args: &BootstrapArgs, target: &Path) -> Result<bool> {
    if args.keep_existing {
        return Ok(false);
    }
    if args.yes {
        return Ok(true);
    }

    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.display().to_string());

    let overwrite = cliclack::confirm(format!("{} already exists. Overwrite?", name))
        .initial_value(false)
        .interact()?;
    Ok(overwrite)
}

fn start_lando(runner: &SystemRunner, root: &Path, slug: &str) -> Result<()> {
    let dir_name = root
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_default();
    let lando = Lando::new(runner, slug, &dir_name);

    let spinner = cliclack::spinner();
    spinner.start("Starting Lando...");

    match lando.start() {
        Ok(StartOutcome::AlreadyRunning) => {
            spinner.stop("Lando is already running for this project");
        }
        Ok(StartOutcome::Started(highlights)) => {
            spinner.stop("Lando started successfully");
            for line in highlights {
                println!("  {}", line);
            }
        }
        Err(e) => {
            spinner.error("Failed to start Lando");
            return Err(e.context("Failed to start Lando. Please check the error messages above."));
        }
    }

    Ok(())
}

fn create_directories(root: &Path) -> Result<()> {
    let created = runtime::create_required_directories(root)?;
    for dir in &created {
        cliclack::log::success(format!("Created {}", dir))?;
    }
    Ok(())
}

fn install_composer(runner: &SystemRunner) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Installing Composer dependencies...");

    match runtime::composer_install(runner) {
        Ok(()) => {
            spinner.stop("Composer dependencies installed");
            Ok(())
        }
        Err(e) => {
            spinner.error("Composer install failed");
            Err(e)
        }
    }
}

fn install_npm(runner: &SystemRunner, root: &Path) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking for NPM...");

    match runtime::npm_dependencies(root, runner) {
        NpmOutcome::NoPackageJson => {
            spinner.stop("No package.json found, skipping NPM setup");
        }
        NpmOutcome::NodeUnavailable => {
            spinner.stop("Node service not available");
            cliclack::log::warning(
                "You may need to:\n\
                 1. Run 'lando rebuild' to ensure the node service is started\n\
                 2. Manually run 'lando npm install' and 'lando npm run build' later",
            )?;
        }
        NpmOutcome::InstallFailed(output) => {
            spinner.stop("NPM install failed");
            cliclack::log::warning(format!(
                "You may need to run 'lando npm install' manually later.\n{}",
                crate::output::one_line(&output)
            ))?;
        }
        NpmOutcome::Installed { build: None } => {
            spinner.stop("NPM dependencies installed");
        }
        NpmOutcome::Installed { build: Some(true) } => {
            spinner.stop("NPM dependencies installed, assets built successfully");
        }
        NpmOutcome::Installed { build: Some(false) } => {
            spinner.stop("NPM dependencies installed");
            cliclack::log::warning("Build failed. You may need to run 'lando npm run build' manually.")?;
        }
    }

    Ok(())
}
