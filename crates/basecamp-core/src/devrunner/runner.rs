//! Spawns `npm-run-all` and streams its output through the filter

use super::filter::OutputFilter;
use super::workspaces::WorkspaceCatalog;
use crate::config::DevSettings;
use crate::runtime::command::CommandSpec;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Delay between workspace lines in the startup listing
const STAGGER: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DevMode {
    #[default]
    Watch,
    Build,
}

impl DevMode {
    pub fn scripts<'a>(&self, settings: &'a DevSettings) -> &'a [String] {
        match self {
            DevMode::Watch => &settings.watch_scripts,
            DevMode::Build => &settings.build_scripts,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            DevMode::Watch => "Starting watchers",
            DevMode::Build => "Building",
        }
    }
}

/// `npm-run-all --parallel --print-label --print-name <scripts...>`
pub fn npm_run_all_command(scripts: &[String]) -> CommandSpec {
    CommandSpec::new("npm-run-all")
        .args(["--parallel", "--print-label", "--print-name"])
        .args(scripts.iter().cloned())
}

/// Run the dev-runner in `root` and return the exit code to propagate
pub async fn run(root: &Path, mode: DevMode, settings: &DevSettings) -> Result<i32> {
    let catalog = WorkspaceCatalog::load(root)?;

    println!();
    println!("{}", format!("🚀 {} for {} workspace(s)", mode.verb(), catalog.len()).cyan().bold());
    println!();
    for workspace in catalog.workspaces() {
        println!("  {}", workspace.display_name());
        tokio::time::sleep(STAGGER).await;
    }
    println!();

    let cmd = npm_run_all_command(mode.scripts(settings));
    run_command(root, mode, catalog, &cmd).await
}

/// Spawn `cmd` in `root` and filter its output until it exits
pub async fn run_command(
    root: &Path,
    mode: DevMode,
    catalog: WorkspaceCatalog,
    cmd: &CommandSpec,
) -> Result<i32> {
    let mut child = TokioCommand::new(&cmd.program)
        .args(&cmd.args)
        .current_dir(root)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to start {}. Is it installed (npm install)?", cmd.program))?;

    let stdout = child.stdout.take().expect("Failed to capture stdout");
    let stderr = child.stderr.take().expect("Failed to capture stderr");

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();
    let mut filter = OutputFilter::new(catalog);
    let mut stderr_done = false;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = stdout_reader.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        for emission in filter.process(&line, Instant::now()) {
                            println!("{}", emission.render());
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        break;
                    }
                }
            }
            line = stderr_reader.next_line(), if !stderr_done => {
                match line {
                    Ok(Some(line)) => eprintln!("{}", line.red()),
                    Ok(None) => stderr_done = true,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_done = true;
                    }
                }
            }
            _ = &mut ctrl_c, if mode == DevMode::Watch => {
                let _ = child.kill().await;
                println!();
                println!("{}", "👋 Stopped watching".dimmed());
                return Ok(0);
            }
        }
    }

    while !stderr_done {
        match stderr_reader.next_line().await {
            Ok(Some(line)) => eprintln!("{}", line.red()),
            _ => stderr_done = true,
        }
    }

    let status = child
        .wait()
        .await
        .context("Failed to wait for npm-run-all")?;
    let code = status.code().unwrap_or(1);

    println!();
    if code == 0 {
        println!("{}", "✨ All tasks completed successfully".green().bold());
    } else {
        println!(
            "{}",
            format!("💥 Tasks failed (exit code {})", code).red().bold()
        );
    }

    Ok(code)
}
