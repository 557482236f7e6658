//! Lando app lifecycle

use super::command::{CommandOutput, CommandRunner, CommandSpec};
use crate::error::BasecampError;
use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

static START_HIGHLIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(NAME|LOCATION|SERVICES|Your app is|vitals|https?://)").expect("static pattern")
});

/// What `Lando::start` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    AlreadyRunning,
    /// Started; carries the interesting lines of `lando start` output (app name, URLs)
    Started(Vec<String>),
}

/// Lando commands for one app, run from the project root
pub struct Lando<'a, R: CommandRunner> {
    runner: &'a R,
    /// Names the app may be listed under: the slug and the project directory name
    names: Vec<String>,
}

impl<'a, R: CommandRunner> Lando<'a, R> {
    pub fn new(runner: &'a R, slug: &str, dir_name: &str) -> Self {
        let mut names = vec![slug.to_string()];
        if !dir_name.is_empty() && dir_name != slug {
            names.push(dir_name.to_string());
        }
        Self { runner, names }
    }

    pub fn exec<I, S>(&self, args: I) -> CommandOutput
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runner.run(&lando_command(args))
    }

    pub fn is_running(&self) -> bool {
        let output = self.exec(["list"]);
        let names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        is_listed_running(&output.combined(), &names)
    }

    /// Start the app unless it is already running. A failed start is fatal and
    /// the error carries the full `lando start` output.
    pub fn start(&self) -> Result<StartOutcome> {
        if self.is_running() {
            return Ok(StartOutcome::AlreadyRunning);
        }

        let output = self.exec(["start"]);
        if !output.success() {
            anyhow::bail!(
                "Lando output:\n{}\n\n{}",
                output.combined(),
                BasecampError::CommandFailed {
                    step: "lando start".to_string(),
                    code: output.code.unwrap_or(-1),
                }
            );
        }

        Ok(StartOutcome::Started(start_highlights(&output.combined())))
    }
}

/// `lando <args...>`
pub fn lando_command<I, S>(args: I) -> CommandSpec
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CommandSpec::new("lando").args(args)
}

/// True when a `lando list` line names one of `names` as a whole token together
/// with `RUNNING`
pub fn is_listed_running(list_output: &str, names: &[&str]) -> bool {
    list_output.lines().any(|line| {
        let tokens: Vec<&str> = line
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_')))
            .collect();
        tokens.contains(&"RUNNING") && tokens.iter().any(|t| names.contains(t))
    })
}

/// Lines of `lando start` output worth echoing: app info and URLs
pub fn start_highlights(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| START_HIGHLIGHT.is_match(line))
        .map(str::to_string)
        .collect()
}
