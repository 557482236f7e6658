//! WP-CLI invocation through a configurable command prefix

use crate::runtime::command::{CommandOutput, CommandRunner, CommandSpec};
use anyhow::{Context, Result};

/// WP-CLI reached through `prefix` (e.g. `lando wp` from the host, `wp` in the container)
pub struct WpCli<'a, R: CommandRunner> {
    runner: &'a R,
    prefix: Vec<String>,
}

impl<'a, R: CommandRunner> WpCli<'a, R> {
    pub fn new(runner: &'a R, prefix: Vec<String>) -> Self {
        Self { runner, prefix }
    }

    pub fn command<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::with_prefix(&self.prefix, args)
    }

    /// Run and capture; spawn failures come back as a failed output
    pub fn run<I, S>(&self, args: I) -> CommandOutput
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runner.run(&self.command(args))
    }

    /// Run with live output; returns the exit code
    pub fn passthrough<I, S>(&self, args: I) -> Result<Option<i32>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cmd = self.command(args);
        self.runner
            .passthrough(&cmd)
            .with_context(|| format!("Failed to run {}", cmd.program))
    }

    pub fn is_installed(&self) -> bool {
        self.run(["core", "is-installed"]).success()
    }

    pub fn option_get(&self, name: &str) -> CommandOutput {
        self.run(["option", "get", name])
    }

    pub fn option_update(&self, name: &str, value: &str) -> CommandOutput {
        self.run(["option", "update", name, value])
    }
}
