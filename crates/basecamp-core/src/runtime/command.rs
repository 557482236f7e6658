//! Process execution behind a trait so pipeline steps can be scripted in tests

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// A program and its arguments; never passed through a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build from a prefix such as `["lando", "wp"]` followed by `args`
    pub fn with_prefix<I, S>(prefix: &[String], args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (program, rest) = match prefix.split_first() {
            Some((program, rest)) => (program.clone(), rest.to_vec()),
            None => (String::new(), Vec::new()),
        };
        let mut spec = Self::new(program);
        spec.args = rest;
        spec.args(args)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process could not be started or was killed
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// stdout followed by stderr, like `2>&1`
    pub fn combined(&self) -> String {
        match (self.stdout.trim_end(), self.stderr.trim_end()) {
            ("", err) => err.to_string(),
            (out, "") => out.to_string(),
            (out, err) => format!("{}\n{}", out, err),
        }
    }

    pub fn first_line(&self) -> &str {
        self.stdout.lines().next().unwrap_or("").trim()
    }
}

pub trait CommandRunner {
    /// Run to completion and capture both streams
    fn output(&self, cmd: &CommandSpec) -> io::Result<CommandOutput>;

    /// Run with inherited stdio so the user sees output live; returns the exit code
    fn passthrough(&self, cmd: &CommandSpec) -> io::Result<Option<i32>>;

    /// `output`, folding spawn failures into a failed `CommandOutput`
    fn run(&self, cmd: &CommandSpec) -> CommandOutput {
        self.output(cmd).unwrap_or_else(|e| CommandOutput {
            code: None,
            stdout: String::new(),
            stderr: format!("{}: {}", cmd.program, e),
        })
    }
}

/// Runs real processes, optionally from a fixed working directory
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    cwd: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(dir.into()),
        }
    }

    fn command(&self, cmd: &CommandSpec) -> Command {
        let mut command = Command::new(&cmd.program);
        command.args(&cmd.args);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        command
    }
}

impl CommandRunner for SystemRunner {
    fn output(&self, cmd: &CommandSpec) -> io::Result<CommandOutput> {
        let output = self.command(cmd).stdin(Stdio::null()).output()?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn passthrough(&self, cmd: &CommandSpec) -> io::Result<Option<i32>> {
        let status = self.command(cmd).status()?;
        Ok(status.code())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted runner: responses keyed by the rendered command line

    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    #[derive(Default)]
    pub struct ScriptedRunner {
        responses: RefCell<HashMap<String, VecDeque<CommandOutput>>>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response; the last queued response for a command repeats
        pub fn on(&self, command: &str, output: CommandOutput) -> &Self {
            self.responses
                .borrow_mut()
                .entry(command.to_string())
                .or_default()
                .push_back(output);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        pub fn called(&self, command: &str) -> bool {
            self.calls.borrow().iter().any(|c| c == command)
        }

        pub fn count(&self, command: &str) -> usize {
            self.calls.borrow().iter().filter(|c| *c == command).count()
        }

        fn respond(&self, cmd: &CommandSpec) -> CommandOutput {
            let key = cmd.to_string();
            self.calls.borrow_mut().push(key.clone());
            let mut responses = self.responses.borrow_mut();
            match responses.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
                Some(queue) => queue.front().cloned().unwrap_or_default(),
                None => CommandOutput::ok(""),
            }
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn output(&self, cmd: &CommandSpec) -> io::Result<CommandOutput> {
            Ok(self.respond(cmd))
        }

        fn passthrough(&self, cmd: &CommandSpec) -> io::Result<Option<i32>> {
            Ok(self.respond(cmd).code)
        }
    }
}
