//! Stateful output filter
//!
//! State is per process run: which workspaces compiled at least once, which
//! are currently errored, and when each last produced a status line.

use super::classify::{classify, workspace_label, LineKind};
use super::workspaces::WorkspaceCatalog;
use colored::Colorize;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// Minimum gap between two status lines for the same workspace
pub const DEBOUNCE: Duration = Duration::from_secs(2);

/// Something to print in response to a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    ErrorLine(String),
    WarningLine(String),
    Compiling(String),
    Ready(String),
    /// All workspaces finished their first build
    WatchingForChanges,
    Recompiled { name: String, at: String },
    Failed(String),
}

impl Emission {
    pub fn render(&self) -> String {
        match self {
            Emission::ErrorLine(line) => line.red().to_string(),
            Emission::WarningLine(line) => line.yellow().to_string(),
            Emission::Compiling(name) => format!("🔄 {} compiling...", name).cyan().to_string(),
            Emission::Ready(name) => format!("  ✅ {} ready", name).green().to_string(),
            Emission::WatchingForChanges => "\n  👁️  Watching for changes...\n".dimmed().to_string(),
            Emission::Recompiled { name, at } => format!(
                "{}\n{}",
                format!("  ✅ {} compiled successfully at {}", name, at).green(),
                "  👁️  Watching for changes...\n".dimmed()
            ),
            Emission::Failed(name) => format!("  ❌ {} compilation failed", name).red().to_string(),
        }
    }
}

pub struct OutputFilter {
    catalog: WorkspaceCatalog,
    compiled: HashSet<String>,
    errored: HashSet<String>,
    last_message: HashMap<String, Instant>,
    initial_setup: bool,
    announced_watch: bool,
}

impl OutputFilter {
    pub fn new(catalog: WorkspaceCatalog) -> Self {
        Self {
            catalog,
            compiled: HashSet::new(),
            errored: HashSet::new(),
            last_message: HashMap::new(),
            initial_setup: true,
            announced_watch: false,
        }
    }

    pub fn is_initial_setup(&self) -> bool {
        self.initial_setup
    }

    /// Process one stdout line observed at `now`
    pub fn process(&mut self, line: &str, now: Instant) -> Vec<Emission> {
        let label = workspace_label(line).map(str::to_string);

        match classify(line) {
            LineKind::Error => {
                if let Some(label) = label {
                    self.errored.insert(label);
                }
                vec![Emission::ErrorLine(line.to_string())]
            }
            LineKind::Warning => vec![Emission::WarningLine(line.to_string())],
            LineKind::Watching | LineKind::Other => Vec::new(),
            LineKind::Compiling => match label {
                Some(label) if !self.initial_setup => {
                    vec![Emission::Compiling(self.catalog.name_for_label(&label))]
                }
                _ => Vec::new(),
            },
            LineKind::Compiled => match label {
                Some(label) => self.on_compiled(label, now),
                None => Vec::new(),
            },
            LineKind::Failed => {
                let mut out = vec![Emission::ErrorLine(line.to_string())];
                if let Some(label) = label {
                    if self.debounce_elapsed(&label, now) {
                        self.last_message.insert(label.clone(), now);
                        out.push(Emission::Failed(self.catalog.name_for_label(&label)));
                    }
                }
                out
            }
        }
    }

    fn on_compiled(&mut self, label: String, now: Instant) -> Vec<Emission> {
        let name = self.catalog.name_for_label(&label);
        let had_errors = self.errored.remove(&label);
        let mut out = Vec::new();

        if !self.compiled.contains(&label) {
            self.compiled.insert(label);
            if !had_errors {
                out.push(Emission::Ready(name));
            }

            if self.initial_setup
                && !self.announced_watch
                && self.compiled.len() >= self.catalog.len()
            {
                self.announced_watch = true;
                self.initial_setup = false;
                out.push(Emission::WatchingForChanges);
            }
        } else if !self.initial_setup
            && self.announced_watch
            && !had_errors
            && self.debounce_elapsed(&label, now)
        {
            self.last_message.insert(label, now);
            out.push(Emission::Recompiled {
                name,
                at: chrono::Local::now().format("%H:%M:%S").to_string(),
            });
        }

        out
    }

    fn debounce_elapsed(&self, label: &str, now: Instant) -> bool {
        match self.last_message.get(label) {
            Some(last) => now.saturating_duration_since(*last) > DEBOUNCE,
            None => true,
        }
    }
}
