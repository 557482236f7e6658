//! Per-line classification of task runner output

/// Category of a task runner output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Error,
    Warning,
    /// "watching for changes" chatter
    Watching,
    Compiling,
    Compiled,
    Failed,
    Other,
}

/// Classify one line; checks run in a fixed order and the first match wins
pub fn classify(line: &str) -> LineKind {
    let lower = line.to_lowercase();

    if lower.contains("error") && !lower.contains("compiled") {
        LineKind::Error
    } else if lower.contains("warning") {
        LineKind::Warning
    } else if lower.contains("watching") && lower.contains("changes") {
        LineKind::Watching
    } else if lower.contains("compiling") || lower.contains("rebuilding") {
        LineKind::Compiling
    } else if lower.contains("webpack") && lower.contains("compiled successfully") {
        LineKind::Compiled
    } else if lower.contains("failed") {
        LineKind::Failed
    } else {
        LineKind::Other
    }
}

/// The first `[...]` group, which `npm-run-all --print-label` uses for the task name
pub fn workspace_label(line: &str) -> Option<&str> {
    let start = line.find('[')?;
    let rest = &line[start + 1..];
    let end = rest.find(']')?;
    Some(&rest[..end])
}
