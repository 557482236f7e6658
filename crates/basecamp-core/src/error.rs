//! Domain errors for the bootstrap pipeline

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failures that abort a bootstrap, install or config run
#[derive(Debug, Error)]
pub enum BasecampError {
    #[error("Project name results in empty string after sanitization")]
    EmptyProjectName,

    #[error("{} file not found", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Missing required tools:\n{}", format_list(.0))]
    MissingTools(Vec<String>),

    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<String>),

    #[error("Invalid DATABASE_URL '{url}': {reason}")]
    InvalidDatabaseUrl { url: String, reason: String },

    #[error(
        "Database connection timeout after {} seconds. Please check your configuration.",
        .0.as_secs()
    )]
    DatabaseTimeout(Duration),

    #[error("{step} failed (exit code {code})")]
    CommandFailed { step: String, code: i32 },
}

fn format_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tools_lists_each_tool() {
        let err = BasecampError::MissingTools(vec![
            "Lando (https://lando.dev/download/)".to_string(),
            "Git".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required tools:\n- Lando (https://lando.dev/download/)\n- Git"
        );
    }

    #[test]
    fn test_timeout_reports_seconds() {
        let err = BasecampError::DatabaseTimeout(Duration::from_secs(120));
        assert!(err.to_string().contains("after 120 seconds"));
    }
}
