//! Database readiness and preparation

use super::wp::WpCli;
use crate::config::DbWait;
use crate::error::BasecampError;
use crate::output;
use crate::runtime::command::CommandRunner;
use anyhow::Result;
use std::time::Duration;

/// How the database was prepared for `core install`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbPreparation {
    /// WordPress was already installed; the database was reset
    Reset,
    Created,
    /// `db create` failed but the database exists and is reachable
    Existing,
}

/// Poll `wp db query "SELECT 1"` until it succeeds or the attempt budget runs out.
/// Returns the number of attempts used.
pub fn wait_for_db<R, S>(wp: &WpCli<R>, wait: DbWait, mut sleep: S) -> Result<u32>
where
    R: CommandRunner,
    S: FnMut(Duration),
{
    let max_attempts = wait.attempts.max(1);
    output::line("Waiting for database to be ready...");

    for attempt in 1..=max_attempts {
        if wp.run(["db", "query", "SELECT 1"]).success() {
            output::success("Database is ready");
            return Ok(attempt);
        }

        if attempt == 1 {
            output::line("Database service is starting up...");
        } else if attempt % 10 == 0 {
            output::line(format!(
                "Still waiting... (attempt {}/{})",
                attempt, max_attempts
            ));
        }

        if attempt < max_attempts {
            sleep(wait.interval());
        }
    }

    Err(BasecampError::DatabaseTimeout(wait.budget()).into())
}

/// Reset an existing install, or make sure the database exists
pub fn prepare_database<R: CommandRunner>(wp: &WpCli<R>) -> Result<DbPreparation> {
    if wp.is_installed() {
        output::warning("WordPress appears to be already installed. Resetting database...");
        let reset = wp.run(["db", "reset", "--yes"]);
        if !reset.success() {
            anyhow::bail!(
                "Failed to reset database: {}",
                output::one_line(&reset.combined())
            );
        }
        return Ok(DbPreparation::Reset);
    }

    output::line("Ensuring database exists...");
    let create = wp.run(["db", "create"]);
    if create.success() {
        output::success("Database created successfully");
        return Ok(DbPreparation::Created);
    }

    if wp.run(["db", "check"]).success() {
        output::line("Database already exists and is accessible");
        return Ok(DbPreparation::Existing);
    }

    anyhow::bail!("Database issue: {}", output::one_line(&create.combined()))
}
