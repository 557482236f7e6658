//! Plain status lines for the non-interactive parts of the pipeline.
//!
//! The interactive flow uses cliclack; the installer and runtime steps print
//! through these helpers so they read the same whether they run from the
//! bootstrap flow or from `basecamp install` inside a container.

use colored::Colorize;

pub fn line(message: impl AsRef<str>) {
    println!("{}", message.as_ref());
}

pub fn heading(message: impl AsRef<str>) {
    println!();
    println!("{}", message.as_ref().cyan().bold());
}

pub fn success(message: impl AsRef<str>) {
    println!("{} {}", "✓".green(), message.as_ref());
}

pub fn warning(message: impl AsRef<str>) {
    println!("{} {}", "⚠️ ".yellow(), message.as_ref().yellow());
}

pub fn dimmed(message: impl AsRef<str>) {
    println!("{}", message.as_ref().dimmed());
}

/// Fatal error banner printed by the binary before exiting with code 1
pub fn fatal(message: impl AsRef<str>) {
    eprintln!();
    eprintln!("{} {}", "❌ ERROR:".red().bold(), message.as_ref());
    eprintln!();
}

/// Join captured command output into a single line for warnings
pub fn one_line(output: &str) -> String {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_collapses_output() {
        assert_eq!(one_line("Error: foo\n\n  bar  \n"), "Error: foo bar");
        assert_eq!(one_line(""), "");
    }
}
