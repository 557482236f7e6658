//! Plugin activation and site options

use super::wp::WpCli;
use crate::output;
use crate::runtime::command::CommandRunner;

/// Activate every installed plugin. Returns the plugin count seen.
pub fn activate_plugins<R: CommandRunner>(wp: &WpCli<R>) -> usize {
    let list = wp.run(["plugin", "list", "--format=count"]);
    let count = if list.success() {
        list.first_line().parse::<usize>().unwrap_or(0)
    } else {
        0
    };

    if count == 0 {
        output::line("No plugins to activate");
        return 0;
    }

    output::line("Activating plugins...");
    let activate = wp.run(["plugin", "activate", "--all"]);
    if !activate.success() {
        output::warning(format!(
            "Some plugins may not have activated: {}",
            output::one_line(&activate.combined())
        ));
    }
    count
}

/// Timezone, upload layout and permalinks. Each failure is a warning;
/// returns how many of the steps failed.
pub fn configure_settings<R: CommandRunner>(
    wp: &WpCli<R>,
    timezone: &str,
    permalink_structure: &str,
) -> usize {
    output::line("Configuring settings...");

    let steps: [(&str, Vec<&str>); 4] = [
        (
            "set timezone",
            vec!["option", "update", "timezone_string", timezone],
        ),
        (
            "set upload settings",
            vec!["option", "update", "uploads_use_yearmonth_folders", "0"],
        ),
        (
            "set rewrite structure",
            vec!["rewrite", "structure", permalink_structure],
        ),
        ("flush rewrites", vec!["rewrite", "flush"]),
    ];

    let mut failures = 0;
    for (label, args) in steps {
        let result = wp.run(args);
        if !result.success() {
            failures += 1;
            output::warning(format!(
                "Failed to {}: {}",
                label,
                output::one_line(&result.combined())
            ));
        }
    }
    failures
}
