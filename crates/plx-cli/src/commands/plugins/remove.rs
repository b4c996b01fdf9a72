use colored::Colorize;

use super::PluginContext;
use crate::logger;
use crate::plugins::{PluginError, PluginRemover, RemovalOutcome, SitePackagesEntryPoints};
use crate::GlobalOpts;

/// Remove plugins from the plx environment, returning the exit status
pub fn remove_plugins(
    plugins: &[String],
    dry_run: bool,
    _opts: &GlobalOpts,
) -> Result<i32, PluginError> {
    let context = PluginContext::load()?;
    logger::info(&format!("Using venv: {}", context.locator.venv_path().display()));

    let entry_points = SitePackagesEntryPoints;
    let remover = PluginRemover::new(
        &context.locator,
        &entry_points,
        &context.installer,
        &context.tracking_path,
        context.host_package(),
    );

    let outcome = remover.remove(plugins, dry_run)?;
    print_summary(&outcome, dry_run);
    Ok(outcome.status)
}

fn print_summary(outcome: &RemovalOutcome, dry_run: bool) {
    if outcome.removed.is_empty() || outcome.status != 0 {
        return;
    }

    let verb = if dry_run { "Would uninstall" } else { "Uninstalled" };
    println!(
        "{}",
        format!("{} {} plugin(s)", verb, outcome.removed.len()).dimmed()
    );
    for name in &outcome.removed {
        println!(" {} {}", "-".bold().red(), name.as_str().bold());
    }
}
