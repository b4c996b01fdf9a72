use colored::Colorize;
use std::collections::BTreeMap;

use plx_manifest::{EntryPoint, PluginName, TrackingDocument};

use super::PluginContext;
use crate::plugins::{EntryPointSource, EnvironmentLocator, PluginError, SitePackagesEntryPoints};
use crate::{logger, GlobalOpts};

/// List tracked plugins with their constraints and entry points
pub fn show_plugins(opts: &GlobalOpts) -> Result<i32, PluginError> {
    let context = PluginContext::load()?;
    let tracking = TrackingDocument::load(&context.tracking_path)?;

    if tracking.is_empty() {
        println!("There are no plugins tracked in {}.", context.tracking_path.display());
        return Ok(0);
    }

    // The environment is optional here; a missing venv just hides entry points.
    let entry_points = match context.locator.system_env() {
        Ok(env) => SitePackagesEntryPoints.entry_points(&env),
        Err(e) => {
            logger::warn(&format!("Could not inspect environment: {}", e));
            Vec::new()
        }
    };
    let by_distribution = group_by_distribution(&entry_points);

    println!("{}", "Plugins:".bold().green());
    for name in tracking.names() {
        let constraint = tracking.constraint(&name);
        let owned = by_distribution.get(&name).map_or(&[][..], Vec::as_slice);

        println!(
            " {} {} {}",
            "-".bold(),
            name.as_str().bold().blue(),
            constraint.dimmed()
        );
        if owned.is_empty() {
            println!("   {}", "(no entry points found)".yellow());
        } else if opts.verbosity_level() > 0 {
            for ep in owned {
                println!("   {} = {}", ep.entry_name().cyan(), ep.value);
            }
        } else {
            println!("   {}", format!("{} entry point(s)", owned.len()).dimmed());
        }
    }

    Ok(0)
}

fn group_by_distribution(entry_points: &[EntryPoint]) -> BTreeMap<PluginName, Vec<&EntryPoint>> {
    let mut grouped: BTreeMap<PluginName, Vec<&EntryPoint>> = BTreeMap::new();
    for ep in entry_points {
        grouped
            .entry(PluginName::new(ep.owning_distribution_name()))
            .or_default()
            .push(ep);
    }
    grouped
}
