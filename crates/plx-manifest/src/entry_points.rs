//! Plugin entry-point discovery
//!
//! A distribution registers plx plugins through `entry_points.txt` in its
//! dist-info directory, under `[plx.plugin]` or any `[plx.*]` group.

use crate::distribution::{dist_info_dirs, read_distribution};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Primary entry-point group for plx plugins
pub const PLUGIN_GROUP: &str = "plx.plugin";

/// An entry point together with the distribution that declares it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub name: String,
    pub group: String,
    /// Object reference, `module:attr`
    pub value: String,
    pub distribution: String,
}

impl EntryPoint {
    pub fn entry_name(&self) -> &str {
        &self.name
    }

    pub fn owning_distribution_name(&self) -> &str {
        &self.distribution
    }
}

/// Check if an entry-point group belongs to plx
pub fn is_plugin_group(group: &str) -> bool {
    group == PLUGIN_GROUP || group.starts_with("plx.")
}

/// Parse the plx entry points out of `entry_points.txt` content
pub fn parse_entry_points(content: &str, distribution: &str) -> Vec<EntryPoint> {
    let mut entries = Vec::new();
    let mut current_group: Option<&str> = None;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            let group = line[1..line.len() - 1].trim();
            current_group = is_plugin_group(group).then_some(group);
            continue;
        }

        let Some(group) = current_group else {
            continue;
        };
        let Some((name, value)) = line.split_once('=') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim().trim_matches('"').trim_matches('\'');
        if name.is_empty() || value.is_empty() {
            continue;
        }

        entries.push(EntryPoint {
            name: name.to_string(),
            group: group.to_string(),
            value: value.to_string(),
            distribution: distribution.to_string(),
        });
    }

    entries
}

/// Collect every plx entry point declared by distributions in `site_packages`
pub fn discover_entry_points(site_packages: &Path) -> Vec<EntryPoint> {
    debug!("Discovering plx entry points in: {:?}", site_packages);

    let mut entry_points = Vec::new();
    for dist_info in dist_info_dirs(site_packages) {
        let Ok(content) = fs::read_to_string(dist_info.join("entry_points.txt")) else {
            continue;
        };

        let distribution = match read_distribution(&dist_info) {
            Ok(dist) => dist.name.to_string(),
            Err(e) => {
                debug!("Skipping {:?}: {}", dist_info, e);
                continue;
            }
        };

        let found = parse_entry_points(&content, &distribution);
        if !found.is_empty() {
            debug!("{} declares {} plx entry point(s)", distribution, found.len());
        }
        entry_points.extend(found);
    }

    info!("Found {} plx entry points", entry_points.len());
    entry_points
}
