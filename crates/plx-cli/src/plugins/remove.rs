//! Plugin removal
//!
//! Removal touches three things that must agree: the packages installed in
//! the environment, the environment package's requirements, and the
//! `plugins.toml` tracking file. The tracking file is written last and only
//! after the installer reports success, so a failed or simulated removal
//! never leaves it claiming a state the environment is not in.

use std::path::PathBuf;

use plx_manifest::{build_env_package, PluginName, TrackingDocument};

use crate::logger;
use crate::plugins::{EntryPointSource, EnvironmentLocator, Installer, PluginError, PluginResolver};

/// Exit status when none of the requested plugins could be removed
pub const EMPTY_REMOVAL_STATUS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotInstalled,
    NotAPlugin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPlugin {
    pub name: PluginName,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// Process exit status for the invocation
    pub status: i32,
    /// Plugins accepted for removal, in request order
    pub removed: Vec<PluginName>,
    pub skipped: Vec<SkippedPlugin>,
    /// Whether the tracking file was rewritten
    pub persisted: bool,
}

/// Drives a removal from requested names to a persisted tracking file
pub struct PluginRemover<'a> {
    locator: &'a dyn EnvironmentLocator,
    entry_points: &'a dyn EntryPointSource,
    installer: &'a dyn Installer,
    tracking_path: PathBuf,
    host_package: String,
}

impl<'a> PluginRemover<'a> {
    pub fn new(
        locator: &'a dyn EnvironmentLocator,
        entry_points: &'a dyn EntryPointSource,
        installer: &'a dyn Installer,
        tracking_path: impl Into<PathBuf>,
        host_package: impl Into<String>,
    ) -> Self {
        PluginRemover {
            locator,
            entry_points,
            installer,
            tracking_path: tracking_path.into(),
            host_package: host_package.into(),
        }
    }

    pub fn remove(&self, plugins: &[String], dry_run: bool) -> Result<RemovalOutcome, PluginError> {
        let env = self.locator.system_env()?;
        let mut tracking = TrackingDocument::load(&self.tracking_path)?;
        let package = build_env_package(&env, &self.host_package, &tracking);
        let entry_points = self.entry_points.entry_points(&env);
        let resolver = PluginResolver::new(&entry_points, &package);

        let mut removed: Vec<PluginName> = Vec::new();
        let mut skipped = Vec::new();

        for plugin in plugins {
            let classification = resolver.classify(plugin);
            let name = classification.name;

            if !classification.is_installed {
                logger::warn(&format!("Plugin {} is not installed.", name));
                skipped.push(SkippedPlugin {
                    name,
                    reason: SkipReason::NotInstalled,
                });
                continue;
            }

            if !classification.is_plugin {
                logger::warn(&format!("The package {} is not a plugin.", name));
                skipped.push(SkippedPlugin {
                    name,
                    reason: SkipReason::NotAPlugin,
                });
                continue;
            }

            if !removed.contains(&name) {
                removed.push(name);
            }
        }

        if removed.is_empty() {
            logger::debug("No plugins left to remove");
            return Ok(RemovalOutcome {
                status: EMPTY_REMOVAL_STATUS,
                removed,
                skipped,
                persisted: false,
            });
        }

        let retained = package.filtered(|name| !removed.contains(name));
        logger::step(&format!(
            "Removing {} plugin(s); {} requirement(s) retained",
            removed.len(),
            retained.requires().len()
        ));

        let status = self.installer.update(&env, &retained, &removed, dry_run)?;

        if status != 0 || dry_run {
            logger::debug(&format!(
                "Leaving {} untouched (installer status {}, dry run: {})",
                self.tracking_path.display(),
                status,
                dry_run
            ));
            return Ok(RemovalOutcome {
                status,
                removed,
                skipped,
                persisted: false,
            });
        }

        for name in &removed {
            tracking.remove(name);
        }
        tracking.save(&self.tracking_path)?;
        logger::info(&format!(
            "Updated {} ({} plugin(s) remaining)",
            self.tracking_path.display(),
            tracking.len()
        ));

        Ok(RemovalOutcome {
            status: 0,
            removed,
            skipped,
            persisted: true,
        })
    }
}
