use std::path::{Path, PathBuf};

use plx_config::VenvLayout;
use plx_manifest::{discover_entry_points, EntryPoint, SystemEnv};

use crate::logger;
use crate::plugins::PluginError;

/// Locates the environment plugins are installed into
pub trait EnvironmentLocator {
    fn system_env(&self) -> Result<SystemEnv, PluginError>;
}

/// Enumerates the plugin entry points visible in an environment
pub trait EntryPointSource {
    fn entry_points(&self, env: &SystemEnv) -> Vec<EntryPoint>;
}

/// The plx-managed virtual environment at a fixed path
#[derive(Debug, Clone)]
pub struct VenvLocator {
    venv_path: PathBuf,
}

impl VenvLocator {
    pub fn new(venv_path: impl Into<PathBuf>) -> Self {
        VenvLocator {
            venv_path: venv_path.into(),
        }
    }

    pub fn venv_path(&self) -> &Path {
        &self.venv_path
    }
}

impl EnvironmentLocator for VenvLocator {
    fn system_env(&self) -> Result<SystemEnv, PluginError> {
        let layout = VenvLayout::resolve(&self.venv_path)?;

        logger::debug(&format!(
            "Using environment {} (python {})",
            layout.root.display(),
            layout.python_version.as_deref().unwrap_or("unknown")
        ));

        Ok(SystemEnv {
            path: layout.root,
            python: layout.python,
            site_packages: layout.site_packages,
            python_version: layout.python_version,
        })
    }
}

/// Reads `entry_points.txt` from every dist-info in the environment's site-packages
#[derive(Debug, Clone, Copy, Default)]
pub struct SitePackagesEntryPoints;

impl EntryPointSource for SitePackagesEntryPoints {
    fn entry_points(&self, env: &SystemEnv) -> Vec<EntryPoint> {
        discover_entry_points(&env.site_packages)
    }
}
