use std::path::PathBuf;

use plx_config::Config;

use crate::logger;
use crate::plugins::{PluginError, UvInstaller, VenvLocator};

/// Everything a plugin command needs, resolved from the user's config
pub struct PluginContext {
    pub config: Config,
    pub locator: VenvLocator,
    pub installer: UvInstaller,
    pub tracking_path: PathBuf,
}

impl PluginContext {
    pub fn load() -> Result<Self, PluginError> {
        let mut config = Config::load()?;

        // A missing uv only matters once something has to be uninstalled.
        let uv_path = match config.ensure_uv_path() {
            Ok(path) => Some(path),
            Err(e) => {
                logger::debug(&format!("uv not resolved: {}", e));
                None
            }
        };

        let locator = VenvLocator::new(config.get_venv_path());
        let tracking_path = config.tracking_file_path();

        logger::debug(&format!("Tracking file: {}", tracking_path.display()));

        Ok(PluginContext {
            config,
            locator,
            installer: UvInstaller::new(uv_path),
            tracking_path,
        })
    }

    pub fn host_package(&self) -> &str {
        self.config.host_package()
    }
}
