use std::process::Command;

use colored::Colorize;
use plx_manifest::{find_distribution, EnvironmentPackage, PluginName, SystemEnv};

use crate::logger;
use crate::plugins::PluginError;

/// Brings an environment in line with a package's requirements.
///
/// Only names in `whitelist` may be changed; everything else stays as
/// installed. Returns the installer's exit status.
pub trait Installer {
    fn update(
        &self,
        env: &SystemEnv,
        package: &EnvironmentPackage,
        whitelist: &[PluginName],
        dry_run: bool,
    ) -> Result<i32, PluginError>;
}

/// Installer backed by `uv pip`
#[derive(Debug, Clone, Default)]
pub struct UvInstaller {
    uv_path: Option<String>,
}

impl UvInstaller {
    pub fn new(uv_path: Option<String>) -> Self {
        UvInstaller { uv_path }
    }

    /// Whitelisted names the package no longer requires
    pub fn removal_plan(package: &EnvironmentPackage, whitelist: &[PluginName]) -> Vec<PluginName> {
        let mut plan: Vec<PluginName> = Vec::new();
        for name in whitelist {
            if !package.has_dependency(name) && !plan.contains(name) {
                plan.push(name.clone());
            }
        }
        plan
    }
}

impl Installer for UvInstaller {
    fn update(
        &self,
        env: &SystemEnv,
        package: &EnvironmentPackage,
        whitelist: &[PluginName],
        dry_run: bool,
    ) -> Result<i32, PluginError> {
        let plan = Self::removal_plan(package, whitelist);
        logger::debug(&format!(
            "{} keeps {} requirement(s); {} whitelisted for removal",
            package.name,
            package.requires().len(),
            plan.len()
        ));

        if plan.is_empty() {
            println!("No dependencies to install or update");
            return Ok(0);
        }

        println!(
            "{}",
            format!("Package operations: {} removal(s)", plan.len()).bold()
        );
        for name in &plan {
            let version = find_distribution(&env.site_packages, name)
                .map(|dist| format!(" ({})", dist.version))
                .unwrap_or_default();
            println!("  {} Removing {}{}", "-".bold().red(), name.as_str().bold(), version);
        }

        if dry_run {
            return Ok(0);
        }

        let uv_path = self.uv_path.as_deref().ok_or_else(|| {
            PluginError::Installer(
                "uv is not available. Install uv or set it with `plx config set uv-path <path>`"
                    .to_string(),
            )
        })?;

        let venv_path = env.path.to_string_lossy().to_string();
        let mut args = vec![
            "pip".to_string(),
            "uninstall".to_string(),
            "--python".to_string(),
            venv_path,
        ];
        args.extend(plan.iter().map(ToString::to_string));

        logger::debug(&format!("Running: {} {}", uv_path, args.join(" ")));
        logger::spinner_start("Removing plugins...");

        let output = match Command::new(uv_path).args(&args).output() {
            Ok(output) => output,
            Err(e) => {
                logger::spinner_stop();
                return Err(PluginError::Installer(format!(
                    "Failed to run uv pip uninstall: {}",
                    e
                )));
            }
        };

        logger::capture_output(&format!("uv {}", args.join(" ")), &output);

        let status = output.status.code().unwrap_or(1);
        if status == 0 {
            logger::spinner_stop();
        } else {
            logger::spinner_error(&format!("uv pip uninstall failed (exit {})", status));
            logger::show_log_path();
        }

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plx_manifest::Dependency;
    use std::path::PathBuf;

    fn env() -> SystemEnv {
        SystemEnv {
            path: PathBuf::from("/tmp/plx_missing_env"),
            python: PathBuf::from("/tmp/plx_missing_env/bin/python3"),
            site_packages: PathBuf::from("/tmp/plx_missing_env/lib/python3.12/site-packages"),
            python_version: Some("3.12".to_string()),
        }
    }

    fn retained() -> EnvironmentPackage {
        let mut package = EnvironmentPackage::new("plx-core", "1.0");
        package.add_dependency(Dependency::new("plx-bar", "*"));
        package
    }

    #[test]
    fn test_removal_plan_skips_retained_and_duplicates() {
        let whitelist = vec![
            PluginName::new("plx-foo"),
            PluginName::new("plx-bar"),
            PluginName::new("PLX_FOO"),
        ];
        let plan = UvInstaller::removal_plan(&retained(), &whitelist);
        assert_eq!(plan, vec![PluginName::new("plx-foo")]);
    }

    #[test]
    fn test_dry_run_does_not_need_uv() {
        let installer = UvInstaller::new(None);
        let status = installer.update(&env(), &retained(), &[PluginName::new("plx-foo")], true);
        assert!(status.is_ok_and(|s| s == 0));
    }

    #[test]
    fn test_missing_uv_is_an_error() {
        let installer = UvInstaller::new(None);
        let status = installer.update(&env(), &retained(), &[PluginName::new("plx-foo")], false);
        assert!(matches!(status, Err(PluginError::Installer(_))));
    }

    #[test]
    fn test_empty_plan_succeeds_without_uv() {
        let installer = UvInstaller::new(None);
        let status = installer.update(&env(), &retained(), &[PluginName::new("plx-bar")], false);
        assert!(status.is_ok_and(|s| s == 0));
    }
}
