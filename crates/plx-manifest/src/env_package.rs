//! Synthesis of the environment package
//!
//! The environment package is rebuilt on every invocation from two sources:
//! the host distribution's own requirements as reported by the environment,
//! and the plugins recorded in the tracking document.

use crate::distribution::find_distribution;
use crate::naming::PluginName;
use crate::tracking::TrackingDocument;
use crate::types::{Dependency, EnvironmentPackage, SystemEnv};
use tracing::debug;

const UNKNOWN_VERSION: &str = "0.0.0";

/// Build the package describing everything `env` must keep installed.
///
/// Tracked plugins are added after the host's requirements, so a plugin that
/// is also a core requirement carries the tracked constraint.
pub fn build_env_package(
    env: &SystemEnv,
    host_package: &str,
    tracking: &TrackingDocument,
) -> EnvironmentPackage {
    let host_name = PluginName::new(host_package);

    let mut package = match find_distribution(&env.site_packages, &host_name) {
        Some(host) => {
            debug!(
                "Host distribution {} {} declares {} requirement(s)",
                host.name,
                host.version,
                host.requires.len()
            );
            let mut package = EnvironmentPackage::new(host.name.as_str(), &host.version);
            for dependency in host.requires {
                package.add_dependency(dependency);
            }
            package
        }
        None => {
            debug!(
                "Host distribution {} not found in {:?}",
                host_name, env.site_packages
            );
            EnvironmentPackage::new(host_name.as_str(), UNKNOWN_VERSION)
        }
    }
    .with_python_version(env.python_version.clone());

    for name in tracking.names() {
        let constraint = tracking.constraint(&name);
        package.add_dependency(Dependency::new(name.as_str(), &constraint));
    }

    package
}

#[cfg(test)]
mod tests {
    use crate::env_package::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn mock_env(root: &Path) -> SystemEnv {
        let site_packages = root.join("lib").join("python3.12").join("site-packages");
        let _ = fs::create_dir_all(&site_packages);
        SystemEnv {
            path: root.to_path_buf(),
            python: root.join("bin").join("python3"),
            site_packages,
            python_version: Some("3.12".to_string()),
        }
    }

    fn tracking() -> TrackingDocument {
        TrackingDocument::parse("[plx-foo]\nversion = \"^1.0\"\n\n[plx-bar]\n").unwrap_or_default()
    }

    #[test]
    fn test_build_from_host_and_tracking() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let env = mock_env(temp_dir.path());
        let dist_info = env.site_packages.join("plx_core-2.1.0.dist-info");
        assert!(fs::create_dir_all(&dist_info).is_ok());
        assert!(fs::write(
            dist_info.join("METADATA"),
            "Name: plx-core\nVersion: 2.1.0\nRequires-Dist: tomli (>=2)\n"
        )
        .is_ok());

        let package = build_env_package(&env, "plx-core", &tracking());

        assert_eq!(package.name.as_str(), "plx-core");
        assert_eq!(package.version, "2.1.0");
        assert_eq!(package.python_version.as_deref(), Some("3.12"));
        let requirements: Vec<String> =
            package.requires().iter().map(Dependency::to_requirement).collect();
        assert_eq!(requirements, vec!["tomli>=2", "plx-foo^1.0", "plx-bar"]);
    }

    #[test]
    fn test_build_without_host_distribution() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let env = mock_env(temp_dir.path());

        let package = build_env_package(&env, "plx-core", &tracking());

        assert_eq!(package.version, UNKNOWN_VERSION);
        assert_eq!(package.requires().len(), 2);
        assert!(package.has_dependency(&PluginName::new("plx-bar")));
    }

    #[test]
    fn test_build_with_empty_tracking() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let env = mock_env(temp_dir.path());
        let package = build_env_package(&env, "plx-core", &TrackingDocument::default());
        assert!(package.requires().is_empty());
    }
}
