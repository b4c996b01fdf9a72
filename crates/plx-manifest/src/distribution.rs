//! Installed distribution metadata read from `*.dist-info` directories

use crate::errors::ManifestError;
use crate::naming::PluginName;
use crate::types::Dependency;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A distribution found in site-packages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledDistribution {
    pub name: PluginName,
    pub version: String,
    pub dist_info: PathBuf,
    /// Unconditional requirements (those without an `extra` marker)
    pub requires: Vec<Dependency>,
}

/// All `*.dist-info` directories directly under `site_packages`, sorted by name
pub fn dist_info_dirs(site_packages: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(site_packages) else {
        debug!("Cannot read site-packages at {:?}", site_packages);
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(".dist-info"))
        })
        .collect();
    dirs.sort();
    dirs
}

/// Split `foo_bar-1.2.3.dist-info` into (`foo_bar`, `1.2.3`)
fn split_dist_info_name(dist_info: &Path) -> Option<(String, String)> {
    let stem = dist_info.file_name()?.to_str()?.strip_suffix(".dist-info")?;
    match stem.split_once('-') {
        Some((name, version)) => Some((name.to_string(), version.to_string())),
        None => Some((stem.to_string(), String::new())),
    }
}

/// Read a distribution from its dist-info directory.
///
/// `METADATA` headers take precedence over the directory name.
pub fn read_distribution(dist_info: &Path) -> Result<InstalledDistribution, ManifestError> {
    let (dir_name, dir_version) = split_dist_info_name(dist_info)
        .ok_or_else(|| ManifestError::InvalidMetadata(dist_info.display().to_string()))?;

    let mut name = dir_name;
    let mut version = dir_version;
    let mut requires = Vec::new();

    let metadata_path = dist_info.join("METADATA");
    if metadata_path.is_file() {
        let content = fs::read_to_string(&metadata_path)?;
        for line in content.lines() {
            // Headers end at the first blank line; the rest is the description
            if line.trim().is_empty() {
                break;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "Name" => name = value.to_string(),
                "Version" => version = value.to_string(),
                "Requires-Dist" => {
                    if let Some(dep) = parse_requirement(value) {
                        requires.push(dep);
                    }
                }
                _ => {}
            }
        }
    }

    if name.is_empty() {
        return Err(ManifestError::InvalidMetadata(
            metadata_path.display().to_string(),
        ));
    }

    Ok(InstalledDistribution {
        name: PluginName::new(&name),
        version,
        dist_info: dist_info.to_path_buf(),
        requires,
    })
}

/// Locate an installed distribution by (canonical) name
pub fn find_distribution(site_packages: &Path, name: &PluginName) -> Option<InstalledDistribution> {
    dist_info_dirs(site_packages)
        .into_iter()
        .filter(|dir| {
            split_dist_info_name(dir).is_some_and(|(dir_name, _)| name.matches(&dir_name))
        })
        .find_map(|dir| match read_distribution(&dir) {
            Ok(dist) => Some(dist),
            Err(e) => {
                debug!("Skipping unreadable distribution {:?}: {}", dir, e);
                None
            }
        })
}

/// Parse a `Requires-Dist` value such as `requests[socks] (>=2.0) ; python_version < "3.12"`.
///
/// Returns `None` for requirements that only apply to an extra.
pub fn parse_requirement(spec: &str) -> Option<Dependency> {
    let (requirement, marker) = match spec.split_once(';') {
        Some((req, marker)) => (req.trim(), Some(marker.trim())),
        None => (spec.trim(), None),
    };

    if marker.is_some_and(|m| m.contains("extra")) {
        return None;
    }

    let name_end = requirement
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        .unwrap_or(requirement.len());
    let name = &requirement[..name_end];
    if name.is_empty() {
        return None;
    }

    let mut rest = requirement[name_end..].trim();
    if rest.starts_with('[') {
        rest = rest.find(']').map_or("", |end| rest[end + 1..].trim());
    }
    let constraint = rest.trim_start_matches('(').trim_end_matches(')').trim();

    Some(Dependency::new(name, constraint))
}
