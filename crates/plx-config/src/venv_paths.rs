//! Layout of the virtual environment plx installs plugins into

use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(not(windows))]
const BIN_DIR: &str = "bin";
#[cfg(windows)]
const BIN_DIR: &str = "Scripts";

#[cfg(not(windows))]
const INTERPRETERS: &[&str] = &["python3", "python"];
#[cfg(windows)]
const INTERPRETERS: &[&str] = &["python.exe", "python3.exe"];

#[derive(Error, Debug, Clone)]
pub enum VenvPathError {
    #[error("Virtual environment not found: {}", .0.display())]
    VenvNotFound(PathBuf),

    #[error("{0}")]
    PathResolution(String),
}

/// The pieces of a venv the plugin commands need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenvLayout {
    pub root: PathBuf,
    pub site_packages: PathBuf,
    pub python: PathBuf,
    /// `"3.12"`; unknown on Windows, where the path carries no version
    pub python_version: Option<String>,
}

impl VenvLayout {
    pub fn resolve(root: &Path) -> Result<Self, VenvPathError> {
        if !root.is_dir() {
            return Err(VenvPathError::VenvNotFound(root.to_path_buf()));
        }

        let (site_packages, python_version) = find_site_packages(root)?;
        let python = find_interpreter(root)?;

        Ok(VenvLayout {
            root: root.to_path_buf(),
            site_packages,
            python,
            python_version,
        })
    }
}

#[cfg(windows)]
fn find_site_packages(root: &Path) -> Result<(PathBuf, Option<String>), VenvPathError> {
    let site_packages = root.join("Lib").join("site-packages");
    if site_packages.is_dir() {
        Ok((site_packages, None))
    } else {
        Err(missing("site-packages", &site_packages))
    }
}

/// `lib/pythonX.Y/site-packages`; with several interpreters the newest wins
#[cfg(not(windows))]
fn find_site_packages(root: &Path) -> Result<(PathBuf, Option<String>), VenvPathError> {
    let lib = root.join("lib");
    let entries = std::fs::read_dir(&lib).map_err(|_| missing("lib directory", &lib))?;

    let newest = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            let version = parse_version_dir(&name)?;
            let site_packages = entry.path().join("site-packages");
            site_packages.is_dir().then_some((version, site_packages))
        })
        .max_by_key(|(version, _)| version_key(version));

    newest
        .map(|(version, site_packages)| (site_packages, Some(version)))
        .ok_or_else(|| missing("python3.X/site-packages", &lib))
}

fn find_interpreter(root: &Path) -> Result<PathBuf, VenvPathError> {
    let bin = root.join(BIN_DIR);
    INTERPRETERS
        .iter()
        .map(|exe| bin.join(exe))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| missing("Python executable", &bin))
}

fn missing(what: &str, under: &Path) -> VenvPathError {
    VenvPathError::PathResolution(format!("{} not found in {}", what, under.display()))
}

/// `"python3.12"` -> `"3.12"`
fn parse_version_dir(name: &str) -> Option<String> {
    let version = name.strip_prefix("python")?;
    let well_formed = !version.is_empty()
        && version.split('.').all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
    well_formed.then(|| version.to_string())
}

fn version_key(version: &str) -> Vec<u32> {
    version.split('.').filter_map(|part| part.parse().ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(not(windows))]
    fn mock_venv(versions: &[&str]) -> Option<TempDir> {
        let temp_dir = TempDir::new().ok()?;
        for version in versions {
            let site_packages = temp_dir.path().join("lib").join(version).join("site-packages");
            fs::create_dir_all(site_packages).ok()?;
        }
        fs::create_dir_all(temp_dir.path().join("bin")).ok()?;
        fs::write(temp_dir.path().join("bin").join("python3"), "").ok()?;
        Some(temp_dir)
    }

    #[test]
    #[cfg(not(windows))]
    fn test_resolve_unix_layout() {
        let Some(venv) = mock_venv(&["python3.12"]) else {
            return;
        };
        let layout = VenvLayout::resolve(venv.path());
        assert!(layout.is_ok_and(|l| {
            l.site_packages.ends_with("lib/python3.12/site-packages")
                && l.python.ends_with("bin/python3")
                && l.python_version.as_deref() == Some("3.12")
        }));
    }

    #[test]
    #[cfg(not(windows))]
    fn test_newest_interpreter_wins() {
        let Some(venv) = mock_venv(&["python3.9", "python3.11", "python3.10"]) else {
            return;
        };
        let layout = VenvLayout::resolve(venv.path());
        assert!(layout.is_ok_and(|l| l.python_version.as_deref() == Some("3.11")));
    }

    #[test]
    #[cfg(not(windows))]
    fn test_missing_interpreter() {
        let Some(venv) = mock_venv(&["python3.12"]) else {
            return;
        };
        let _ = fs::remove_file(venv.path().join("bin").join("python3"));
        let layout = VenvLayout::resolve(venv.path());
        assert!(layout.is_err_and(|e| e.to_string().starts_with("Python executable not found")));
    }

    #[test]
    fn test_parse_version_dir() {
        assert_eq!(parse_version_dir("python3.12"), Some("3.12".to_string()));
        assert_eq!(parse_version_dir("python"), None);
        assert_eq!(parse_version_dir("python3."), None);
        assert_eq!(parse_version_dir("site-packages"), None);
        assert!(version_key("3.10") > version_key("3.9"));
    }

    #[test]
    fn test_venv_not_found() {
        let result = VenvLayout::resolve(Path::new("/tmp/non_existent_plx_venv_12345"));
        assert!(matches!(result, Err(VenvPathError::VenvNotFound(_))));
    }
}
