//! Core types for the plx environment model

use crate::naming::PluginName;
use serde::Serialize;
use std::path::PathBuf;

/// Constraint used when a requirement carries no version specifier
pub const ANY_VERSION: &str = "*";

/// The isolated environment plx installs plugins into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemEnv {
    /// Root of the virtual environment
    pub path: PathBuf,
    pub python: PathBuf,
    pub site_packages: PathBuf,
    /// Interpreter version such as `3.12`, when it could be determined
    pub python_version: Option<String>,
}

/// A requirement edge of the environment package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub name: PluginName,
    pub constraint: String,
}

impl Dependency {
    pub fn new(name: &str, constraint: &str) -> Self {
        let constraint = constraint.trim();
        Dependency {
            name: PluginName::new(name),
            constraint: if constraint.is_empty() {
                ANY_VERSION.to_string()
            } else {
                constraint.to_string()
            },
        }
    }

    pub fn name(&self) -> &PluginName {
        &self.name
    }

    /// Requirement string in `name<constraint>` form, e.g. `plx-foo>=1.0`
    pub fn to_requirement(&self) -> String {
        if self.constraint == ANY_VERSION {
            self.name.to_string()
        } else {
            format!("{}{}", self.name, self.constraint)
        }
    }
}

/// Synthetic root package describing what the environment must keep installed.
///
/// Requirement names are unique; adding a name that is already present
/// replaces the existing edge in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentPackage {
    pub name: PluginName,
    pub version: String,
    pub python_version: Option<String>,
    requires: Vec<Dependency>,
}

impl EnvironmentPackage {
    pub fn new(name: &str, version: &str) -> Self {
        EnvironmentPackage {
            name: PluginName::new(name),
            version: version.to_string(),
            python_version: None,
            requires: Vec::new(),
        }
    }

    pub fn with_python_version(mut self, python_version: Option<String>) -> Self {
        self.python_version = python_version;
        self
    }

    pub fn add_dependency(&mut self, dependency: Dependency) {
        match self.requires.iter_mut().find(|d| d.name == dependency.name) {
            Some(existing) => *existing = dependency,
            None => self.requires.push(dependency),
        }
    }

    pub fn requires(&self) -> &[Dependency] {
        &self.requires
    }

    pub fn has_dependency(&self, name: &PluginName) -> bool {
        self.requires.iter().any(|d| &d.name == name)
    }

    pub fn dependency(&self, name: &PluginName) -> Option<&Dependency> {
        self.requires.iter().find(|d| &d.name == name)
    }

    /// Copy of this package keeping only the requirements accepted by `keep`.
    ///
    /// The root identity is preserved; `self` is left untouched.
    pub fn filtered<F>(&self, keep: F) -> EnvironmentPackage
    where
        F: Fn(&PluginName) -> bool,
    {
        EnvironmentPackage {
            name: self.name.clone(),
            version: self.version.clone(),
            python_version: self.python_version.clone(),
            requires: self
                .requires
                .iter()
                .filter(|d| keep(&d.name))
                .cloned()
                .collect(),
        }
    }
}
