//! The `plugins.toml` tracking document
//!
//! Records which installed packages were installed as plugins. Each top-level
//! key is a package name; its value is free-form metadata that plx carries
//! through untouched. Keys are matched by canonical name, so `Plx_Foo` in the
//! file is found by a lookup for `plx-foo`.

use crate::errors::ManifestError;
use crate::naming::{canonicalize_name, PluginName};
use crate::types::ANY_VERSION;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use toml::{Table, Value};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingDocument {
    entries: Table,
}

impl TrackingDocument {
    /// Load the document, returning an empty one if the file doesn't exist
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            debug!("No tracking file at {:?}, starting empty", path);
            return Ok(TrackingDocument::default());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|source| ManifestError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let entries: Table = toml::from_str(content)?;
        Ok(TrackingDocument { entries })
    }

    /// Serialize with keys inserted in sorted order.
    ///
    /// TOML emits plain values before tables, so a document mixing string
    /// constraints and table entries lists the strings first, each group
    /// sorted.
    pub fn to_toml_string(&self) -> Result<String, ManifestError> {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();

        let mut sorted = Table::new();
        for key in keys {
            if let Some(value) = self.entries.get(key) {
                sorted.insert(key.clone(), value.clone());
            }
        }

        Ok(toml::to_string_pretty(&sorted)?)
    }

    /// Write the document to `path`, replacing any previous content.
    ///
    /// Content goes to a sibling temp file that is renamed over `path`; the
    /// temp file is removed if any step fails.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = self.to_toml_string()?;

        let temp = TempFile::new(path.with_extension("toml.tmp"));
        {
            let file = fs::File::create(temp.path())?;
            let mut writer = std::io::BufWriter::new(file);
            writer.write_all(content.as_bytes())?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(temp.path(), path)?;
        temp.persist();

        debug!("Saved {} tracked plugin(s) to {:?}", self.len(), path);
        Ok(())
    }

    fn find_key(&self, name: &PluginName) -> Option<&String> {
        self.entries
            .keys()
            .find(|key| canonicalize_name(key) == name.as_str())
    }

    fn matching_keys(&self, name: &PluginName) -> Vec<String> {
        self.entries
            .keys()
            .filter(|key| canonicalize_name(key) == name.as_str())
            .cloned()
            .collect()
    }

    pub fn contains(&self, name: &PluginName) -> bool {
        self.find_key(name).is_some()
    }

    pub fn get(&self, name: &PluginName) -> Option<&Value> {
        self.find_key(name).and_then(|key| self.entries.get(key))
    }

    pub fn insert(&mut self, name: &PluginName, metadata: Value) {
        let key = self
            .find_key(name)
            .cloned()
            .unwrap_or_else(|| name.to_string());
        self.entries.insert(key, metadata);
    }

    /// Drop every entry whose key canonicalizes to `name`.
    ///
    /// Returns false when there was none.
    pub fn remove(&mut self, name: &PluginName) -> bool {
        let keys = self.matching_keys(name);
        for key in &keys {
            self.entries.remove(key);
        }
        !keys.is_empty()
    }

    /// Canonical names of all tracked plugins, in document order
    pub fn names(&self) -> Vec<PluginName> {
        self.entries.keys().map(|key| PluginName::new(key)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Version constraint recorded for `name`.
    ///
    /// A string value is the constraint itself; a table may carry a `version`
    /// key. Anything else means unconstrained.
    pub fn constraint(&self, name: &PluginName) -> String {
        match self.get(name) {
            Some(Value::String(constraint)) => constraint.clone(),
            Some(Value::Table(table)) => table
                .get("version")
                .and_then(Value::as_str)
                .map_or_else(|| ANY_VERSION.to_string(), str::to_string),
            _ => ANY_VERSION.to_string(),
        }
    }

    /// JSON view of the document, for schema validation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.entries).unwrap_or(serde_json::Value::Null)
    }
}

/// Removes its file on drop unless persisted
struct TempFile {
    path: PathBuf,
    armed: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        TempFile { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn persist(mut self) {
        self.armed = false;
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(&self.path);
        }
    }
}
