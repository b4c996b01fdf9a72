//! Package name canonicalization
//!
//! Distribution names are compared in their normalized form: lowercase, with
//! every run of `-`, `_` and `.` collapsed into a single `-`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;

fn is_separator(ch: char) -> bool {
    matches!(ch, '-' | '_' | '.')
}

/// Normalize a distribution name (`Foo_Bar.baz` -> `foo-bar-baz`)
pub fn canonicalize_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut in_separator_run = false;

    for ch in name.trim().chars() {
        if is_separator(ch) {
            if !in_separator_run {
                result.push('-');
            }
            in_separator_run = true;
        } else {
            result.extend(ch.to_lowercase());
            in_separator_run = false;
        }
    }

    result
}

/// A canonicalized package name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PluginName(String);

impl PluginName {
    pub fn new(raw: &str) -> Self {
        PluginName(canonicalize_name(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `raw` canonicalizes to this name
    pub fn matches(&self, raw: &str) -> bool {
        canonicalize_name(raw) == self.0
    }
}

impl fmt::Display for PluginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PluginName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PluginName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PluginName {
    fn from(raw: &str) -> Self {
        PluginName::new(raw)
    }
}

impl Serialize for PluginName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PluginName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(PluginName::new(&raw))
    }
}

#[cfg(test)]
mod tests {
    use crate::naming::*;

    #[test]
    fn test_canonicalize_name() {
        assert_eq!(canonicalize_name("plx-foo"), "plx-foo");
        assert_eq!(canonicalize_name("Plx_Foo"), "plx-foo");
        assert_eq!(canonicalize_name("plx.foo"), "plx-foo");
        assert_eq!(canonicalize_name("PLX__-.foo"), "plx-foo");
        assert_eq!(canonicalize_name("  plx-foo "), "plx-foo");
        assert_eq!(canonicalize_name("_plx..foo-"), "-plx-foo-");
        assert_eq!(canonicalize_name(""), "");
    }

    #[test]
    fn test_plugin_name_equality_ignores_case_and_separators() {
        assert_eq!(PluginName::new("My_Plugin"), PluginName::new("my.plugin"));
        assert!(PluginName::new("my-plugin").matches("MY_PLUGIN"));
        assert!(!PluginName::new("my-plugin").matches("my-plugins"));
    }

    #[test]
    fn test_plugin_name_serde_canonicalizes() {
        let parsed: Result<Vec<PluginName>, _> = serde_json::from_str(r#"["Foo_Bar"]"#);
        assert!(parsed.is_ok_and(|names| names[0].as_str() == "foo-bar"));
    }
}
