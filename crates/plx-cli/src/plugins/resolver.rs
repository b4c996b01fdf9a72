use plx_manifest::{EntryPoint, EnvironmentPackage, PluginName};

/// How a requested name relates to the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub name: PluginName,
    /// Some discovered entry point is owned by a distribution with this name
    pub is_plugin: bool,
    /// The environment package requires this name
    pub is_installed: bool,
}

/// Cross-references requested names against entry points and the environment package
pub struct PluginResolver<'a> {
    entry_points: &'a [EntryPoint],
    package: &'a EnvironmentPackage,
}

impl<'a> PluginResolver<'a> {
    pub fn new(entry_points: &'a [EntryPoint], package: &'a EnvironmentPackage) -> Self {
        PluginResolver {
            entry_points,
            package,
        }
    }

    pub fn classify(&self, raw: &str) -> Classification {
        let name = PluginName::new(raw);
        let is_plugin = self
            .entry_points
            .iter()
            .any(|ep| name.matches(ep.owning_distribution_name()));
        let is_installed = self.package.has_dependency(&name);

        Classification {
            name,
            is_plugin,
            is_installed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plx_manifest::Dependency;

    fn entry_point(distribution: &str) -> EntryPoint {
        EntryPoint {
            name: "main".to_string(),
            group: "plx.plugin".to_string(),
            value: "pkg:Plugin".to_string(),
            distribution: distribution.to_string(),
        }
    }

    fn package() -> EnvironmentPackage {
        let mut package = EnvironmentPackage::new("plx-core", "1.0.0");
        package.add_dependency(Dependency::new("tomli", ">=2"));
        package.add_dependency(Dependency::new("plx-foo", "*"));
        package
    }

    #[test]
    fn test_classify_installed_plugin() {
        let entry_points = vec![entry_point("Plx_Foo")];
        let package = package();
        let resolver = PluginResolver::new(&entry_points, &package);

        let result = resolver.classify("PLX.foo");
        assert_eq!(result.name.as_str(), "plx-foo");
        assert!(result.is_plugin);
        assert!(result.is_installed);
    }

    #[test]
    fn test_classify_core_dependency() {
        let entry_points = vec![entry_point("plx-foo")];
        let package = package();
        let resolver = PluginResolver::new(&entry_points, &package);

        let result = resolver.classify("tomli");
        assert!(!result.is_plugin);
        assert!(result.is_installed);
    }

    #[test]
    fn test_classify_plugin_not_required() {
        let entry_points = vec![entry_point("plx-bar")];
        let package = package();
        let resolver = PluginResolver::new(&entry_points, &package);

        let result = resolver.classify("plx-bar");
        assert!(result.is_plugin);
        assert!(!result.is_installed);
    }

    #[test]
    fn test_classify_unknown_name() {
        let package = package();
        let resolver = PluginResolver::new(&[], &package);

        let result = resolver.classify("nothing-here");
        assert!(!result.is_plugin);
        assert!(!result.is_installed);
    }
}
