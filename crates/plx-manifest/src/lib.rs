//! plx manifest management
//!
//! Types and persistence for the plugin side of the plx environment:
//!
//! - [`PluginName`]: canonical package identity
//! - [`TrackingDocument`]: the `plugins.toml` record of packages installed as plugins
//! - [`EnvironmentPackage`]: the synthetic root package whose requirements are
//!   everything the environment must keep installed
//! - entry-point and distribution metadata discovery over a site-packages tree

pub mod distribution;
pub mod entry_points;
pub mod env_package;
pub mod errors;
pub mod naming;
pub mod tracking;
pub mod types;

pub use distribution::{find_distribution, InstalledDistribution};
pub use entry_points::{discover_entry_points, parse_entry_points, EntryPoint};
pub use env_package::build_env_package;
pub use errors::ManifestError;
pub use naming::{canonicalize_name, PluginName};
pub use tracking::TrackingDocument;
pub use types::{Dependency, EnvironmentPackage, SystemEnv};
