//! Plugin reconciliation: identity resolution, removal orchestration and the
//! collaborators it drives (environment locator, entry-point source, installer).

pub mod environment;
pub mod error;
pub mod installer;
pub mod remove;
pub mod resolver;

pub use environment::{EntryPointSource, EnvironmentLocator, SitePackagesEntryPoints, VenvLocator};
pub use error::PluginError;
pub use installer::{Installer, UvInstaller};
pub use remove::{PluginRemover, RemovalOutcome, SkipReason, SkippedPlugin};
pub use resolver::{Classification, PluginResolver};
