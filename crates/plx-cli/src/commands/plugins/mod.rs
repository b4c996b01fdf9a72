pub mod check;
pub mod context;
pub mod remove;
pub mod show;

pub use check::check_tracking_file;
pub use context::PluginContext;
pub use remove::remove_plugins;
pub use show::show_plugins;
