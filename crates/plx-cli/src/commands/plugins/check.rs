use colored::Colorize;

use plx_manifest::TrackingDocument;
use plx_schema::validate_object;

use super::PluginContext;
use crate::plugins::PluginError;
use crate::{logger, GlobalOpts};

const TRACKING_SCHEMA: &str = "plugins";

/// Validate `plugins.toml` against the bundled schema.
///
/// Prints one line per violation and returns 1 if there were any.
pub fn check_tracking_file(_opts: &GlobalOpts) -> Result<i32, PluginError> {
    let context = PluginContext::load()?;
    let tracking = TrackingDocument::load(&context.tracking_path)?;

    let errors = validate_object(&tracking.to_json(), TRACKING_SCHEMA)?;
    if errors.is_empty() {
        logger::success(&format!("{} is valid", context.tracking_path.display()));
        return Ok(0);
    }

    println!(
        "{}",
        format!(
            "{} has {} problem(s):",
            context.tracking_path.display(),
            errors.len()
        )
        .bold()
        .red()
    );
    for error in &errors {
        println!("  {}", error);
    }
    Ok(1)
}
