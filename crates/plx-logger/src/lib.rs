//! Console and log-file logging for the plx CLI
//!
//! Every message goes to `plx.log` in the plx config directory. The console
//! only sees what the current verbosity allows: warnings, errors and
//! successes always, info/debug with `-v`, steps with `-vv`. `--no-stdout`
//! silences everything below a warning.

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::process::Output;
use std::sync::Mutex;
use std::time::Duration;

const LOG_FILE_NAME: &str = "plx.log";
const SPINNER_TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Error,
    Warn,
    Success,
    Info,
    Debug,
    Step,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Success => "SUCCESS",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Step => "STEP",
        }
    }

    /// Lowest verbosity at which the console shows this level; `None` means always
    fn console_threshold(self) -> Option<u8> {
        match self {
            Level::Error | Level::Warn | Level::Success => None,
            Level::Info | Level::Debug => Some(1),
            Level::Step => Some(2),
        }
    }

    fn prefix(self) -> Option<ColoredString> {
        match self {
            Level::Error => Some("Error:".red().bold()),
            Level::Warn => Some("warning:".yellow().bold()),
            Level::Success => Some("\u{2714}".green().bold()),
            Level::Info => None,
            Level::Debug => Some("DEBUG:".blue().bold()),
            Level::Step => Some("TRACE:".dimmed()),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    log_file: Option<PathBuf>,
    verbosity: u8,
    no_stdout: bool,
}

static STATE: Mutex<State> = Mutex::new(State {
    log_file: None,
    verbosity: 0,
    no_stdout: false,
});
static SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn with_state<T>(f: impl FnOnce(&mut State) -> T) -> Option<T> {
    STATE.lock().ok().map(|mut state| f(&mut state))
}

pub fn get_verbosity() -> u8 {
    with_state(|s| s.verbosity).unwrap_or(0)
}

pub fn set_verbosity(verbosity: u8) {
    with_state(|s| s.verbosity = verbosity);
}

pub fn set_no_stdout(disabled: bool) {
    with_state(|s| s.no_stdout = disabled);
}

/// Set console verbosity and start a fresh log file for this invocation.
///
/// 0 = warnings only, 1 = debug (-v), 2 = trace (-vv)
pub fn init_with_verbosity(verbosity: u8, no_stdout: bool) -> Result<(), String> {
    set_verbosity(verbosity);
    set_no_stdout(no_stdout);

    let log_dir = log_dir()?;
    fs::create_dir_all(&log_dir).map_err(|e| format!("Failed to create log directory: {}", e))?;

    let log_file = log_dir.join(LOG_FILE_NAME);
    fs::write(&log_file, "").map_err(|e| format!("Failed to reset log file: {}", e))?;

    with_state(|s| s.log_file = Some(log_file))
        .ok_or_else(|| "Logger state is poisoned".to_string())?;

    let args: Vec<String> = std::env::args().collect();
    write_to_log(&format!("plx invoked as: {}", args.join(" ")));
    Ok(())
}

fn log_dir() -> Result<PathBuf, String> {
    #[cfg(not(target_os = "windows"))]
    let base = dirs::home_dir()
        .ok_or("Could not determine home directory")?
        .join(".config");

    #[cfg(target_os = "windows")]
    let base = dirs::config_dir().ok_or("Could not determine config directory")?;

    Ok(base.join("plx"))
}

fn write_to_log(line: &str) {
    let Some(path) = get_log_path() else {
        return;
    };
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(file, "[{}] {}", timestamp, line);
    }
}

fn shows_on_console(level: Level) -> bool {
    let Some(threshold) = level.console_threshold() else {
        return true;
    };
    with_state(|s| !s.no_stdout && s.verbosity >= threshold).unwrap_or(false)
}

fn emit(level: Level, message: &str) {
    write_to_log(&format!("{} {}", level.tag(), message));
    if !shows_on_console(level) {
        return;
    }
    match level.prefix() {
        Some(prefix) => eprintln!("{} {}", prefix, message),
        None => eprintln!("{}", message),
    }
}

pub fn info(message: &str) {
    emit(Level::Info, message);
}

pub fn debug(message: &str) {
    emit(Level::Debug, message);
}

pub fn warn(message: &str) {
    emit(Level::Warn, message);
}

pub fn error(message: &str) {
    emit(Level::Error, message);
}

pub fn success(message: &str) {
    emit(Level::Success, message);
}

/// A stage of a multi-step operation; console only at `-vv`
pub fn step(message: &str) {
    emit(Level::Step, message);
}

/// Record a finished subprocess, its exit code and its output in the log file
pub fn capture_output(command: &str, output: &Output) {
    write_to_log(&format!(
        "COMMAND {} (exit code: {:?})",
        command,
        output.status.code()
    ));
    for (stream, bytes) in [("stdout", &output.stdout), ("stderr", &output.stderr)] {
        let text = String::from_utf8_lossy(bytes);
        if !text.trim().is_empty() {
            write_to_log(&format!("  {}:\n{}", stream, text.trim_end()));
        }
    }
}

pub fn get_log_path() -> Option<PathBuf> {
    with_state(|s| s.log_file.clone()).flatten()
}

/// Point the user at the log file after a failure
pub fn show_log_path() {
    let path = get_log_path().or_else(|| log_dir().ok().map(|dir| dir.join(LOG_FILE_NAME)));
    match path {
        Some(path) => eprintln!("See the log for details: {}", path.display()),
        None => eprintln!("Log file location not available"),
    }
}

/// Show a spinner while a subprocess runs; skipped when verbose output would interleave
pub fn spinner_start(message: &str) {
    let hidden = with_state(|s| s.verbosity > 0 || s.no_stdout).unwrap_or(true);
    if hidden {
        return;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(SPINNER_TICKS)
        .template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    if let Ok(mut guard) = SPINNER.lock() {
        *guard = Some(spinner);
    }
}

pub fn spinner_stop() {
    if let Some(spinner) = SPINNER.lock().ok().and_then(|mut guard| guard.take()) {
        spinner.finish_and_clear();
    }
}

/// Clear the spinner and report a failure in its place
pub fn spinner_error(message: &str) {
    spinner_stop();
    write_to_log(&format!("{} {}", Level::Error.tag(), message));
    eprintln!("  {} {}", "✗".red().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_thresholds() {
        set_no_stdout(false);
        set_verbosity(0);
        assert!(shows_on_console(Level::Warn));
        assert!(!shows_on_console(Level::Info));

        set_verbosity(1);
        assert!(shows_on_console(Level::Debug));
        assert!(!shows_on_console(Level::Step));

        set_no_stdout(true);
        assert!(!shows_on_console(Level::Debug));
        assert!(shows_on_console(Level::Error));

        set_no_stdout(false);
        set_verbosity(0);
    }

    #[test]
    fn test_spinner_stop_without_spinner_is_noop() {
        spinner_stop();
        assert!(SPINNER.lock().is_ok_and(|guard| guard.is_none()));
    }

    #[test]
    fn test_levels_have_distinct_tags() {
        let levels = [
            Level::Error,
            Level::Warn,
            Level::Success,
            Level::Info,
            Level::Debug,
            Level::Step,
        ];
        let mut tags: Vec<&str> = levels.iter().map(|l| l.tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), levels.len());
    }
}
