use crate::logger;
use crate::GlobalOpts;
use clap::Subcommand;
use colored::*;
use plx_config::config::CONFIG_KEYS;
use plx_config::Config;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Set a configuration value
    Set { key: String, value: String },
    /// Print where plx reads its config and keeps its data
    Path,
}

/// Run a config subcommand and return the exit status
pub fn handle_config(action: ConfigAction, opts: &GlobalOpts) -> i32 {
    match action {
        ConfigAction::Show => match Config::load() {
            Ok(config) => {
                println!("{}", "Configuration:".bold().green());
                if config.is_empty() {
                    if opts.verbosity_level() > 0 {
                        println!("  {}", "(empty)".yellow());
                    }
                } else {
                    for (key, value) in config.values_iter() {
                        println!("  {}: {}", key.cyan(), value);
                    }
                }
                0
            }
            Err(e) => {
                logger::error(&format!("Failed to load config: {}", e));
                1
            }
        },
        ConfigAction::Set { key, value } => {
            let mut config = match Config::load() {
                Ok(config) => config,
                Err(e) => {
                    logger::error(&format!("Failed to load config: {}", e));
                    return 1;
                }
            };

            if let Err(e) = config.set(&key, value.clone()) {
                logger::error(&e.to_string());
                return 1;
            }

            match config.save() {
                Ok(()) => {
                    logger::success(&format!("Set {} = {}", key, value));
                    0
                }
                Err(e) => {
                    logger::error(&format!("Failed to save config: {}", e));
                    1
                }
            }
        }
        ConfigAction::Path => {
            let config_path = match Config::path() {
                Ok(path) => path,
                Err(e) => {
                    logger::error(&format!("Failed to resolve config path: {}", e));
                    return 1;
                }
            };
            let config = Config::load().unwrap_or_default();

            println!("{} {}", "config".cyan(), config_path.display());
            println!("{} {}", "data-dir".cyan(), config.get_data_dir().display());
            println!("{} {}", "venv".cyan(), config.get_venv_path().display());
            println!(
                "{} {}",
                "tracking-file".cyan(),
                config.tracking_file_path().display()
            );
            if opts.verbosity_level() > 0 {
                println!("{} {}", "keys".cyan(), CONFIG_KEYS.join(", "));
            }
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_opts() -> GlobalOpts {
        GlobalOpts {
            quiet: true,
            verbose: 0,
            no_stdout: false,
        }
    }

    fn verbose_opts() -> GlobalOpts {
        GlobalOpts {
            quiet: false,
            verbose: 1,
            no_stdout: false,
        }
    }

    #[test]
    fn test_config_show() {
        // Loading may fail on a machine without a home dir; it must not panic.
        let code = handle_config(ConfigAction::Show, &verbose_opts());
        assert!(code == 0 || code == 1);
    }

    #[test]
    fn test_config_path() {
        let code = handle_config(ConfigAction::Path, &quiet_opts());
        assert!(code == 0 || code == 1);
    }

    #[test]
    fn test_config_set_unknown_key_fails() {
        let code = handle_config(
            ConfigAction::Set {
                key: "cache-path".to_string(),
                value: "test-value".to_string(),
            },
            &quiet_opts(),
        );
        assert_eq!(code, 1);
    }
}
