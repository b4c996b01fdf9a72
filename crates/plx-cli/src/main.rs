use clap::{Parser, Subcommand};
use plx::{
    commands::{
        config::{self, ConfigAction},
        plugins,
    },
    init_tracing, logger, GlobalOpts,
};

#[derive(Parser)]
#[command(name = "plx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Plugin manager for the plx environment",
    long_about = "plx keeps the plugins installed in its environment, the environment's requirements and the plugin tracking file in sync."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the plx tool
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage plugins
    Plugin {
        #[command(subcommand)]
        action: PluginAction,
    },
}

#[derive(Subcommand)]
enum PluginAction {
    /// Remove one or more plugins
    Remove {
        /// Plugin distribution names
        #[arg(required = true)]
        plugins: Vec<String>,
        /// Show what would be removed without changing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// List tracked plugins
    Show,
    /// Validate the plugin tracking file
    Check,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level(), cli.global.no_stdout)
    {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    init_tracing(cli.global.verbosity_level());

    let code = match cli.command {
        Commands::Config { action } => config::handle_config(action, &cli.global),
        Commands::Plugin { action } => {
            let result = match action {
                PluginAction::Remove { plugins: names, dry_run } => {
                    plugins::remove_plugins(&names, dry_run, &cli.global)
                }
                PluginAction::Show => plugins::show_plugins(&cli.global),
                PluginAction::Check => plugins::check_tracking_file(&cli.global),
            };
            result.unwrap_or_else(|e| {
                logger::error(&e.to_string());
                1
            })
        }
    };

    std::process::exit(code);
}
