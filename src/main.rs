use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use finances::cli::{
    handle_account_command, handle_group_command, handle_payee_command, handle_route_command,
    handle_routes_command, AccountCommands, GroupCommands, PayeeCommands, RouteArgs,
};
use finances::config::{paths::FinancesPaths, settings::Settings};
use finances::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "finances",
    author = "Kaylee Beyene",
    version,
    about = "Terminal personal-finance client",
    long_about = "A terminal client for your budget: a routed shell that adapts to \
                  the terminal width, and a budget sidebar for organizing category \
                  groups. Runs the TUI when no command is given."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Category group commands
    #[command(subcommand)]
    Group(GroupCommands),

    /// Payee commands
    #[command(subcommand)]
    Payee(PayeeCommands),

    /// Resolve a path the way the shell would
    Route(RouteArgs),

    /// List the route table in match order
    Routes,

    /// Initialize data with the default category groups
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FinancesPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let _log_guard = match finances::logging::init(&paths, &settings.log_filter) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    let storage = Storage::new(paths.clone())?;
    if let Err(e) = storage.load_all() {
        warn!(error = %e, "failed to load data");
        return Err(e.into());
    }
    debug!(dir = %paths.base_dir().display(), "data loaded");

    match cli.command {
        None | Some(Commands::Tui) => finances::tui::run_tui(storage, settings)?,
        Some(Commands::Account(cmd)) => handle_account_command(&storage, cmd)?,
        Some(Commands::Group(cmd)) => handle_group_command(&storage, cmd)?,
        Some(Commands::Payee(cmd)) => handle_payee_command(&storage, cmd)?,
        Some(Commands::Route(args)) => handle_route_command(&settings, args),
        Some(Commands::Routes) => handle_routes_command(),
        Some(Commands::Init) => {
            println!("Initializing finances at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default category groups have been created.");
            println!("Run 'finances group list' to see them.");
        }
        Some(Commands::Config) => {
            println!("Finances Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Log directory:  {}", paths.log_dir().display());
            println!();
            println!("Settings:");
            println!("  Narrow below:  {} columns", settings.narrow_breakpoint);
            println!("  Tick rate:     {} ms", settings.tick_rate_ms);
            println!("  Startup delay: {} ms", settings.startup_delay_ms);
            println!("  Update check:  {}", settings.update_check.enabled);
            println!("  Log filter:    {}", settings.log_filter);
        }
    }

    Ok(())
}
