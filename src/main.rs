use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use moneytree::cli::{
    handle_adjust_command, handle_advise_command, handle_init_command, handle_item_command,
    handle_totals_command, ItemCommands,
};
use moneytree::config::{paths::MoneyTreePaths, settings::Settings};
use moneytree::models::{Money, MoneyType};
use moneytree::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "MONEYTREE_LOG";

#[derive(Parser)]
#[command(
    name = "moneytree",
    version,
    about = "Track wallet cash and savings as a tree of labeled money items",
    long_about = "MoneyTree keeps track of the cash in your wallet and the money you \
                  have saved. Label portions of it, split items into sub-items, and \
                  keep the totals honest from the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run initial setup with current wallet cash and savings
    Init {
        /// Cash currently in the wallet
        #[arg(long, default_value = "0")]
        wallet: Money,
        /// Money currently saved
        #[arg(long, default_value = "0")]
        savings: Money,
    },

    #[command(flatten)]
    Item(ItemCommands),

    /// Show wallet, savings and grand totals
    Totals,

    /// Set the wallet or savings total
    Adjust {
        /// wallet or savings
        money_type: MoneyType,
        /// New total
        total: Money,
    },

    /// Ask the advisor for spending advice
    Advise,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = MoneyTreePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init { wallet, savings }) => {
            handle_init_command(&storage, &settings, wallet, savings)?;
        }
        Some(Commands::Item(cmd)) => {
            handle_item_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Totals) => {
            handle_totals_command(&storage, &settings)?;
        }
        Some(Commands::Adjust { money_type, total }) => {
            handle_adjust_command(&storage, &settings, money_type, total)?;
        }
        Some(Commands::Advise) => {
            handle_advise_command(&storage, &settings)?;
        }
        Some(Commands::Config) => {
            println!("MoneyTree Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Ledger file:    {}", paths.ledger_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Advisor endpoint: {}", settings.advisor.endpoint);
            println!("  Advisor model:    {}", settings.advisor.model);
            println!("  Advisor key env:  {}", settings.advisor.api_key_env);
            println!("  Setup complete:   {}", storage.is_initialized()?);
        }
        None => {
            println!("MoneyTree - wallet and savings tracker");
            println!();
            if !storage.is_initialized()? {
                println!("Run 'moneytree init --wallet <amount> --savings <amount>' to get started.");
            }
            println!("Run 'moneytree --help' for usage information.");
        }
    }

    Ok(())
}
