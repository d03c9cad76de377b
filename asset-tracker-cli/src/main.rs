//! # Asset Tracker CLI
//!
//! Console menu for registering the phones and laptops of each office.
//!
//! ## Usage
//! ```bash
//! # Run the interactive menu against ./assets.db
//! asset-tracker
//!
//! # Use another database and add the demo assets first
//! asset-tracker --database sqlite:/tmp/demo.db?mode=rwc --seed
//!
//! # Show the configured offices and currencies
//! asset-tracker offices
//! ```

use std::path::PathBuf;

use asset_tracker::currency::convert_price;
use asset_tracker::prelude::*;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rust_decimal_macros::dec;
use tabled::settings::Style;
use tabled::{Table, Tabled};

mod config_loader;
mod terminal;

use config_loader::CliConfig;
use terminal::InquireConsole;

/// Office asset tracker
#[derive(Parser, Debug)]
#[command(name = "asset-tracker")]
#[command(version)]
#[command(about = "Track office phones and laptops with currency-converted reports", long_about = None)]
struct Args {
    /// SQLite URL of the asset database
    #[arg(long, env = "ASSET_TRACKER_DATABASE")]
    database: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable file logging to logs/ directory
    #[arg(long, default_value = "false")]
    log: bool,

    /// Insert two demo assets before the menu starts
    #[arg(long, default_value = "false")]
    seed: bool,

    /// Print the report without colors
    #[arg(long, default_value = "false")]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the configured offices and their currencies
    Offices,
    /// Write a sample config file
    InitConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let file_config = CliConfig::load(args.config.as_deref());

    // In menu mode we only log to file, so log lines never land in the prompts
    let is_menu_mode = args.command.is_none();
    let _file_guard = init_tracing(args.log || file_config.enable_logging.unwrap_or(false), is_menu_mode)?;

    match args.command {
        Some(Commands::InitConfig) => {
            let path = CliConfig::create_sample(args.config.as_deref())?;
            println!("Wrote sample configuration to {}", path.display());
            return Ok(());
        }
        Some(Commands::Offices) => {
            let config = file_config.resolve(args.database.as_deref())?;
            println!("{}", office_table(&config.offices)?);
            return Ok(());
        }
        None => {}
    }

    let config = file_config.resolve(args.database.as_deref())?;
    let colorize = !args.no_color && file_config.color.unwrap_or(true);
    run_menu(&config, args.seed, colorize).await
}

fn init_tracing(
    to_file: bool,
    is_menu_mode: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, Box<dyn std::error::Error>> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    if to_file {
        std::fs::create_dir_all("logs")?;

        let file_appender = tracing_appender::rolling::daily("logs", "asset-tracker.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let env_filter = tracing_subscriber::EnvFilter::from_default_env().add_directive("asset_tracker=debug".parse()?);
        // The file layer is built per branch because its type depends on the subscriber stack it joins.
        if is_menu_mode {
            let file_layer = tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false);
            tracing_subscriber::registry().with(env_filter).with(file_layer).init();
        } else {
            let file_layer = tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .with(file_layer)
                .init();
        }

        tracing::info!("--- Asset Tracker Session Started [{}] ---", Local::now());
        return Ok(Some(guard));
    }

    if !is_menu_mode {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive("asset_tracker=info".parse()?))
            .init();
    }
    Ok(None)
}

async fn run_menu(config: &TrackerConfig, seed: bool, colorize: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteAssetStore::connect(&config.database_url).await?;
    let today = Local::now().date_naive();

    if seed {
        for asset in seed_assets(today) {
            let id = store.create(&asset).await?;
            tracing::info!("Seeded asset {} ({})", id, asset.name);
        }
    }

    println!("{}", "Welcome to the asset manager".bold());

    let mut console = InquireConsole;
    let result = Session::new(&store, &mut console, &config.offices, today)
        .with_color(colorize)
        .run()
        .await;

    store.close().await;
    result?;
    Ok(())
}

/// The demo assets of the first release, bought today.
fn seed_assets(today: NaiveDate) -> Vec<NewAsset> {
    vec![
        NewAsset::new(AssetKind::Laptop, "Laptop", "Miami", dec!(999.99), today),
        NewAsset::new(AssetKind::Phone, "Mobile Phone", "Madrid", dec!(499.99), today),
    ]
}

#[derive(Tabled)]
struct OfficeRow {
    #[tabled(rename = "Office")]
    name: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "100 USD")]
    example: String,
}

fn office_table(offices: &OfficeTable) -> Result<String, AssetError> {
    let rows = offices
        .iter()
        .map(|office| -> Result<OfficeRow, AssetError> {
            Ok(OfficeRow {
                name: office.name.clone(),
                currency: office.currency.clone(),
                rate: office.rate.to_string(),
                example: convert_price(offices, &office.name, dec!(100))?.to_string(),
            })
        })
        .collect::<Result<Vec<_>, AssetError>>()?;

    Ok(Table::new(rows).with(Style::rounded()).to_string())
}
