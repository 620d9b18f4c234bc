use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mtd_departures::cache::DepartureGateway;
use mtd_departures::config::AppConfig;
use mtd_departures::domain::StopName;
use mtd_departures::mtd::MtdClient;
use mtd_departures::pretty::pretty_print;
use mtd_departures::stops::StopStore;

#[derive(Parser)]
#[command(about = "Upcoming MTD bus departures by stop name")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print upcoming departures for a stop
    Departures { stop: String },
    /// Set a favourite stop and print its departures
    Favorite { stop: String },
    /// Download the stop listing into the data directory
    RefreshStops,
    /// Rebuild the stop name → id index from the saved listing
    RebuildIndex,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env();

    match run(args.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = StopStore::new(&config.data_dir);
    let client = MtdClient::new(config.mtd)?;

    match command {
        Command::Departures { stop } => {
            let gateway = DepartureGateway::new(client, store.load_name_to_id()?, config.cache);
            let departures = gateway.get_departures(&StopName::parse(stop)?).await?;
            println!("{}", pretty_print(&departures)?);
        }
        Command::Favorite { stop } => {
            let gateway = DepartureGateway::new(client, store.load_name_to_id()?, config.cache);
            gateway.set_favorite_stop(StopName::parse(stop)?).await?;
            let departures = gateway.get_favorite_departures().await?;
            println!("{}", pretty_print(&departures)?);
        }
        Command::RefreshStops => {
            let listing = client.get_stops_raw().await?;
            store.save_stops_json(&listing)?;
            println!("Saved stop listing to {}", store.stops_path().display());
        }
        Command::RebuildIndex => {
            let directory = store.rebuild_name_to_id()?;
            println!(
                "Indexed {} stop names in {}",
                directory.len(),
                store.name_to_id_path().display()
            );
        }
    }

    Ok(())
}
