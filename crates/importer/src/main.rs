//! cityguide-importer: fill the city guide from OpenStreetMap and uploads.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cityguide_importer::api_client::CityGuideClient;
use cityguide_importer::config::ImporterConfig;
use cityguide_importer::images::assign_images;
use cityguide_importer::import::Importer;
use cityguide_importer::input::{is_stop, parse_line, PlaceQuery, STOP};
use cityguide_importer::nominatim::NominatimClient;

#[derive(Parser, Debug)]
#[command(
    name = "cityguide-importer",
    version,
    about = "Import places from OpenStreetMap and assign place images"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Geocode places with Nominatim and create them through the API
    Places {
        /// Queries such as `park (2)` or `['park (2)', 'biblioteka']`.
        /// Read from stdin until `stop` when omitted.
        queries: Vec<String>,
    },
    /// Assign image files to places, oldest file to lowest place id
    Images {
        /// Directory holding the uploaded images
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cityguide_importer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ImporterConfig::from_env().context("Invalid importer configuration")?;
    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;
    let api = CityGuideClient::new(http.clone(), config.api_url.clone());

    match cli.command {
        Commands::Places { queries } => {
            let queries = if queries.is_empty() {
                read_queries_interactive().await?
            } else {
                parse_args(&queries)?
            };
            if queries.is_empty() {
                tracing::warn!("No queries given, nothing to import");
                return Ok(());
            }

            let nominatim = NominatimClient::new(
                http,
                config.nominatim_url.clone(),
                config.user_agent.clone(),
            );
            let importer = Importer::new(api, nominatim, config.city.clone(), config.submit_delay);
            let summary = importer.run(&queries).await?;
            println!(
                "Collected {} places, submitted {} ({} queries)",
                summary.collected,
                summary.submitted,
                summary.queries.len()
            );
        }
        Commands::Images { dir } => {
            let updated = assign_images(&api, &dir)
                .await
                .with_context(|| format!("Failed to assign images from {}", dir.display()))?;
            println!("Updated {updated} places");
        }
    }

    Ok(())
}

fn parse_args(args: &[String]) -> anyhow::Result<Vec<PlaceQuery>> {
    let mut queries = Vec::new();
    for arg in args {
        let parsed = parse_line(arg).with_context(|| format!("Invalid query '{arg}'"))?;
        queries.extend(parsed);
    }
    Ok(queries)
}

/// Read query lines from stdin until `stop` or end of input.
async fn read_queries_interactive() -> anyhow::Result<Vec<PlaceQuery>> {
    println!(
        "Enter place names, one per line or as a list. Type '{STOP}' to finish."
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut queries = Vec::new();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if is_stop(&line) {
            break;
        }
        match parse_line(&line) {
            Ok(parsed) => queries.extend(parsed),
            Err(e) => tracing::warn!(line = %line, error = %e, "Ignoring invalid input"),
        }
    }
    Ok(queries)
}
