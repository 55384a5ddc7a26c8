mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "vetdir-cli")]
#[command(about = "Veterinary directory extraction and resolution tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse the catalog document and print its records
    Catalog {
        /// Catalog file (defaults to `VETDIR_CATALOG_PATH`)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Resolve the district of a postal address
    District {
        /// Address text, e.g. "3 Rue de Passy, 75016 Paris"
        address: String,
    },
    /// Find catalog cards for the district mentioned in a question
    Ask {
        /// The user's question, e.g. "un véto dans le 16e ?"
        utterance: String,
        /// Catalog file (defaults to `VETDIR_CATALOG_PATH`)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Split an assistant reply into display text and venue cards
    Reply {
        /// Reply file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Convert a map link into its embeddable form
    Embed {
        /// Map link, e.g. "https://www.google.com/maps?q=Clinique"
        url: String,
    },
    /// Render a catalog document from place-search results
    Render {
        /// JSON file holding an array of places or a `{"results": [...]}` page
        places_json: PathBuf,
        /// City name for the document header (defaults to the city profile)
        #[arg(long)]
        city: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = vetdir_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let profile = config.city_profile()?;

    match cli.command {
        Commands::Catalog { path } => {
            commands::run_catalog(&path.unwrap_or_else(|| config.catalog_path.clone()))
        }
        Commands::District { address } => commands::run_district(&address, &profile),
        Commands::Ask { utterance, path } => commands::run_ask(
            &utterance,
            &path.unwrap_or_else(|| config.catalog_path.clone()),
            &profile,
        ),
        Commands::Reply { file } => commands::run_reply(file.as_deref(), &profile),
        Commands::Embed { url } => commands::run_embed(&url),
        Commands::Render { places_json, city } => {
            commands::run_render(&places_json, city.as_deref().unwrap_or(&profile.name))
        }
    }
}
