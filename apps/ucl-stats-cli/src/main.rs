use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

mod commands;
mod config;
mod error;
mod logging;

use config::AppConfig;
use error::CliResult;

#[derive(Parser, Debug)]
#[command(name = "ucl-stats")]
#[command(about = "UCL Stats - Load Champions League CSV statistics into SQLite and chart them")]
#[command(version)]
struct Cli {
    /// Configuration file (YAML); ./ucl-stats.yaml is used when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load every CSV file of a directory into the database
    Load {
        /// Directory containing the CSV files
        #[arg(long)]
        csv_dir: Option<PathBuf>,

        /// SQLite database file (created if missing)
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Run the analytical queries and write CSV extracts and charts
    Report {
        /// SQLite database file (must exist)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output directory for extracts and charts
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Only run the named query (repeatable)
        #[arg(short, long = "query")]
        queries: Vec<String>,
    },

    /// Load the CSV files, then run the reports
    Run {
        /// Directory containing the CSV files
        #[arg(long)]
        csv_dir: Option<PathBuf>,

        /// SQLite database file (created if missing)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output directory for extracts and charts
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Only run the named query (repeatable)
        #[arg(short, long = "query")]
        queries: Vec<String>,
    },

    /// Print the delimiter, headers and first rows of each CSV file
    Preview {
        /// Directory containing the CSV files
        #[arg(long)]
        csv_dir: Option<PathBuf>,

        /// Number of rows to show per file
        #[arg(short, long)]
        rows: Option<usize>,
    },

    /// List the available report queries
    Queries,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&config.log_level)?;
    debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Load { csv_dir, database } => {
            config.override_with(csv_dir, database, None);
            commands::load::execute(&config)
        }

        Commands::Report {
            database,
            output_dir,
            queries,
        } => {
            config.override_with(None, database, output_dir);
            commands::report::execute(&config, &queries)
        }

        Commands::Run {
            csv_dir,
            database,
            output_dir,
            queries,
        } => {
            config.override_with(csv_dir, database, output_dir);
            commands::run::execute(&config, &queries)
        }

        Commands::Preview { csv_dir, rows } => {
            config.override_with(csv_dir, None, None);
            if let Some(rows) = rows {
                config.preview_rows = rows;
            }
            commands::preview::execute(&config)
        }

        Commands::Queries => commands::queries::execute(),
    }
}
