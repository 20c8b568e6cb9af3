//! CLI entry point for the ESG pure-dataset builder.
//!
//! Provides subcommands for cleaning a raw disclosure archive into one row per
//! instrument, downloading a source archive, and printing the effective
//! configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use esg_pure::analyzers::analyzer::clean_table;
use esg_pure::analyzers::types::PureDataset;
use esg_pure::{
    config::PipelineConfig,
    output::{summarize, to_csv_bytes, write_csv, write_json},
    parser::parse_source,
    source::Source,
    storage::{s3_client, upload_bytes, write_json_to_s3},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "esg_pure")]
#[command(about = "Build a per-instrument ESG dataset from raw disclosures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a raw disclosure archive or CSV into one row per instrument
    Clean {
        /// Local path, http(s) URL or s3://bucket/key of the ZIP or CSV
        #[arg(value_name = "SOURCE")]
        source: String,

        /// CSV file to write the cleaned dataset to
        #[arg(short, long, default_value = "esg_pure.csv")]
        output: String,

        /// Optional: also write the dataset as JSON to this path
        #[arg(long)]
        json: Option<String>,

        /// Optional: JSON pipeline configuration (columns, providers, taxonomy)
        #[arg(short, long)]
        config: Option<String>,

        /// Field delimiter of the raw CSV
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// Optional: S3 bucket to upload the cleaned CSV and JSON to
        #[arg(long)]
        s3_bucket: Option<String>,

        /// Key prefix for uploaded objects
        #[arg(long, default_value = "esg_pure")]
        s3_prefix: String,

        /// Gzip compress the CSV before uploading to S3
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Download a source archive to a local file
    Fetch {
        /// http(s) URL or s3://bucket/key to download
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Destination file
        #[arg(short, long)]
        output: String,
    },
    /// Print the effective pipeline configuration as JSON
    Taxonomy {
        /// Optional: JSON pipeline configuration to load instead of the defaults
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/esg_pure.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("esg_pure.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Clean {
            source,
            output,
            json,
            config,
            delimiter,
            s3_bucket,
            s3_prefix,
            gzip,
        } => {
            let config = PipelineConfig::load_or_default(config.as_deref())?;
            let delimiter = u8::try_from(delimiter)
                .with_context(|| format!("delimiter '{delimiter}' must be a single-byte character"))?;

            let source = Source::parse(&source)?;
            let bytes = source.load().await?;
            info!(source = %source, bytes = bytes.len(), "Source loaded");

            let table = parse_source(bytes, delimiter)
                .with_context(|| format!("failed to parse '{source}'"))?;
            let records = clean_table(&table, &config)?;
            summarize(&records);

            write_csv(&output, &records)?;
            info!(path = %output, "Cleaned dataset written");

            let dataset = PureDataset::new(records, config.taxonomy.version);
            if let Some(path) = json {
                write_json(&path, &dataset)?;
                info!(path = %path, "JSON dataset written");
            }

            match s3_bucket {
                Some(bucket) => {
                    let s3 = s3_client().await;
                    let csv = to_csv_bytes(&dataset.instruments)?;
                    upload_bytes(&s3, &bucket, &format!("{s3_prefix}/pure.csv"), csv, gzip).await?;
                    write_json_to_s3(&s3, &bucket, &format!("{s3_prefix}/pure.json"), &dataset)
                        .await?;
                }
                None => info!("S3 bucket not specified, skipping upload"),
            }
        }
        Commands::Fetch { source, output } => {
            let source = Source::parse(&source)?;
            let bytes = source.load().await?;
            std::fs::write(&output, &bytes)
                .with_context(|| format!("failed to write '{output}'"))?;
            info!(source = %source, path = %output, bytes = bytes.len(), "Source saved");
        }
        Commands::Taxonomy { config } => {
            let config = PipelineConfig::load_or_default(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
