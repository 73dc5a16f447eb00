use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eyre::{Context, Result, eyre};
use sift_core::Settings;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub mod manifest;
pub mod overlay;
pub mod search;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Index location (file path or http(s) URL); overrides the config file
    #[arg(long, global = true, env = "SIFT_SOURCE")]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the entries matching a query
    Search {
        /// Text to look for in titles and categories
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Browse the index with a toggleable search overlay
    Overlay {
        /// Write logs to this file (the terminal is taken by the UI)
        #[arg(long, value_name = "FILE")]
        log_file: Option<PathBuf>,
    },

    /// Maintain the index file
    #[command(subcommand)]
    Manifest(manifest::Cmd),
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::new()?;
    if let Some(source) = cli.source {
        settings.source = source;
    }

    match cli.command {
        Commands::Search { query } => {
            init_tracing(cli.verbose);
            search::run(&settings, &query).await
        }
        Commands::Overlay { log_file } => {
            let _guard = match log_file {
                Some(path) => Some(init_file_tracing(cli.verbose, &path)?),
                None => None,
            };
            overlay::run(&settings).await
        }
        Commands::Manifest(cmd) => {
            init_tracing(cli.verbose);
            cmd.run()
        }
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::from_default_env();
    match format!("sift={}", level.as_str().to_lowercase()).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

fn init_tracing(verbose: bool) {
    // Console layer only for verbose mode; plain output stays clean
    let console_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
            .with_filter(env_filter(verbose))
    });

    tracing_subscriber::registry().with(console_layer).init();
}

fn init_file_tracing(verbose: bool, path: &Path) -> Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("log file path has no file name: {}", path.display()))?;

    fs_err::create_dir_all(dir).wrap_err("could not create log directory")?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(env_filter(verbose)),
        )
        .init();

    Ok(guard)
}
