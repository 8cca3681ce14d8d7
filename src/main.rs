use anyhow::{Context, Result};
use brevo::config::Config;
use brevo::transport;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "brevo")]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), env!("BREVO_VERSION_SUFFIX")),
    about = "BREVO - Smart travel planner chat relay",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Agent backend base URL, overrides the config file
    #[arg(long, global = true, env = "BREVO_BACKEND_URL")]
    backend_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP relay (chat, weather, currency, expenses, places)
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Ask a single question and print the reply
    Ask {
        /// The question
        message: String,
    },

    /// Interactive chat in the terminal
    Chat {
        /// Initial message to send
        message: Option<String>,
    },

    /// Show the effective configuration
    Config,
}

fn load_config(cli: &Cli) -> Result<(Config, PathBuf)> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    let mut config = Config::load_from(&path)?;

    if let Some(url) = &cli.backend_url {
        config.backend.url = url.clone();
    }
    if let Commands::Serve { port, host } = &cli.command {
        if let Some(port) = port {
            config.server.port = *port;
        }
        if let Some(host) = host {
            config.server.host = host.clone();
        }
    }

    config.validate().context("Invalid configuration")?;
    Ok((config, path))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "brevo=debug,tower_http=debug"
    } else {
        "brevo=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (config, config_path) = load_config(&cli)?;

    match cli.command {
        Commands::Serve { .. } => {
            tracing::info!(
                "Starting BREVO relay on {}:{}",
                config.server.host,
                config.server.port
            );
            transport::http::run_http_server(&config).await?;
        }
        Commands::Ask { message } => {
            transport::cli::run_ask(&config, &message).await?;
        }
        Commands::Chat { message } => {
            transport::cli::run_chat(&config, message).await?;
        }
        Commands::Config => {
            transport::cli::run_show_config(&config, &config_path)?;
        }
    }

    Ok(())
}
