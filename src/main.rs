use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use legalassist::connector::tui;
use legalassist::{
    Commands, Container, ContainerConfig, GeminiClient, GeminiConfig, GenerativeClient,
    ProxyClient,
};

#[derive(Parser)]
#[command(name = "legalassist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    match cli.command {
        Commands::Serve {
            port,
            public,
            timeout_secs,
        } => {
            let gemini = match GeminiConfig::from_env() {
                Ok(config) => config.with_timeout(timeout_secs.map(Duration::from_secs)),
                Err(e) => {
                    error!("{}", e);
                    std::process::exit(1);
                }
            };
            info!("Using model {}", gemini.model());

            let container = Container::new(ContainerConfig {
                port,
                public,
                gemini,
            });
            legalassist::serve(container).await?;
        }

        Commands::Chat {
            proxy_url,
            direct,
            timeout_secs,
        } => {
            let timeout = timeout_secs.map(Duration::from_secs);
            let client: Arc<dyn GenerativeClient> = if direct {
                let config = GeminiConfig::from_env()?.with_timeout(timeout);
                info!("Calling Gemini directly with model {}", config.model());
                Arc::new(GeminiClient::new(config))
            } else {
                let client = ProxyClient::new(&proxy_url, timeout);
                info!("Calling proxy at {}", client.url());
                Arc::new(client)
            };
            tui::run(client).await?;
        }
    }

    Ok(())
}

/// The chat UI owns the terminal, so without `--log-file` its logs are
/// dropped instead of written over the screen.
fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false);

    match (&cli.log_file, &cli.command) {
        (Some(path), _) => {
            let file = File::create(path)?;
            let subscriber = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        (None, Commands::Chat { .. }) => {
            let subscriber = builder.with_writer(std::io::sink).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        (None, Commands::Serve { .. }) => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}
