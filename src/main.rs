use std::fs::{File, OpenOptions};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use chatrelay::connector::tui;
use chatrelay::{serve, Commands, Container, ContainerConfig, HttpRelayClient};

const CHAT_LOG_FILE: &str = "chat.log";

#[derive(Parser)]
#[command(name = "chatrelay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory for the chat client's log file
    #[arg(short, long, global = true, default_value = "~/.chatrelay")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    match cli.command {
        Commands::Serve {
            port,
            public,
            mock_provider,
        } => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_target(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;

            let host = if public {
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            } else {
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            };
            let listener = tokio::net::TcpListener::bind(SocketAddr::new(host, port)).await?;
            let container = Arc::new(Container::new(ContainerConfig::from_env(mock_provider)));

            serve(listener, container).await?;
        }

        Commands::Chat { server } => {
            // The terminal owns stdout/stderr while the UI runs.
            let log_path = init_file_logging(&expand_tilde(&cli.data_dir), level)?;
            info!("Chat client targeting {} (log: {})", server, log_path.display());

            tui::run(Arc::new(HttpRelayClient::new(server))).await?;
        }
    }

    Ok(())
}

fn init_file_logging(data_dir: &str, level: Level) -> Result<PathBuf> {
    let (path, file) = open_log_file(data_dir)?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(path)
}

fn open_log_file(data_dir: &str) -> Result<(PathBuf, File)> {
    std::fs::create_dir_all(data_dir)?;
    let path = PathBuf::from(data_dir).join(CHAT_LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
