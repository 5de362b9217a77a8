use std::net::IpAddr;
use std::path::PathBuf;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use taskdeck::{api, config::ProxyConfig};

/// Serves the task page and forwards /api/tasks to the task backend.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Backend tasks resource URL (overrides API_BASE_URL)
    #[arg(long)]
    api_base_url: Option<String>,

    /// Directory holding index.html and its assets (overrides STATIC_DIR)
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = ProxyConfig::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(url) = cli.api_base_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(dir) = cli.static_dir {
        config.static_dir = dir;
    }

    api::serve(&config).await?;
    Ok(())
}
