use anyhow::{Context, Result};
use clap::Parser;
use media_gallery_feed::{
    adapters::inbound::http::router::create_router,
    app::{youtube_channel_from_lookup, AppBuilder, AppConfig, StorageSettings},
    domain::models::FeedKind,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "media-feed-server")]
#[command(about = "Serves image and video feeds resolved from a storage bucket", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Storage backend type (supabase, s3, memory, none); detected from the environment when unset
    #[arg(long)]
    storage_backend: Option<String>,

    /// Channel id of the live stream
    #[arg(long)]
    youtube_channel_id: Option<String>,

    /// Skip loading the feeds at startup
    #[arg(long, default_value = "false")]
    no_preload: bool,

    /// Log level or tracing filter directive
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let env = |key: &str| std::env::var(key).ok();

        let mut settings = StorageSettings::from_lookup(&env);
        if let Some(backend) = &self.storage_backend {
            settings.backend = Some(backend.clone());
        }

        let youtube_channel_id = self
            .youtube_channel_id
            .clone()
            .or_else(|| youtube_channel_from_lookup(&env));

        AppConfig::from_settings(settings, youtube_channel_id)
            .context("Invalid storage configuration")
    }

    fn init_logging(&self) -> Result<()> {
        let env_filter = EnvFilter::try_new(&self.log_level)
            .or_else(|_| EnvFilter::try_new("info"))
            .context("Failed to build log filter")?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to install tracing subscriber")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging()?;

    info!("Starting media feed server");

    // Create app configuration
    let config = cli.to_app_config()?;
    info!(backend = ?config.storage_backend, "Storage configuration loaded");

    // Build the application
    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    if !cli.no_preload {
        for kind in FeedKind::ALL {
            app_services.feed_service.activate(kind);
        }
    }

    // Create the router
    let router = create_router(app_services.app_state());

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .context("Invalid bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening on http://{}", addr);

    // Start the server
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to start server")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "media-feed-server",
            "--port",
            "8080",
            "--storage-backend",
            "memory",
            "--youtube-channel-id",
            "UC123",
        ]);

        assert_eq!(cli.port, 8080);
        assert_eq!(cli.storage_backend.as_deref(), Some("memory"));
        assert!(!cli.no_preload);
    }

    #[test]
    fn test_flags_override_environment() {
        let cli = Cli::parse_from([
            "media-feed-server",
            "--storage-backend",
            "memory",
            "--youtube-channel-id",
            "UC123",
        ]);

        let config = cli.to_app_config().unwrap();
        assert_eq!(
            config.storage_backend,
            media_gallery_feed::app::StorageBackend::InMemory
        );
        assert_eq!(config.youtube_channel_id.as_deref(), Some("UC123"));
    }
}
