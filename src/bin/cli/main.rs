use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use media_gallery_feed::{
    adapters::inbound::http::dto::{FeedSnapshotDto, LiveStreamDto, MediaListingDto},
    app::{create_app_from_env, AppServices},
    domain::{models::FeedKind, value_objects::Prefix},
    ports::services::{FeedService, MediaService},
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "media-feed-cli")]
#[command(about = "List and resolve media in the configured storage bucket", long_about = None)]
struct Cli {
    /// Log level or tracing filter directive
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Print compact instead of pretty JSON
    #[arg(long, default_value = "false")]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a feed and print its snapshot
    Feed {
        /// Feed name (images or videos)
        kind: FeedKind,
    },

    /// List and resolve the given prefixes
    List {
        /// Prefixes to walk, in order
        #[arg(required = true)]
        prefixes: Vec<String>,
    },

    /// Print the live-stream embed descriptor
    Live,
}

impl Cli {
    fn init_logging(&self) {
        let env_filter =
            EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        println!("{}", json);
        Ok(())
    }
}

async fn run(cli: &Cli, app: &AppServices) -> Result<()> {
    match &cli.command {
        Commands::Feed { kind } => {
            let snapshot = app.feed_service.load(*kind).await;
            cli.print(&FeedSnapshotDto::from(snapshot))
        }
        Commands::List { prefixes } => {
            let prefixes = Prefix::parse_all(prefixes).context("Invalid prefix")?;
            let listing = app
                .media_service
                .list_and_resolve(&prefixes)
                .await
                .context("Listing failed")?;
            cli.print(&MediaListingDto::from(listing))
        }
        Commands::Live => cli.print(&LiveStreamDto::from(&app.live_stream)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging();

    let app = create_app_from_env()
        .await
        .context("Failed to build application")?;

    run(&cli, &app).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_command_parsing() {
        let cli = Cli::parse_from(["media-feed-cli", "feed", "videos"]);

        match cli.command {
            Commands::Feed { kind } => assert_eq!(kind, FeedKind::Videos),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_list_requires_a_prefix() {
        assert!(Cli::try_parse_from(["media-feed-cli", "list"]).is_err());

        let cli = Cli::parse_from(["media-feed-cli", "list", "uploads/images", "images"]);
        match cli.command {
            Commands::List { prefixes } => assert_eq!(prefixes, vec!["uploads/images", "images"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
