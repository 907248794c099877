mod commands;

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use subtitler_core::{
    bootstrap::{init_manager, load_config},
    logging, PostFilters, ProviderContext,
};

#[derive(Parser, Debug)]
#[command(name = "subtitler")]
#[command(about = "Subtitle search aggregator", long_about = None)]
struct Args {
    /// Config file (YAML or TOML)
    #[arg(long, env = "SUBTITLER_CONFIG_PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search every enabled provider, or one with --provider
    Search {
        /// Free-text query
        term: String,

        /// Restrict the search to one provider key
        #[arg(long)]
        provider: Option<String>,

        /// Keep only subtitles of this year
        #[arg(long)]
        year: Option<u32>,

        /// Release group filter
        #[arg(long)]
        group: Option<String>,

        /// Quality filter (e.g. BluRay, WEB-DL)
        #[arg(long)]
        quality: Option<String>,

        /// Resolution filter (e.g. 1080p)
        #[arg(long)]
        resolution: Option<String>,
    },

    /// Download one subtitle file
    Download {
        /// Provider key
        provider: String,

        /// Subtitle id as returned by search
        id: String,

        /// Output directory
        #[arg(long, short, default_value = ".")]
        output: String,
    },

    /// List configured providers
    Providers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load configuration
    let mut config = load_config(args.config.as_deref())?;

    // 2. Providers missing credentials are switched off; anything else is fatal
    let disabled = config.disable_incomplete_providers();
    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s)",
            errors.len()
        ));
    }

    // 3. Initialize logging
    logging::init_logging(&config.logging)?;
    info!("Subtitler starting...");
    for issue in &disabled {
        warn!(%issue, "Provider disabled");
    }

    // 4. Build providers
    let manager = init_manager(&config)?;

    // 5. Ctrl-C cancels the in-flight operation
    let ctx = ProviderContext::new();
    let cancel = ctx.cancellation_token().clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Received Ctrl+C, cancelling");
                cancel.cancel();
            }
            Err(e) => error!("Failed to install Ctrl+C handler: {}", e),
        }
    });

    match args.command {
        Command::Search {
            term,
            provider,
            year,
            group,
            quality,
            resolution,
        } => {
            let filters = PostFilters {
                year,
                group,
                quality,
                resolution,
            };
            commands::search(&manager, &ctx, provider.as_deref(), &term, &filters).await
        }
        Command::Download { provider, id, output } => {
            commands::download(&manager, &ctx, &provider, &id, Path::new(&output)).await
        }
        Command::Providers => commands::providers(&manager),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_with_filters() {
        let args = Args::parse_from([
            "subtitler",
            "search",
            "the office",
            "--provider",
            "subdivx",
            "--year",
            "2005",
            "--quality",
            "WEB-DL",
        ]);
        match args.command {
            Command::Search {
                term,
                provider,
                year,
                quality,
                group,
                ..
            } => {
                assert_eq!(term, "the office");
                assert_eq!(provider.as_deref(), Some("subdivx"));
                assert_eq!(year, Some(2005));
                assert_eq!(quality.as_deref(), Some("WEB-DL"));
                assert!(group.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_download_default_output() {
        let args = Args::parse_from(["subtitler", "download", "subx", "66f0a1"]);
        match args.command {
            Command::Download { provider, id, output } => {
                assert_eq!(provider, "subx");
                assert_eq!(id, "66f0a1");
                assert_eq!(output, ".");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
