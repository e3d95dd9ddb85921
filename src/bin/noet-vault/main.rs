//! noet-vault CLI tool
//!
//! Command-line interface for querying a directory of markdown notes.
//!
//! ## Commands
//!
//! - `list`: All note slugs
//! - `show <slug>`: One note with its frontmatter
//! - `links <slug>`: Wiki-link targets of a note
//! - `search <query>`: Fuzzy (default) or exact word search
//! - `relevant <slug>`: Notes reachable from a note by following links
//! - `serve`: HTTP API over the vault (requires the `service` feature)
//!
//! Results are printed as JSON. Settings come from `--config` (default `noet-vault.toml`, optional),
//! then the `OBSIDIAN_VAULT_PATH` / `NOET_VAULT_PORT` environment variables, then `--root`.

use clap::{Parser, Subcommand};
use noet_vault::{
    config::VaultConfig,
    query::{RelevanceParams, SearchQuery},
    Vault,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "noet-vault")]
#[command(author, version, about = "Query a vault of linked markdown notes", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "noet-vault.toml")]
    config: PathBuf,

    /// Vault directory, overriding config and environment
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every note slug
    List,

    /// Print a note
    Show {
        slug: String,
    },

    /// Print the wiki-link targets of a note
    Links {
        slug: String,
    },

    /// Search note bodies
    Search {
        /// Query of at most `search.max_query_words` words
        query: String,

        /// Exact word lookup instead of approximate matching
        #[arg(long)]
        exact: bool,
    },

    /// Find notes reachable from a note by following links
    Relevant {
        slug: String,

        /// Maximum link hops from the starting note
        #[arg(long)]
        max_hops: Option<usize>,

        /// Characters of each note body to include
        #[arg(long)]
        char_limit: Option<usize>,
    },

    /// Serve the vault over HTTP
    #[cfg(feature = "service")]
    Serve {
        /// Port to bind, overriding config and environment
        #[arg(long)]
        port: Option<u16>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = VaultConfig::from_file(&cli.config)?.with_env_overrides()?;
    if let Some(root) = cli.root {
        config.root = root;
    }

    let vault = Vault::load_with(&config)?;

    match cli.command {
        Commands::List => print_json(&vault.list_slugs()),

        Commands::Show { slug } => print_json(vault.get(&slug)?),

        Commands::Links { slug } => print_json(&vault.links(&slug)?),

        Commands::Search { query, exact } => {
            let query = SearchQuery::parse(query, exact, config.search.max_query_words)?;
            print_json(&vault.run_search(&query))
        }

        Commands::Relevant {
            slug,
            max_hops,
            char_limit,
        } => {
            let defaults = RelevanceParams::from(config.relevant);
            let params = RelevanceParams {
                max_hops: max_hops.unwrap_or(defaults.max_hops),
                char_limit: char_limit.unwrap_or(defaults.char_limit),
            };
            print_json(&vault.find_relevant_notes_with(&slug, params)?)
        }

        #[cfg(feature = "service")]
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(async {
                let shutdown = async {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
                        std::future::pending::<()>().await;
                    }
                    println!("\nShutting down...");
                };
                noet_vault::service::serve(std::sync::Arc::new(vault), config, shutdown).await
            })?;
            Ok(())
        }
    }
}
