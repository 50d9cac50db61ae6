use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shopchat_client::ShopClient;
use shopchat_common::ShopChatConfig;
use shopchat_core::backend::HttpBackend;
use shopchat_core::{format_reply, BlockRenderer, ChatSession, DisplayBlock, PlainRenderer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;

mod logging;

#[derive(Parser)]
#[command(name = "shopchat")]
#[command(about = "Terminal chat client for the ShopBot customer-support assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Backend base URL (overrides config and SHOPCHAT_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat (default)
    Interactive,
    /// Ask a single question and print the formatted reply
    Ask {
        question: String,
        /// Print display blocks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Format a reply read from a file (or stdin) without contacting the backend
    Format {
        /// Path to the reply text; stdin when omitted
        file: Option<PathBuf>,
        /// Print display blocks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show backend health, categories and brands
    Status,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Format { file, json }) => {
            logging::init_stderr(cli.debug);
            format_command(file.as_deref(), json).await
        }
        Some(Commands::Ask { question, json }) => {
            logging::init_stderr(cli.debug);
            let config = load_config(cli.endpoint).await?;
            ask_command(&config, &question, json).await
        }
        Some(Commands::Status) => {
            logging::init_stderr(cli.debug);
            let config = load_config(cli.endpoint).await?;
            status_command(&config).await
        }
        Some(Commands::Interactive) | None => {
            let config = load_config(cli.endpoint).await?;
            logging::init_file(&config, cli.debug)?;
            let client = ShopClient::from_config(&config)?;
            shopchat_tui::run_interactive(client).await
        }
    }
}

async fn load_config(endpoint: Option<String>) -> Result<ShopChatConfig> {
    let mut config = ShopChatConfig::load().await?;
    config.apply_overrides(endpoint, None);
    Ok(config)
}

/// Plain text or pretty JSON, as requested on the command line.
pub fn render_output(blocks: &[DisplayBlock], json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(blocks)?)
    } else {
        Ok(PlainRenderer.render_blocks(blocks))
    }
}

async fn format_command(file: Option<&Path>, json: bool) -> Result<()> {
    let text = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };
    let blocks = format_reply(&text);
    tracing::debug!("formatted {} blocks", blocks.len());
    println!("{}", render_output(&blocks, json)?);
    Ok(())
}

async fn ask_command(config: &ShopChatConfig, question: &str, json: bool) -> Result<()> {
    let client = ShopClient::from_config(config)?;
    let mut session = ChatSession::new(Arc::new(HttpBackend::new(client)));
    let Some(turn) = session.send(question).await? else {
        anyhow::bail!("question is empty");
    };
    let blocks = turn.blocks().unwrap_or_default();
    println!("{}", render_output(&blocks, json)?);
    Ok(())
}

async fn status_command(config: &ShopChatConfig) -> Result<()> {
    let client = ShopClient::from_config(config)?;
    println!("Backend: {}", client.base_url());

    let health = client.health().await?;
    let state = if health.is_connected() { "Connected" } else { "Disconnected" };
    println!("Status: {state}");

    let categories = client.categories().await?;
    println!("\nCategories ({}):", categories.len());
    for category in &categories {
        println!("  • {} ({} products)", category.name, category.product_count);
    }

    let brands = client.brands().await?;
    println!("\nBrands ({}):", brands.len());
    for brand in &brands {
        println!("  • {} ({} products)", brand.name, brand.product_count);
    }
    Ok(())
}
