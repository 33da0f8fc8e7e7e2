//! Interactive chat binary
//!
//! Run with: cargo run -p machinery-rag --bin machinery-chat -- --knowledge-base-id <KB_ID>

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use console::style;
use machinery_rag::{config::BackendProvider, RagConfig, RagPipeline};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "machinery-chat", version, about = "Chat with the heavy machinery knowledge base")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Generation backend (bedrock or ollama)
    #[arg(long)]
    backend: Option<BackendProvider>,

    /// Knowledge base to retrieve from
    #[arg(long)]
    knowledge_base_id: Option<String>,
}

const SEPARATOR: &str = "--------------------------------------------------";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "machinery_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Knowledge base: {}", config.bedrock.knowledge_base_id);
    tracing::info!("  - Max results: {}", config.retrieval.max_results);

    let pipeline = RagPipeline::from_config(&config)
        .await
        .context("failed to build pipeline")?;
    tracing::info!("  - Generation: {}", pipeline.backend());

    match pipeline.health_check().await {
        Ok(true) => tracing::info!("Generation backend is available"),
        Ok(false) => tracing::warn!("Generation backend is not available; answers may fail"),
        Err(e) => tracing::warn!("Generation backend health check failed: {}", e),
    }

    println!("{}", SEPARATOR);
    println!("  Welcome to the Heavy Machinery Knowledge Base Chat ");
    println!("{}", SEPARATOR);
    println!("Type 'quit' or 'exit' to end the chat.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", style("You:").bold().cyan());
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!("\nChat interrupted. Goodbye!");
                break;
            }
        };

        let Some(line) = line else {
            println!("\nChat ended. Goodbye!");
            break;
        };

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query.to_lowercase().as_str(), "quit" | "exit") {
            println!("Chat ended. Goodbye!");
            break;
        }

        let response = pipeline.chat(query).await;
        println!("\n{} {}\n", style("Bot:").bold().green(), response);
        println!("{}", SEPARATOR);
    }

    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<RagConfig> {
    let mut config = RagConfig::load(args.config.as_deref()).context("failed to load config")?;

    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if let Some(kb) = &args.knowledge_base_id {
        config.bedrock.knowledge_base_id = kb.clone();
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}
