use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eval_server::{AppState, CompletionJudges, router};
use hybrid_engine::HybridConfig;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "eval_server", about = "HTTP chess position evaluator")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// TOML config file; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => HybridConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => HybridConfig::default(),
    };

    let app = router(AppState::new(config, Arc::new(CompletionJudges)));
    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    info!(addr = %args.bind, "evaluation API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
