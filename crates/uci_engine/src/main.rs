mod session;

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hybrid_engine::{CompletionClient, HybridConfig, HybridEngine};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use session::{Flow, Session};

#[derive(Parser, Debug)]
#[command(name = "uci_engine", about = "UCI front-end for the hybrid engine")]
struct Args {
    /// TOML config file; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // stdout belongs to the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => HybridConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => HybridConfig::default(),
    };

    let engine = match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => {
            let client = CompletionClient::new(&config.judge, key)?;
            info!(endpoint = client.endpoint(), "judging leaves with completion service");
            HybridEngine::with_judge(config, client)
        }
        _ => {
            warn!("OPENAI_API_KEY not set, using heuristic leaves");
            HybridEngine::heuristic(config)
        }
    };

    let mut session = Session::new(engine);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if session.handle(&line, &mut stdout)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}
