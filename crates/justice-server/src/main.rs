//! JusticeAI: legal question answering and document analysis server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use justice_core::config::{APP_NAME, APP_VERSION};
use justice_core::{JusticeConfig, KnowledgeBase};

mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = JusticeConfig::from_env();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--validate" | "validate" => {
                if let Some(dir) = args.get(2) {
                    config.data_dir = Some(PathBuf::from(dir));
                }
                match KnowledgeBase::load(&config) {
                    Ok(kb) => {
                        println!(
                            "Datasets OK: {} FAQ entries, {} risk terms, {} glossary terms",
                            kb.faq().len(),
                            kb.risk_terms().high.len() + kb.risk_terms().medium.len(),
                            kb.glossary().terms.len()
                        );
                        return Ok(());
                    }
                    Err(e) => {
                        eprintln!("Invalid datasets: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            "--help" | "-h" | "help" => {
                println!("{} {}: legal assistant server", APP_NAME, APP_VERSION);
                println!();
                println!("Usage: justiceai [command]");
                println!();
                println!("Commands:");
                println!("  (none)                   Start the server");
                println!("  validate [data-dir]      Load and validate the datasets");
                println!("  help                     Show this help message");
                println!();
                println!("Environment: PORT, JUSTICE_SIMILARITY_THRESHOLD, JUSTICE_SUMMARY_RATIO,");
                println!("             JUSTICE_MAX_UPLOAD_MB, JUSTICE_DATA_DIR, RUST_LOG");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'justiceai help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let kb = KnowledgeBase::load(&config)?;
    let port = config.port;
    let state = Arc::new(AppState::new(config, kb)?);

    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("{} {} listening on {}", APP_NAME, APP_VERSION, addr);

    axum::serve(listener, app).await?;

    Ok(())
}
