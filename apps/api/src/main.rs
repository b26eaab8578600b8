mod analysis;
mod config;
mod errors;
mod llm_client;
mod routes;
mod scrape;
mod skills;
mod state;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::JobAnalyzer;
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::scrape::extract::extract_description;
use crate::scrape::fetcher::HttpPageFetcher;
use crate::skills::dictionary::SkillDictionary;
use crate::skills::matcher::SkillMatcher;
use crate::state::AppState;

const SAMPLE_JOB_URL: &str =
    "https://realpython.github.io/fake-jobs/jobs/senior-python-developer-0.html";

#[derive(Debug, Parser)]
#[command(name = "skillscan", version, about = "Job posting skill extraction service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Analyze one posting and print the skills found to stdout
    Demo {
        #[arg(long, default_value = SAMPLE_JOB_URL)]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting skillscan v{}", env!("CARGO_PKG_VERSION"));

    let (analyzer, ai_enabled) = build_analyzer(&config)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(analyzer, config, ai_enabled).await,
        Command::Demo { url } => run_demo(&analyzer, &url).await,
    }
}

/// Loads the dictionary and wires the fetcher and model client together.
/// Returns the analyzer and whether a model API key is configured.
fn build_analyzer(config: &Config) -> Result<(JobAnalyzer, bool)> {
    let dictionary = SkillDictionary::load(&config.skills_path)?;

    let llm = GeminiClient::from_config(config).context("Failed to build Gemini client")?;
    let ai_enabled = llm.has_api_key();
    config.check_startup(&dictionary, ai_enabled)?;
    if ai_enabled {
        info!("API key loaded successfully (model: {})", llm.model());
    }

    let matcher = SkillMatcher::new(dictionary).context("Failed to compile skill pattern")?;
    let fetcher = HttpPageFetcher::new(Duration::from_secs(config.fetch_timeout_secs))
        .context("Failed to build page fetcher")?
        .with_max_body_bytes(config.fetch_max_body_bytes);

    let analyzer = JobAnalyzer::new(Arc::new(fetcher), Arc::new(matcher), Arc::new(llm));
    Ok((analyzer, ai_enabled))
}

async fn serve(analyzer: JobAnalyzer, config: Config, ai_enabled: bool) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("HOST/PORT do not form a valid socket address")?;

    let state = AppState {
        analyzer,
        config,
        ai_enabled,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Manual smoke test: prints dictionary and AI results for one posting.
async fn run_demo(analyzer: &JobAnalyzer, url: &str) -> Result<()> {
    let html = match analyzer.fetcher().fetch(url).await {
        Ok(html) => html,
        Err(e) => {
            println!("{}", e.to_marked_message());
            return Ok(());
        }
    };

    let description = extract_description(&html);
    let findings = analyzer.find_skills(&description).await;

    println!("--- Skills Found ---");
    println!("{:?}", findings.matched.iter().collect::<Vec<_>>());

    println!("\n--- Testing AI Extraction ---");
    println!("{:?}", findings.ai_extracted);

    Ok(())
}
