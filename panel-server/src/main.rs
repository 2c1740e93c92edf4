use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use panel_llm_sdk::gemini::GeminiClient;
use panel_llm_sdk::LlmClient;
use panel_server::config::AppConfig;
use panel_server::handlers::AppState;
use panel_server::routes::configure_routes;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "sqlite_panel=info,panel_server=info,actix_web=info";

#[derive(Parser, Debug)]
#[command(name = "sqlite-panel", version, about = "Browser-based SQLite administration panel")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    tracing::info!("Starting SQLite panel");

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    tracing::info!(
        "Default database: {} (busy timeout {} ms)",
        config.database.default_path,
        config.database.busy_timeout_ms
    );

    let llm_client: Option<Arc<dyn LlmClient>> = match config.llm.gemini_api_key.as_deref() {
        Some(api_key) => {
            let client = GeminiClient::new(api_key)
                .context("Failed to create Gemini client")?
                .with_model(config.llm.gemini_model.clone());
            tracing::info!("SQL generation enabled with model {}", client.model());
            let client: Arc<dyn LlmClient> = Arc::new(client);
            Some(client)
        }
        None => {
            tracing::warn!("No Gemini API key configured; SQL generation is disabled");
            None
        }
    };

    let server_addr = config.bind_address();
    let allowed_origins = config.cors.allowed_origins.clone();
    let app_state = web::Data::new(AppState::new(config, llm_client));

    tracing::info!("Starting HTTP server on {}", server_addr);

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(configure_routes)
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run()
    .await
    .context("HTTP server error")?;

    Ok(())
}
