use sea_orm::{ConnectOptions, Database};
use tracing::{info, warn};

use prdgen_core::config::Config;
use prdgen_core::tracing::init_tracing;
use prdgen_prds::config::PrdConfig;
use prdgen_prds::domain::prompt::missing_placeholders;
use prdgen_prds::router::build_router;
use prdgen_prds::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = PrdConfig::from_env();
    if config.anthropic_api_key.is_none() {
        warn!("ANTHROPIC_API_KEY is not set; generation requests will fail");
    }
    match std::fs::read_to_string(&config.prompt_template_path) {
        Ok(template) => {
            let missing = missing_placeholders(&template);
            if !missing.is_empty() {
                warn!(?missing, "prompt template lacks placeholders");
            }
        }
        Err(e) => warn!(
            path = %config.prompt_template_path.display(),
            error = %e,
            "prompt template is unreadable; generation requests will fail"
        ),
    }

    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .connect_timeout(config.store_timeout())
        .acquire_timeout(config.store_timeout())
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to connect to database");

    let http_addr = format!("0.0.0.0:{}", config.prds_port);
    let state = AppState::new(db, config).expect("failed to build HTTP client");
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("prds service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
