use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::config::rest_config_from_env_values;

/// Main entry point for the triage service
///
/// Serves the REST API (with Swagger UI at `/swagger-ui`) on the configured address.
///
/// # Environment Variables
/// - `TRIAGE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `TRIAGE_CORS_ORIGINS`: comma-separated allowed origins (default: any origin)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage_run=info".parse()?)
                .add_directive("triage_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = rest_config_from_env_values(
        std::env::var("TRIAGE_REST_ADDR").ok(),
        std::env::var("TRIAGE_CORS_ORIGINS").ok(),
    )?;

    tracing::info!("++ Starting triage REST on {}", cfg.addr());
    if cfg.cors_origins().is_empty() {
        tracing::warn!("TRIAGE_CORS_ORIGINS not set; allowing any origin");
    }

    let app = api_rest::router(&cfg);
    let listener = tokio::net::TcpListener::bind(cfg.addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
