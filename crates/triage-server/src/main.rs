use tracing_subscriber::EnvFilter;

use triage_server::config::ServerConfig;
use triage_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging; CloudWatch picks it up when running in Lambda
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    let engine = config.engine()?;
    let state = AppState::new(engine, config.session_ttl);
    let app = triage_server::build_router(state);

    if config.lambda {
        tracing::info!(min_probability = config.min_probability, "starting lambda handler");
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, min_probability = config.min_probability, "triage server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
