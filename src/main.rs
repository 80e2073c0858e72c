use anyhow::Context;
use sakuraguide::{app, AppState, Config, Store};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sakuraguide=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let store = Store::seed()?;
    tracing::info!(
        guides = store.guides.len(),
        travelers = store.travelers.len(),
        messages = store.messages.len(),
        "demo data loaded"
    );

    let app = app(AppState::new(store), &config);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("couldn't bind {}", config.bind))?;
    tracing::info!("listening on {}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
