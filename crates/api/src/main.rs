use anyhow::Context;

use poview_infra::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    poview_observability::init();

    let config = ApiConfig::load().context("failed to load api config")?;
    let store = poview_api::app::services::build_store(&config)
        .await
        .context("failed to initialise purchase order store")?;

    let app = poview_api::app::build_app(store);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
