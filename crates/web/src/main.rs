use anyhow::Context;

use poview_infra::WebConfig;
use poview_web::app::{WebState, build_app};
use poview_web::fetch::PurchaseOrdersClient;
use poview_web::render::PageRenderer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    poview_observability::init();

    let config = WebConfig::load().context("failed to load web config")?;
    let client = PurchaseOrdersClient::new(&config.api_url);
    let renderer = PageRenderer::new()?;

    tracing::info!(api = %client.endpoint(), "fetching purchase orders from api");
    let app = build_app(WebState::new(client, renderer));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
