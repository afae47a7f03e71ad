use anyhow::Result;
use geostuff_http::{AppState, create_router};
use std::sync::Arc;

use crate::open_service;

pub(crate) async fn run(database_url: &str, port: u16, host: String) -> Result<()> {
    let city_service = open_service(database_url).await?;
    let state = Arc::new(AppState { city_service });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
