pub mod app;
pub mod chat;
pub mod interactive;
pub mod render;

use anyhow::Result;
use shopchat_client::ShopClient;
use shopchat_core::backend::HttpBackend;
use std::sync::Arc;

pub use app::*;
pub use interactive::*;
pub use render::LineRenderer;

/// Run the interactive chat against the backend behind `client`.
pub async fn run_interactive(client: ShopClient) -> Result<()> {
    tracing::info!("starting interactive chat against {}", client.base_url());
    let backend = Arc::new(HttpBackend::new(client.clone()));
    let mut app = InteractiveApp::new(backend, Some(client));
    app.run().await
}
