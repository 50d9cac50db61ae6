use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    shopchat_cli::run_cli().await
}
