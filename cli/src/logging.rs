use anyhow::Result;
use shopchat_common::ShopChatConfig;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn filter(debug: bool, default: &str) -> EnvFilter {
    if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    }
}

/// One-shot commands log warnings to stderr so stdout stays clean.
pub fn init_stderr(debug: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(debug, "warn"))
        .with_writer(std::io::stderr)
        .try_init();
}

/// The TUI owns the terminal, so logs go to the configured file.
pub fn init_file(config: &ShopChatConfig, debug: bool) -> Result<()> {
    let path = config.resolved_log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(debug, "info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    tracing::info!("logging to {}", path.display());
    Ok(())
}
