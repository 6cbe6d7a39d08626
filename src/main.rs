//! Apotheca backend entrypoint

use anyhow::Result;

use apotheca::config::AppConfig;
use apotheca::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    server::init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_yaml_file(&path)?,
        None => AppConfig::default(),
    };

    let state = AppState::new();
    if config.seed_demo_data {
        server::seed_demo_data(&state)?;
    }

    server::serve(&config, state).await
}
