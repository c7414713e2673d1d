use anyhow::Result;
use habits_api::{routes, AppState};
use hypershape::config::Config;
use hypershape::observability::init_tracing;
use hypershape::server::Server;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load_for_service("habits-api")?;

    init_tracing(&config)?;

    let state = AppState::seeded(config.clone())?;
    tracing::info!(
        habits = state.habits.len(),
        tags = state.tags.len(),
        mappings = state.pipeline.registry().len(),
        "seeded in-memory stores"
    );

    Server::new(config).serve(routes::router(state)).await?;

    Ok(())
}
