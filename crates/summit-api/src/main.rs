use summit_api::{setup, state::AppState, telemetry};
use summit_core::Config;

// Use mimalloc as the global allocator for better performance and lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    telemetry::init_tracing();

    let config = Config::from_env()?;
    let state = AppState::from_config(config.clone()).await?;
    let router = setup::routes::setup_routes(state)?;

    setup::server::start_server(&config, router).await?;

    Ok(())
}
