//! Detection report: read-only HTML view over logged object-detection events.
//! Used by: binary entrypoint.

pub mod config;
pub mod console;
pub mod error;
pub mod handlers;
pub mod report;
pub mod server;
pub mod state;
pub mod store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env();
    let state = state::build_state(&config);

    console::print_banner();
    console::print_startup(&config.bind_addr, state.store.path());
    tracing::info!(db = %config.db_path.display(), "starting detection report on {}", config.bind_addr);

    server::run(state, &config.bind_addr).await?;
    Ok(())
}
