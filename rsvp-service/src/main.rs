use log::{error, info};
use tokio::net::TcpListener;

use wedding_shared::config::Settings;

mod error;
mod handlers;
mod models;
mod routes;
mod state;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize env_logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting Wedding RSVP Service");

    let settings = Settings::from_env().map_err(|e| {
        error!("Refusing to start: {}", e);
        e
    })?;

    let app = routes::create_router(&settings);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    info!("Listening on {}", settings.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
