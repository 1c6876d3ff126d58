use std::time::Duration;
use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tokio::time::timeout;
use tracing::{error, info};
use iqx_dockbooking::config::Settings;
use iqx_dockbooking::controllers;
use iqx_dockbooking::init;
use iqx_dockbooking::utils::logging;

/// The main entry point of the IQX Dock Booking service
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}


/// The core logic of the IQX Dock Booking service
///
/// This asynchronous function performs the following steps:
/// 1. Loads application settings from configuration files
/// 2. Initializes the logging system
/// 3. Builds the dock registry, booking store and scheduler
/// 4. Spawns a task to run the `EventHandler`
/// 5. Serves the HTTP API until a shutdown signal is received
///
/// # Returns
///
/// * `Ok(())` if the application runs successfully and shuts down gracefully
/// * `Err(anyhow::Error)` if any errors occur during initialization or while serving
async fn run() -> Result<()> {
    let settings = Settings::new()?;
    let _guard = logging::init_logger(&settings.logging)?;

    let context = init::initialize(settings)?;
    let app = controllers::router(context.app_state());

    let event_handler = context.event_handler.clone();
    let events = tokio::spawn(async move { event_handler.run().await });

    let address = context.settings.server.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Received shutdown signal. Shutting down gracefully...");
        })
        .await?;

    // the scheduler owns the event sender; dropping it lets the handler drain and stop
    drop(context);
    match timeout(Duration::from_secs(5), events).await {
        Ok(Ok(handled)) => info!("Event handler finished after {} events", handled),
        Ok(Err(e)) => error!("Event handler task failed: {:?}", e),
        Err(_) => error!("Event handler did not drain within 5 seconds"),
    }
    Ok(())
}
