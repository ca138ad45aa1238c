//! Server startup utilities.

use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
   ______      __       __
  / ____/___ _/ /____  / /_  ____  __  __________
 / / __/ __ `/ __/ _ \/ __ \/ __ \/ / / / ___/ _ \
/ /_/ / /_/ / /_/  __/ / / / /_/ / /_/ (__  )  __/
\____/\__,_/\__/\___/_/ /_/\____/\__,_/____/\___/
    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(port: u16) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://0.0.0.0:{}/api/v1", port);
    info!("Health:    http://0.0.0.0:{}/health", port);
    info!("API Docs:  http://0.0.0.0:{}/swagger-ui", port);
    info!("{}", separator);
}
