use folio_config::Config;
use folio_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{
    email,
    environment::{ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!(
        "Portfolio contact api {} (recipient {})",
        env!("CARGO_PKG_VERSION"),
        config.contact.email
    );

    info!("Connecting to smtp server");
    let email = email::connect(&config.email).await?;
    if let Err(err) = email.ping().await {
        // not fatal, the server may become reachable later
        warn!("Failed to ping smtp server: {err:#}");
    }

    let provider = Provider::new(ConfigProvider::new(&config), email);
    let server = provider.rest_server();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}
