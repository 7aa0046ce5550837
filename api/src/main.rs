use actix_web::HttpServer;
use dotenv::dotenv;
use sid_api::{create_app, telemetry, Config};
use sid_core::errors::log_keys;
use sid_core::i18n::MessageSource;
use sid_api::i18n::MESSAGES;
use sid_shared::Environment;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Environment specific file first, then the plain .env
    dotenv::from_filename(Environment::from_env().env_file()).ok();
    dotenv().ok();

    let config = Config::from_env()?;
    telemetry::init(&config.app.logging)?;

    let bind_address = config.bind_address();
    let workers = config.app.server.workers;

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(&app_config));
    if workers > 0 {
        server = server.workers(workers);
    }
    let server = server.bind(&bind_address)?;

    info!(
        environment = %config.app.environment,
        "{}",
        MESSAGES.message(log_keys::BOOT, &[bind_address.clone()], config.error.default_language)
    );

    server.run().await?;
    Ok(())
}
