use shared_config_service::config::{self, AppConfig};
use shared_config_service::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Values in .env win over the inherited environment.
    config::load_dotenv()?;

    let app_config = AppConfig::load()?;
    telemetry::init_tracing(&app_config.log_format);
    tracing::info!(
        env = %app_config.env,
        port = app_config.api_port,
        "starting shared config service"
    );

    if let Err(err) = shared_config_service::start_service(app_config).await {
        tracing::error!(error = ?err, "shared config service failed");
        return Err(err);
    }
    Ok(())
}
