use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::config::AppConfig;
use crate::error::SharedConfigError;
use crate::graphql::{GraphqlTransport, SHARED_CONFIG_QUERY};
use crate::model::{SharedConfigResponse, extract_records};

/// Reads the shared default config from the store. Holds no mutable state,
/// so one instance serves every request concurrently.
#[derive(Clone)]
pub struct SharedConfigService {
    config: Arc<AppConfig>,
    transport: Arc<dyn GraphqlTransport>,
}

impl SharedConfigService {
    pub fn new(config: Arc<AppConfig>, transport: Arc<dyn GraphqlTransport>) -> Self {
        Self { config, transport }
    }

    /// Performs exactly one upstream call. Every failure is terminal.
    pub async fn get_shared_config(&self) -> Result<SharedConfigResponse, SharedConfigError> {
        let connection = self.config.connection().inspect_err(|_| {
            error!("WCD_URL or WCD_TOKEN is not set; refusing to query the store");
        })?;

        let body = self
            .transport
            .execute(&connection, SHARED_CONFIG_QUERY)
            .await
            .map_err(|err| {
                warn!(error = %err, "shared config query failed");
                SharedConfigError::UpstreamUnavailable(err)
            })?;

        let records = extract_records(&body).inspect_err(|err| {
            warn!(error = %err, "unusable response from the store");
        })?;

        // limit:1 upstream; any extra match is ignored.
        let Some(record) = records.first() else {
            debug!("no shared default config in the store");
            return Err(SharedConfigError::NotFound);
        };

        let response = SharedConfigResponse::from_record(record);
        debug!(weaviate_id = %response.weaviate_id, "shared config loaded");
        Ok(response)
    }
}
