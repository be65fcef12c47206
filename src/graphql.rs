use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;

use crate::config::ConnectionConfig;
use crate::error::TransportError;

pub const GRAPHQL_PATH: &str = "/v1/graphql";

/// Selects the single shared default record.
pub const SHARED_CONFIG_QUERY: &str = r#"
{
  Get {
    ELYSIA_CONFIG__(
      where: {
        operator: And
        operands: [
          { path: ["user_id"], operator: Equal, valueText: "shared" }
          { path: ["default"], operator: Equal, valueBoolean: true }
        ]
      }
      limit: 1
    ) {
      name
      config_id
      user_id
      default
      settings
      frontend_config
      _additional { id }
    }
  }
}
"#;

/// `https://host/` and `https://host` yield the same endpoint.
pub fn graphql_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), GRAPHQL_PATH)
}

#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    query: &'a str,
}

/// Executes a GraphQL query against the store and returns the raw body of
/// a successful (2xx) response.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn execute(
        &self,
        connection: &ConnectionConfig,
        query: &str,
    ) -> Result<Vec<u8>, TransportError>;
}

pub struct HttpGraphqlTransport {
    client: reqwest::Client,
}

impl HttpGraphqlTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl GraphqlTransport for HttpGraphqlTransport {
    async fn execute(
        &self,
        connection: &ConnectionConfig,
        query: &str,
    ) -> Result<Vec<u8>, TransportError> {
        let url = graphql_endpoint(&connection.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(connection.auth_token.expose_secret())
            .json(&QueryBody { query })
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
