//! HTTP access to the listing endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use autolist_core::automation::Automation;
use autolist_core::pipeline::PageResult;
use autolist_core::query::QueryDescriptor;

use crate::config::GatewayConfig;
use crate::error::ClientError;
use crate::url_state::encode_query;

/// Path of the listing endpoint, relative to the server base URL.
pub const AUTOMATIONS_PATH: &str = "automations";

/// Anything that can answer a listing query.
#[async_trait]
pub trait AutomationsApi: Send + Sync {
    async fn fetch_page(&self, query: &QueryDescriptor) -> Result<PageResult<Automation>, ClientError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// `reqwest`-backed client for the listing server.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: Client,
    base_url: String,
}

impl Gateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for `query`.
    pub fn automations_url(&self, query: &QueryDescriptor) -> Result<String, ClientError> {
        Ok(format!(
            "{}/{}?{}",
            self.base_url,
            AUTOMATIONS_PATH,
            encode_query(query)?
        ))
    }

    /// `GET {base}/automations?<query>`.
    pub async fn get_automations(
        &self,
        query: &QueryDescriptor,
    ) -> Result<PageResult<Automation>, ClientError> {
        let url = self.automations_url(query)?;
        debug!(%url, "Fetching automations");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            // A body that is not `{"message": ...}` still yields a status error.
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            warn!(status = status.as_u16(), ?message, "Listing request rejected");
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let page = response.json::<PageResult<Automation>>().await?;
        debug!(
            items = page.data.len(),
            total = page.pagination.total_items,
            "Fetched automations"
        );
        Ok(page)
    }
}

#[async_trait]
impl AutomationsApi for Gateway {
    async fn fetch_page(&self, query: &QueryDescriptor) -> Result<PageResult<Automation>, ClientError> {
        self.get_automations(query).await
    }
}
