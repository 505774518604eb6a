//! REST transport for the hosted backend.

use crate::{BackendConfig, DatabaseResult, TableQuery};
use reqwest::{Client, Response};
use runscope_error::{BackendError, BackendErrorKind};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, instrument};

const REST_PATH: &str = "rest/v1";

/// Error payload returned by PostgREST and the auth gateway.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    msg: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.error_description)
            .or(self.msg)
            .or(self.error)
    }
}

/// Client for the backend's REST endpoint.
///
/// Constructed once at startup and handed to [`crate::MonitorRepository`].
/// The credential is static; there is no session and no token refresh.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseClient {
    /// Create a client from `config`.
    ///
    /// Never fails: an unconfigured client is logged and every request made
    /// through it returns [`BackendErrorKind::NotConfigured`].
    #[instrument(skip(config), fields(url = %config.url))]
    pub fn new(config: &BackendConfig) -> Self {
        if !config.is_configured() {
            error!("Creating backend client without URL or service key; requests will fail");
        } else {
            debug!("Creating backend client");
        }
        Self {
            client: Client::new(),
            base_url: config.url.trim().trim_end_matches('/').to_string(),
            service_key: config.service_key.trim().to_string(),
        }
    }

    fn table_url(&self, table: &str) -> DatabaseResult<String> {
        if self.base_url.is_empty() {
            return Err(BackendError::new(BackendErrorKind::NotConfigured(
                "endpoint URL is missing".to_string(),
            )));
        }
        if self.service_key.is_empty() {
            return Err(BackendError::new(BackendErrorKind::NotConfigured(
                "service key is missing".to_string(),
            )));
        }
        Ok(format!("{}/{}/{}", self.base_url, REST_PATH, table))
    }

    /// Fetch the rows matched by `query`.
    #[instrument(skip(self, query), fields(table = %query.table_name()))]
    pub async fn select<T: DeserializeOwned>(&self, query: &TableQuery) -> DatabaseResult<Vec<T>> {
        let url = self.table_url(query.table_name())?;
        debug!(?url, pairs = ?query.to_pairs(), "Selecting rows");

        let response = self
            .client
            .get(&url)
            .query(&query.to_pairs())
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Select request failed");
                BackendError::new(BackendErrorKind::Request(format!("Request failed: {}", e)))
            })?;

        let body = Self::success_body(response).await?;
        let rows: Vec<T> = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to decode rows");
            BackendError::new(BackendErrorKind::Decode(e.to_string()))
        })?;

        debug!(count = rows.len(), "Retrieved rows");
        Ok(rows)
    }

    /// Delete the rows matched by `query`'s filters.
    ///
    /// A query without filters is refused before any request is sent.
    #[instrument(skip(self, query), fields(table = %query.table_name()))]
    pub async fn delete(&self, query: &TableQuery) -> DatabaseResult<()> {
        if !query.has_filters() {
            error!("Refusing to delete without a row filter");
            return Err(BackendError::new(BackendErrorKind::Request(format!(
                "Refusing to delete every row of {}",
                query.table_name()
            ))));
        }
        let url = self.table_url(query.table_name())?;
        debug!(?url, pairs = ?query.filter_pairs(), "Deleting rows");

        let response = self
            .client
            .delete(&url)
            .query(&query.filter_pairs())
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=minimal")
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Delete request failed");
                BackendError::new(BackendErrorKind::Request(format!("Request failed: {}", e)))
            })?;

        Self::success_body(response).await?;
        debug!("Delete acknowledged");
        Ok(())
    }

    /// Body of a 2xx response, or the backend's message for anything else.
    async fn success_body(response: Response) -> DatabaseResult<String> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            BackendError::new(BackendErrorKind::Request(format!(
                "Failed to read response: {}",
                e
            )))
        })?;

        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        error!(status = status.as_u16(), %message, "Backend rejected request");
        Err(BackendError::new(BackendErrorKind::Api {
            status: status.as_u16(),
            message,
        }))
    }
}
