//! HTTP client for the CityHub dashboard API.
//!
//! Wraps the dashboard REST contract (widget catalog, per-user layout
//! get/save/reset) using [`reqwest`], and implements the engine's
//! [`DashboardBackend`] port so a front end can drive a
//! `DashboardSession` straight over HTTP.

use async_trait::async_trait;
use cityhub_core::layout::SavedLayoutItem;
use cityhub_core::store::{DashboardBackend, StoreError};
use cityhub_core::types::DbId;
use cityhub_core::widget::WidgetDescriptor;
use serde::{Deserialize, Serialize};

/// HTTP client for one user's dashboard.
pub struct DashboardApi {
    client: reqwest::Client,
    base_url: String,
    user_id: DbId,
}

/// Errors from the dashboard REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Dashboard API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Wire envelope for the catalog endpoint.
#[derive(Debug, Deserialize)]
struct CatalogPayload {
    widgets: Vec<WidgetDescriptor>,
}

/// Wire envelope for the layout endpoints.
#[derive(Debug, Serialize, Deserialize)]
struct LayoutPayload {
    layout: Vec<SavedLayoutItem>,
}

impl DashboardApi {
    /// Create an API client for a user.
    ///
    /// * `base_url` - Base HTTP URL of the portal API, e.g.
    ///   `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>, user_id: DbId) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            user_id,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across widgets and pages).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        user_id: DbId,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            user_id,
        }
    }

    /// Fetch the widget catalog.
    ///
    /// Sends `GET /api/v1/widgets/catalog`.
    pub async fn get_catalog(&self) -> Result<Vec<WidgetDescriptor>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/v1/widgets/catalog", self.base_url))
            .send()
            .await?;

        let payload: CatalogPayload = Self::parse_response(response).await?;
        Ok(payload.widgets)
    }

    /// Fetch the user's saved layout.
    ///
    /// Sends `GET /api/v1/users/me/layout`. A 404 means the user has
    /// never saved a layout and maps to `Ok(None)`, not an error.
    pub async fn get_layout(&self) -> Result<Option<Vec<SavedLayoutItem>>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/v1/users/me/layout", self.base_url))
            .header("x-portal-user", self.user_id)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let payload: LayoutPayload = Self::parse_response(response).await?;
        Ok(Some(payload.layout))
    }

    /// Persist a layout snapshot.
    ///
    /// Sends `POST /api/v1/users/me/layout` with the `{layout: [...]}`
    /// envelope.
    pub async fn post_layout(&self, items: &[SavedLayoutItem]) -> Result<(), ApiError> {
        let body = LayoutPayload {
            layout: items.to_vec(),
        };

        let response = self
            .client
            .post(format!("{}/api/v1/users/me/layout", self.base_url))
            .header("x-portal-user", self.user_id)
            .json(&body)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Discard the user's saved layout (reset to default).
    ///
    /// Sends `DELETE /api/v1/users/me/layout`. Returns `false` when there
    /// was nothing to delete.
    pub async fn reset_layout(&self) -> Result<bool, ApiError> {
        let response = self
            .client
            .delete(format!("{}/api/v1/users/me/layout", self.base_url))
            .header("x-portal-user", self.user_id)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }

        Self::check_status(response).await?;
        Ok(true)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

impl From<ApiError> for StoreError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Request(e) if e.is_decode() => StoreError::Malformed(e.to_string()),
            ApiError::Request(e) => StoreError::Transport(e.to_string()),
            ApiError::Api { status, body } => StoreError::Backend {
                status,
                message: body,
            },
        }
    }
}

#[async_trait]
impl DashboardBackend for DashboardApi {
    async fn load_catalog(&self) -> Result<Vec<WidgetDescriptor>, StoreError> {
        Ok(self.get_catalog().await?)
    }

    async fn load_layout(&self) -> Result<Option<Vec<SavedLayoutItem>>, StoreError> {
        Ok(self.get_layout().await?)
    }

    async fn save_layout(&self, items: &[SavedLayoutItem]) -> Result<(), StoreError> {
        Ok(self.post_layout(items).await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
