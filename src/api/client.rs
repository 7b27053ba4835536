//! HTTP client for the café backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, header::ACCEPT};
use serde_json::Value;
use tracing::debug;

use crate::{
    api::{
        ApiError, MenuApi,
        wire::{PreorderConfirmation, PreorderRequest, error_detail},
    },
    products::raw::RawProduct,
};

const PRODUCTS_PATH: &str = "/productos/ver_productos";
const PREORDER_PATH: &str = "/preordenes/crear_preorden";

/// [`MenuApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpMenuApi {
    base_url: String,
    http: Client,
}

impl HttpMenuApi {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:8000/api`).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl MenuApi for HttpMenuApi {
    #[tracing::instrument(name = "api.list_products", skip(self), err)]
    async fn list_products(&self) -> Result<Vec<RawProduct>, ApiError> {
        let url = self.url(PRODUCTS_PATH);

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| ApiError::unreachable(&url, &error))?;

        let response = ensure_success(response).await?;

        let records: Vec<Value> = response.json().await.map_err(ApiError::decode)?;

        debug!(count = records.len(), "fetched product records");

        Ok(records.into_iter().map(RawProduct::from_value).collect())
    }

    #[tracing::instrument(
        name = "api.create_preorder",
        skip(self, request),
        fields(lines = request.details.len()),
        err
    )]
    async fn create_preorder(
        &self,
        request: &PreorderRequest,
    ) -> Result<PreorderConfirmation, ApiError> {
        let url = self.url(PREORDER_PATH);

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|error| ApiError::unreachable(&url, &error))?;

        let response = ensure_success(response).await?;

        let body: Value = response.json().await.map_err(ApiError::decode)?;

        PreorderConfirmation::from_response(&body)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();

    let detail = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| error_detail(&body));

    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}
