//! REST client for the city guide's own API.

use cityguide_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::mapping::PlaceDraft;

/// A category as listed by `GET /place_categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySummary {
    pub id: DbId,
    pub name: String,
}

/// The subset of a place the tools need.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSummary {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One page of `GET /places`.
#[derive(Debug, Deserialize)]
pub struct PlacePage {
    pub places: Vec<PlaceSummary>,
    pub total_pages: i64,
}

/// Errors from the city guide API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    /// The HTTP request itself failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("City guide API error ({status}): {body}")]
    ApiError { status: u16, body: String },
}

/// HTTP client for the city guide API.
pub struct CityGuideClient {
    client: reqwest::Client,
    api_url: String,
}

impl CityGuideClient {
    /// * `api_url` - Base URL including the `/api` prefix, e.g.
    ///   `http://127.0.0.1:5000/api`.
    pub fn new(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    /// `GET /place_categories`
    pub async fn place_categories(&self) -> Result<Vec<CategorySummary>, ApiClientError> {
        let response = self
            .client
            .get(format!("{}/place_categories", self.api_url))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `POST /places`, returning the created place.
    pub async fn create_place(&self, draft: &PlaceDraft) -> Result<PlaceSummary, ApiClientError> {
        let response = self
            .client
            .post(format!("{}/places", self.api_url))
            .json(draft)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /places?page=&per_page=`
    pub async fn list_places(&self, page: i64, per_page: i64) -> Result<PlacePage, ApiClientError> {
        let response = self
            .client
            .get(format!("{}/places", self.api_url))
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `PUT /places/{id}` with only `image_url` set.
    pub async fn set_place_image(
        &self,
        id: DbId,
        image_url: &str,
    ) -> Result<PlaceSummary, ApiClientError> {
        let response = self
            .client
            .put(format!("{}/places/{id}", self.api_url))
            .json(&serde_json::json!({ "image_url": image_url }))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiClientError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
