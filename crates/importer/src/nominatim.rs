//! Client for the Nominatim `/search` endpoint.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One search hit. Only the fields the importer reads are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsmResult {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub osm_type: Option<String>,
    #[serde(default)]
    pub address: Option<Map<String, Value>>,
    #[serde(default)]
    pub extratags: Option<Map<String, Value>>,
    #[serde(default)]
    pub tags: Option<Map<String, Value>>,
}

impl OsmResult {
    /// A string field of the `address` object.
    pub fn address_field(&self, key: &str) -> Option<&str> {
        self.address.as_ref()?.get(key)?.as_str()
    }
}

/// Errors from the Nominatim API layer.
#[derive(Debug, thiserror::Error)]
pub enum NominatimError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Nominatim returned a non-2xx status code.
    #[error("Nominatim error ({status}): {body}")]
    ApiError { status: u16, body: String },
}

/// HTTP client for a Nominatim instance.
pub struct NominatimClient {
    client: reqwest::Client,
    search_url: String,
    user_agent: String,
}

impl NominatimClient {
    pub fn new(client: reqwest::Client, search_url: String, user_agent: String) -> Self {
        Self {
            client,
            search_url,
            user_agent,
        }
    }

    /// Search for `name` within `city`, returning at most `limit` hits with
    /// address details, extra tags and name details.
    pub async fn search(
        &self,
        name: &str,
        city: &str,
        limit: u32,
    ) -> Result<Vec<OsmResult>, NominatimError> {
        let query = format!("{name}, {city}");
        let limit = limit.to_string();

        let response = self
            .client
            .get(&self.search_url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
                ("extratags", "1"),
                ("namedetails", "1"),
            ])
            .send()
            .await?;

        tracing::debug!(url = %response.url(), status = %response.status(), "Nominatim search");

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(NominatimError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<Vec<OsmResult>>().await?)
    }
}
