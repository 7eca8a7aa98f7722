//! The `places` import run: geocode queries, map hits, submit places.

use std::time::Duration;

use crate::api_client::{ApiClientError, CityGuideClient};
use crate::category_map::{CategoryLookup, DEFAULT_CATEGORY};
use crate::input::PlaceQuery;
use crate::mapping::{to_draft, PlaceDraft};
use crate::nominatim::NominatimClient;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to load place categories: {0}")]
    Categories(#[source] ApiClientError),

    #[error("no place categories exist, create them before importing")]
    NoCategories,
}

/// Totals reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Drafts built from geocoding hits.
    pub collected: usize,
    /// Drafts the API accepted.
    pub submitted: usize,
    /// Queries that were processed.
    pub queries: Vec<String>,
}

pub struct Importer {
    api: CityGuideClient,
    nominatim: NominatimClient,
    city: String,
    submit_delay: Duration,
}

impl Importer {
    pub fn new(
        api: CityGuideClient,
        nominatim: NominatimClient,
        city: String,
        submit_delay: Duration,
    ) -> Self {
        Self {
            api,
            nominatim,
            city,
            submit_delay,
        }
    }

    /// Build the category lookup from the API's place categories.
    pub async fn load_categories(&self) -> Result<CategoryLookup, ImportError> {
        let categories = self
            .api
            .place_categories()
            .await
            .map_err(ImportError::Categories)?;

        let lookup = CategoryLookup::new(categories.iter().map(|c| (c.name.as_str(), c.id)));
        if lookup.is_empty() {
            return Err(ImportError::NoCategories);
        }
        if lookup.default_id().is_none() {
            tracing::warn!(
                default = DEFAULT_CATEGORY,
                "Default category missing, unmapped places will be skipped"
            );
        }
        tracing::info!(count = categories.len(), "Loaded place categories");
        Ok(lookup)
    }

    /// Geocode one query and map its hits. Lookup failures are logged and
    /// yield no drafts.
    pub async fn collect(&self, query: &PlaceQuery, lookup: &CategoryLookup) -> Vec<PlaceDraft> {
        let results = match self
            .nominatim
            .search(&query.name, &self.city, query.limit)
            .await
        {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(query = %query, error = %e, "Nominatim search failed");
                return Vec::new();
            }
        };

        if results.is_empty() {
            tracing::warn!(query = %query, "No results found");
            return Vec::new();
        }

        results
            .iter()
            .filter_map(|result| to_draft(result, &query.name, &self.city, lookup))
            .collect()
    }

    /// POST each draft, pausing between submissions. Returns how many were
    /// accepted.
    pub async fn submit(&self, drafts: &[PlaceDraft]) -> usize {
        let mut submitted = 0;
        for (i, draft) in drafts.iter().enumerate() {
            if i > 0 && !self.submit_delay.is_zero() {
                tokio::time::sleep(self.submit_delay).await;
            }
            match self.api.create_place(draft).await {
                Ok(place) => {
                    submitted += 1;
                    tracing::info!(
                        id = place.id,
                        name = %place.name,
                        category_id = draft.category_id,
                        "Place created"
                    );
                }
                Err(e) => {
                    tracing::error!(name = %draft.name, error = %e, "Failed to create place");
                }
            }
        }
        submitted
    }

    /// Run a batch of queries end to end.
    pub async fn run(&self, queries: &[PlaceQuery]) -> Result<ImportSummary, ImportError> {
        let lookup = self.load_categories().await?;
        let mut summary = ImportSummary::default();

        for query in queries {
            tracing::info!(query = %query, "Searching");
            let drafts = self.collect(query, &lookup).await;
            summary.collected += drafts.len();
            summary.submitted += self.submit(&drafts).await;
            summary.queries.push(query.to_string());
        }

        tracing::info!(
            collected = summary.collected,
            submitted = summary.submitted,
            queries = ?summary.queries,
            "Import finished"
        );
        Ok(summary)
    }
}
