use crate::domain::model::{FilterCriteria, FilterOptions, UniversitiesResponse, University};
use crate::domain::ports::ListingService;
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

pub const DEFAULT_API_BASE: &str = "http://localhost:3001";

/// Listing service client speaking the `/api/universities` and `/api/filters`
/// JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpListingClient {
    base_url: String,
    client: Client,
}

impl HttpListingClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        // Parse once up front so every request URL below is known to be valid.
        Url::parse(base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    pub(crate) fn universities_url(&self, criteria: &FilterCriteria) -> Result<Url> {
        let mut url = self.endpoint("/api/universities")?;
        if !criteria.is_empty() {
            url.query_pairs_mut().extend_pairs(criteria.query_pairs());
        }
        Ok(url)
    }

    pub(crate) fn university_url(&self, id: &str) -> Result<Url> {
        let mut url = self.endpoint("/api/universities")?;
        url.path_segments_mut()
            .map_err(|_| FinderError::config(format!("base URL {} cannot carry a path", self.base_url)))?
            .push(id);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Listing service response status: {}", status);

        if !status.is_success() {
            return Err(FinderError::Transport {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ListingService for HttpListingClient {
    async fn fetch_universities(&self, criteria: &FilterCriteria) -> Result<UniversitiesResponse> {
        let url = self.universities_url(criteria)?;
        let response: UniversitiesResponse = self.get_json(url).await?;

        if response.universities.len() != response.total {
            tracing::warn!(
                "Listing service reported total {} but returned {} records",
                response.total,
                response.universities.len()
            );
        }

        Ok(response)
    }

    async fn fetch_university(&self, id: &str) -> Result<University> {
        let url = self.university_url(id)?;
        match self.get_json(url).await {
            Ok(university) => Ok(university),
            Err(FinderError::Transport { status, .. }) => {
                if status != StatusCode::NOT_FOUND.as_u16() {
                    tracing::debug!("Lookup of {} failed with status {}", id, status);
                }
                Err(FinderError::NotFound { id: id.to_string() })
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_filter_options(&self) -> Result<FilterOptions> {
        let url = self.endpoint("/api/filters")?;
        self.get_json(url).await
    }
}
