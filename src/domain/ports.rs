use crate::domain::model::{
    FilterCriteria, FilterOptions, RacePolicy, UniversitiesResponse, University,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only access to the remote university listing service.
#[async_trait]
pub trait ListingService: Send + Sync {
    async fn fetch_universities(&self, criteria: &FilterCriteria) -> Result<UniversitiesResponse>;
    async fn fetch_university(&self, id: &str) -> Result<University>;
    async fn fetch_filter_options(&self) -> Result<FilterOptions>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn debounce_ms(&self) -> u64;
    fn page_size(&self) -> usize;
    fn race_policy(&self) -> RacePolicy;
}
