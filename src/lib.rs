pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::HttpListingClient;
pub use crate::config::FinderConfig;
pub use crate::core::comparison::{ComparisonSelector, ComparisonView, DismissSignal};
pub use crate::core::finder::{SearchSettings, UniversityFinder};
pub use crate::core::pagination::Pagination;
pub use crate::core::query_controller::{QueryController, QueryPhase, QueryUpdate, Settlement};
pub use crate::domain::model::{
    FilterCriteria, FilterKey, FilterOptions, RacePolicy, UniversitiesResponse, University,
};
pub use crate::domain::ports::ListingService;
pub use crate::utils::error::{FinderError, Result};
