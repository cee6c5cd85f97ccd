pub mod comparison;
pub mod filter_state;
pub mod finder;
pub mod options_cache;
pub mod pagination;
pub mod query_controller;

pub use crate::domain::model::{
    FilterCriteria, FilterKey, FilterOptions, RacePolicy, UniversitiesResponse, University,
};
pub use crate::domain::ports::{ConfigProvider, ListingService};
pub use crate::utils::error::Result;
