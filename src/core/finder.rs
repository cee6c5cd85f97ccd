use crate::core::comparison::{ComparisonSelector, ComparisonView, DismissSignal};
use crate::core::filter_state::FilterState;
use crate::core::options_cache::FilterOptionsCache;
use crate::core::pagination::{PageSummary, Pagination, DEFAULT_PAGE_SIZE};
use crate::core::query_controller::{QueryController, QueryUpdate, DEFAULT_DEBOUNCE};
use crate::domain::model::{FilterKey, FilterOptions, RacePolicy, University};
use crate::domain::ports::{ConfigProvider, ListingService};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub page_size: usize,
    pub race_policy: RacePolicy,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            page_size: DEFAULT_PAGE_SIZE,
            race_policy: RacePolicy::default(),
        }
    }
}

impl SearchSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms()),
            page_size: config.page_size(),
            race_policy: config.race_policy(),
        }
    }
}

/// One university-finder session: filters, debounced listing queries,
/// client-side paging and the comparison pair.
pub struct UniversityFinder<S: ListingService + 'static> {
    service: Arc<S>,
    filters: FilterState,
    query: QueryController<S>,
    pagination: Pagination,
    comparison: ComparisonSelector,
    options: Arc<FilterOptionsCache>,
    options_task: Option<JoinHandle<()>>,
}

impl<S: ListingService + 'static> UniversityFinder<S> {
    pub fn new(service: Arc<S>, settings: SearchSettings) -> Self {
        let query = QueryController::new(
            Arc::clone(&service),
            settings.debounce,
            settings.race_policy,
        );
        Self {
            service,
            filters: FilterState::new(),
            query,
            pagination: Pagination::new(settings.page_size),
            comparison: ComparisonSelector::new(),
            options: Arc::new(FilterOptionsCache::new()),
            options_task: None,
        }
    }

    /// Schedules the initial unfiltered query and starts loading the filter
    /// vocabulary alongside it. The listing never waits for the vocabulary.
    pub fn mount(&mut self) {
        self.query.schedule(self.filters.snapshot());
        if self.options_task.is_none() {
            self.options_task = Some(self.options.preload(Arc::clone(&self.service)));
        }
    }

    pub fn update_filter(&mut self, key: FilterKey, raw_value: &str) {
        let snapshot = self.filters.update(key, raw_value).clone();
        self.query.schedule(snapshot);
    }

    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.query.schedule(self.filters.snapshot());
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_filter_count()
    }

    /// Processes one query event, applying the pagination side effect.
    pub async fn next_update(&mut self) -> Option<QueryUpdate> {
        let update = self.query.next_update().await?;
        if let QueryUpdate::Settled { sequence } = update {
            let total = self.query.results().total;
            tracing::debug!("Query #{} settled, back to page 1 of {} results", sequence, total);
            self.pagination.reset(total);
        }
        Some(update)
    }

    /// Waits until the latest filter change has been answered.
    pub async fn settle(&mut self) -> &[University] {
        while !self.query.is_quiescent() {
            if self.next_update().await.is_none() {
                break;
            }
        }
        self.universities()
    }

    pub fn query(&self) -> &QueryController<S> {
        &self.query
    }

    pub fn universities(&self) -> &[University] {
        &self.query.results().universities
    }

    pub fn total(&self) -> usize {
        self.query.results().total
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn visible_universities(&self) -> &[University] {
        self.pagination.visible(self.universities())
    }

    pub fn go_to_page(&mut self, page: i64) -> usize {
        self.pagination.go_to_page(page)
    }

    pub fn next_page(&mut self) -> usize {
        self.pagination.next()
    }

    pub fn previous_page(&mut self) -> usize {
        self.pagination.previous()
    }

    pub fn page_summary(&self) -> PageSummary {
        self.pagination.summary()
    }

    pub fn comparison(&self) -> &ComparisonSelector {
        &self.comparison
    }

    pub fn toggle_compare(&mut self, id: &str) {
        self.comparison.toggle(id);
    }

    pub fn open_comparison(&mut self) -> bool {
        self.comparison.open()
    }

    pub fn close_comparison(&mut self) {
        self.comparison.close();
    }

    pub fn dismiss_comparison(&mut self, signal: DismissSignal) {
        self.comparison.dismiss(signal);
    }

    pub fn comparison_view(&self) -> Option<ComparisonView<'_>> {
        self.comparison.view(self.universities())
    }

    pub async fn filter_options(&self) -> Option<&FilterOptions> {
        self.options.get_or_load(self.service.as_ref()).await
    }

    /// Autocomplete entries for `key` from the cached vocabulary; empty when
    /// the vocabulary is unavailable.
    pub fn suggestions(&self, key: FilterKey, input: &str) -> Vec<String> {
        self.options
            .get()
            .map(|options| options.suggest(key, input))
            .unwrap_or_default()
    }

    pub async fn university(&self, id: &str) -> Result<University> {
        self.service.fetch_university(id).await
    }
}

impl<S: ListingService + 'static> Drop for UniversityFinder<S> {
    fn drop(&mut self) {
        if let Some(task) = self.options_task.take() {
            task.abort();
        }
    }
}
