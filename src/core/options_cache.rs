use crate::domain::model::FilterOptions;
use crate::domain::ports::ListingService;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;

/// Filter vocabulary of one session, fetched at most once.
///
/// A failed fetch is remembered as "no vocabulary" so the finder falls back to
/// free-text filters without retrying.
#[derive(Debug, Default)]
pub struct FilterOptionsCache {
    cell: OnceCell<Option<FilterOptions>>,
}

impl FilterOptionsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_load<S: ListingService + ?Sized>(
        &self,
        service: &S,
    ) -> Option<&FilterOptions> {
        self.cell
            .get_or_init(|| async {
                match service.fetch_filter_options().await {
                    Ok(options) => {
                        tracing::debug!(
                            "Loaded filter vocabulary: {} countries, {} courses, {} IELTS buckets",
                            options.countries.len(),
                            options.courses.len(),
                            options.ielts_scores.len()
                        );
                        Some(options)
                    }
                    Err(e) => {
                        tracing::warn!("Filter options unavailable, using free-text filters: {}", e);
                        None
                    }
                }
            })
            .await
            .as_ref()
    }

    /// Starts the fetch in the background. Later `get_or_load` calls join the
    /// running fetch instead of issuing another one.
    pub fn preload<S: ListingService + 'static>(
        self: &Arc<Self>,
        service: Arc<S>,
    ) -> JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            cache.get_or_load(service.as_ref()).await;
        })
    }

    /// Cached vocabulary, without fetching.
    pub fn get(&self) -> Option<&FilterOptions> {
        self.cell.get().and_then(Option::as_ref)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FilterCriteria, UniversitiesResponse, University};
    use crate::utils::error::{FinderError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingService {
        calls: AtomicUsize,
        fail: bool,
        latency: Duration,
    }

    impl CountingService {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
                latency: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl ListingService for CountingService {
        async fn fetch_universities(&self, _: &FilterCriteria) -> Result<UniversitiesResponse> {
            Ok(UniversitiesResponse::empty())
        }

        async fn fetch_university(&self, id: &str) -> Result<University> {
            Err(FinderError::NotFound { id: id.to_string() })
        }

        async fn fetch_filter_options(&self) -> Result<FilterOptions> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.latency).await;
            if self.fail {
                Err(FinderError::Transport {
                    status: 500,
                    url: "http://test/api/filters".into(),
                })
            } else {
                Ok(FilterOptions {
                    countries: vec!["UK".into()],
                    ..FilterOptions::default()
                })
            }
        }
    }

    #[tokio::test]
    async fn test_loads_once() {
        let service = CountingService::new(false);
        let cache = FilterOptionsCache::new();
        assert!(cache.get().is_none());

        let first = cache.get_or_load(&service).await.cloned();
        let second = cache.get_or_load(&service).await.cloned();

        assert_eq!(first, second);
        assert_eq!(first.unwrap().countries, vec!["UK"]);
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_cached_as_absent() {
        let service = CountingService::new(true);
        let cache = FilterOptionsCache::new();

        assert!(cache.get_or_load(&service).await.is_none());
        assert!(cache.get_or_load(&service).await.is_none());
        assert!(cache.is_loaded());
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_preload_runs_in_background_and_is_joined() {
        let service = Arc::new(CountingService {
            latency: Duration::from_secs(5),
            ..CountingService::new(false)
        });
        let cache = Arc::new(FilterOptionsCache::new());

        let task = cache.preload(Arc::clone(&service));
        tokio::task::yield_now().await;
        assert!(cache.get().is_none());
        assert!(!cache.is_loaded());

        let options = cache.get_or_load(service.as_ref()).await.cloned();
        assert_eq!(options.unwrap().countries, vec!["UK"]);
        task.await.unwrap();
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }
}
