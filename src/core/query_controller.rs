use crate::domain::model::{FilterCriteria, RacePolicy, UniversitiesResponse};
use crate::domain::ports::ListingService;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Success,
    /// The listing call failed; results were replaced by an empty set.
    Failure { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPhase {
    Idle,
    Pending,
    Loading,
    Settled(Settlement),
}

/// Observable steps reported by [`QueryController::next_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryUpdate {
    Fired { sequence: u64 },
    Settled { sequence: u64 },
    Discarded { sequence: u64 },
}

#[derive(Debug)]
enum ControllerEvent {
    TimerElapsed {
        generation: u64,
    },
    Resolved {
        sequence: u64,
        result: Result<UniversitiesResponse>,
    },
}

/// Trailing-edge debounced listing queries.
///
/// Each [`schedule`](Self::schedule) replaces the pending timer, so at most one
/// timer task exists. When a timer elapses the controller issues the listing
/// call with the snapshot it was given and tags it with the next sequence
/// number. In-flight calls are never cancelled; which responses are applied is
/// decided by the [`RacePolicy`].
pub struct QueryController<S: ListingService + 'static> {
    service: Arc<S>,
    delay: Duration,
    policy: RacePolicy,
    timer: Option<JoinHandle<()>>,
    generation: u64,
    scheduled: Option<FilterCriteria>,
    issued: u64,
    applied: u64,
    in_flight: usize,
    phase: QueryPhase,
    results: UniversitiesResponse,
    events_tx: mpsc::UnboundedSender<ControllerEvent>,
    events_rx: mpsc::UnboundedReceiver<ControllerEvent>,
}

impl<S: ListingService + 'static> QueryController<S> {
    pub fn new(service: Arc<S>, delay: Duration, policy: RacePolicy) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service,
            delay,
            policy,
            timer: None,
            generation: 0,
            scheduled: None,
            issued: 0,
            applied: 0,
            in_flight: 0,
            phase: QueryPhase::Idle,
            results: UniversitiesResponse::empty(),
            events_tx,
            events_rx,
        }
    }

    /// Restarts the debounce window with `criteria` as the query to run.
    pub fn schedule(&mut self, criteria: FilterCriteria) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            tracing::trace!("Debounce timer {} replaced", self.generation);
        }

        self.generation += 1;
        self.scheduled = Some(criteria);
        self.phase = QueryPhase::Pending;

        let generation = self.generation;
        let delay = self.delay;
        let tx = self.events_tx.clone();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(ControllerEvent::TimerElapsed { generation });
        }));
    }

    /// Waits for the next timer or response event and applies it. Returns
    /// `None` when nothing is outstanding.
    pub async fn next_update(&mut self) -> Option<QueryUpdate> {
        loop {
            if self.timer.is_none() && self.in_flight == 0 {
                return None;
            }
            let event = self.events_rx.recv().await?;
            if let Some(update) = self.apply(event) {
                return Some(update);
            }
        }
    }

    /// Drives events until the latest query has settled and no timer is
    /// pending. Under [`RacePolicy::LastWriterWins`] this also waits for every
    /// in-flight response, since any of them may still overwrite the results.
    pub async fn settle(&mut self) -> &UniversitiesResponse {
        while !self.is_quiescent() {
            if self.next_update().await.is_none() {
                break;
            }
        }
        &self.results
    }

    /// No timer pending and the latest issued query has been applied.
    pub fn is_quiescent(&self) -> bool {
        if self.timer.is_some() {
            return false;
        }
        match self.policy {
            RacePolicy::Sequenced => self.applied == self.issued,
            RacePolicy::LastWriterWins => self.in_flight == 0,
        }
    }

    fn apply(&mut self, event: ControllerEvent) -> Option<QueryUpdate> {
        match event {
            ControllerEvent::TimerElapsed { generation } => {
                if generation != self.generation || self.timer.is_none() {
                    tracing::trace!("Ignoring superseded debounce timer {}", generation);
                    return None;
                }
                self.timer = None;
                let criteria = self.scheduled.take().unwrap_or_default();
                Some(self.fire(criteria))
            }
            ControllerEvent::Resolved { sequence, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                if self.policy == RacePolicy::Sequenced && sequence != self.issued {
                    tracing::debug!(
                        "Discarding stale listing response #{} (latest is #{})",
                        sequence,
                        self.issued
                    );
                    return Some(QueryUpdate::Discarded { sequence });
                }
                self.settle_with(sequence, result);
                Some(QueryUpdate::Settled { sequence })
            }
        }
    }

    fn fire(&mut self, criteria: FilterCriteria) -> QueryUpdate {
        self.issued += 1;
        self.in_flight += 1;
        self.phase = QueryPhase::Loading;

        let sequence = self.issued;
        tracing::debug!(
            "Listing query #{} with {} filter(s)",
            sequence,
            criteria.len()
        );

        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = service.fetch_universities(&criteria).await;
            let _ = tx.send(ControllerEvent::Resolved { sequence, result });
        });

        QueryUpdate::Fired { sequence }
    }

    fn settle_with(&mut self, sequence: u64, result: Result<UniversitiesResponse>) {
        let settlement = match result {
            Ok(response) => {
                tracing::info!(
                    "Listing query #{} returned {} of {} universities",
                    sequence,
                    response.universities.len(),
                    response.total
                );
                self.results = response;
                Settlement::Success
            }
            Err(e) => {
                tracing::warn!("Listing query #{} failed: {}", sequence, e);
                self.results = UniversitiesResponse::empty();
                Settlement::Failure {
                    message: e.to_string(),
                }
            }
        };

        self.applied = self.applied.max(sequence);
        // A newer change is already waiting on the timer; stay Pending.
        if self.timer.is_none() {
            self.phase = QueryPhase::Settled(settlement);
        }
    }

    pub fn phase(&self) -> &QueryPhase {
        &self.phase
    }

    pub fn results(&self) -> &UniversitiesResponse {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, QueryPhase::Pending | QueryPhase::Loading)
    }

    pub fn last_error(&self) -> Option<&str> {
        match &self.phase {
            QueryPhase::Settled(Settlement::Failure { message }) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn has_failed(&self) -> bool {
        self.last_error().is_some()
    }

    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl<S: ListingService + 'static> Drop for QueryController<S> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
