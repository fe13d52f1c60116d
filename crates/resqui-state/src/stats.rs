//! Aggregate stats and startup navigation.

use crate::epoch::Epoch;
use crate::route::Route;
use resqui_api::ApiError;
use resqui_core::Stats;

/// Shown in place of every view when stats could not be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Unable to load Resque information";

#[derive(Debug, Clone, PartialEq)]
pub enum StatsState {
    Loading,
    Loaded(Stats),
    Failed,
}

/// Ticket for one `GET /api/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsRequest {
    pub epoch: Epoch,
}

/// Holds the latest stats snapshot.
///
/// After each completed load the store yields at most one navigation
/// decision through [`StatsStore::take_navigation`]. While a reload is in
/// flight the last loaded snapshot is kept for [`StatsStore::display_queues`].
#[derive(Debug)]
pub struct StatsStore {
    state: StatsState,
    previous: Option<Stats>,
    epoch: Epoch,
    navigation_pending: bool,
}

impl Default for StatsStore {
    fn default() -> Self {
        Self {
            state: StatsState::Loading,
            previous: None,
            epoch: Epoch::default(),
            navigation_pending: false,
        }
    }
}

impl StatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start loading. Any earlier load still in flight is superseded.
    pub fn begin_load(&mut self) -> StatsRequest {
        if let StatsState::Loaded(stats) = std::mem::replace(&mut self.state, StatsState::Loading) {
            self.previous = Some(stats);
        }
        self.navigation_pending = false;
        StatsRequest {
            epoch: self.epoch.bump(),
        }
    }

    /// Store the outcome of a load. Returns `false` if the request was stale.
    pub fn finish_load(&mut self, request: StatsRequest, result: Result<Stats, ApiError>) -> bool {
        if request.epoch != self.epoch {
            tracing::debug!("Discarding stale stats response");
            return false;
        }

        self.state = match result {
            Ok(stats) => StatsState::Loaded(stats),
            Err(e) => {
                tracing::warn!("Failed to load stats: {}", e);
                StatsState::Failed
            }
        };
        self.previous = None;
        self.navigation_pending = true;
        true
    }

    /// Navigation decided by the last completed load, consumed on read.
    ///
    /// No queues (including a failed load) sends the view to Failed. With
    /// queues present, the root view moves to the first queue and any other
    /// view is left alone.
    pub fn take_navigation(&mut self, current: &Route) -> Option<Route> {
        if !std::mem::take(&mut self.navigation_pending) {
            return None;
        }

        match self.queues().first() {
            None => Some(Route::Failed),
            Some(first) if *current == Route::Root => Some(Route::Queue(first.clone())),
            Some(_) => None,
        }
    }

    pub fn state(&self) -> &StatsState {
        &self.state
    }

    pub fn stats(&self) -> Option<&Stats> {
        match &self.state {
            StatsState::Loaded(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn queues(&self) -> &[String] {
        self.stats().map(|s| s.queues.as_slice()).unwrap_or_default()
    }

    /// Queues to draw as tabs. During a reload these are the queues of the
    /// last successful load, so the tab bar does not collapse.
    pub fn display_queues(&self) -> &[String] {
        match &self.state {
            StatsState::Loaded(stats) => &stats.queues,
            StatsState::Loading => self
                .previous
                .as_ref()
                .map(|s| s.queues.as_slice())
                .unwrap_or_default(),
            StatsState::Failed => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == StatsState::Loading
    }

    pub fn is_failed(&self) -> bool {
        self.state == StatsState::Failed
    }
}
