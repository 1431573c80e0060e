//! The geosearch control
//!
//! A collapsible search box attached to a map. Typed text is resolved through
//! the configured [`Provider`](crate::geocoding::Provider); the best match
//! recenters the map and, optionally, moves a position marker there.
//!
//! Resolution runs on the async runtime and never blocks the UI thread.
//! Finished searches are queued and applied by [`SearchControl::poll_results`],
//! which the plugin `update` hook calls every frame.

use crate::{
    core::{
        config::GeoSearchConfig,
        constants::PLUGIN_NAME,
        map::{MapHost, MarkerId},
    },
    geocoding::{
        fetch::{HttpFetch, ReqwestFetcher},
        provider::resolve,
        result::{SearchOutcome, SearchResult},
    },
    input::events::{EventHandled, InputEvent, KeyCode, MapEvent},
    plugins::base::PluginTrait,
    runtime::{self, AsyncHandle},
    ui::view::{ControlIcon, ControlView},
    Result,
};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// What the control is doing, independent of whether its form is shown
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Searching,
    Failed {
        message: String,
    },
}

/// UI state of the control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlState {
    /// Only the toggle button is shown
    Collapsed(Activity),
    /// The search form is shown
    Expanded(Activity),
}

impl Default for ControlState {
    fn default() -> Self {
        Self::Collapsed(Activity::Idle)
    }
}

impl ControlState {
    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Expanded(_))
    }

    pub fn activity(&self) -> &Activity {
        match self {
            Self::Collapsed(a) | Self::Expanded(a) => a,
        }
    }

    /// Same visibility, different activity
    fn with_activity(&self, activity: Activity) -> Self {
        if self.is_expanded() {
            Self::Expanded(activity)
        } else {
            Self::Collapsed(activity)
        }
    }
}

/// A finished resolution on its way back to the UI thread
#[derive(Debug)]
struct SearchCompletion {
    request_id: u64,
    query: String,
    results: Result<Vec<SearchResult>>,
}

/// Map control searching for an address and zooming to its location
pub struct SearchControl {
    config: Arc<GeoSearchConfig>,
    fetcher: Arc<dyn HttpFetch>,
    state: ControlState,
    input: String,
    focus_requested: bool,
    marker: Option<MarkerId>,
    attached: bool,
    /// Id of the most recent submit; ids start at 1
    last_request_id: u64,
    in_flight: usize,
    pending: Vec<Box<dyn AsyncHandle>>,
    completion_tx: Sender<SearchCompletion>,
    completion_rx: Receiver<SearchCompletion>,
}

impl SearchControl {
    /// Create a control fetching over the shared HTTP client
    pub fn new(config: GeoSearchConfig) -> Self {
        Self::with_fetcher(config, Arc::new(ReqwestFetcher::new()))
    }

    /// Create a control using the host's HTTP facility
    pub fn with_fetcher(config: GeoSearchConfig, fetcher: Arc<dyn HttpFetch>) -> Self {
        let (completion_tx, completion_rx) = unbounded();
        Self {
            config: Arc::new(config),
            fetcher,
            state: ControlState::default(),
            input: String::new(),
            focus_requested: false,
            marker: None,
            attached: false,
            last_request_id: 0,
            in_flight: 0,
            pending: Vec::new(),
            completion_tx,
            completion_rx,
        }
    }

    pub fn config(&self) -> &GeoSearchConfig {
        &self.config
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn marker(&self) -> Option<MarkerId> {
        self.marker
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_searching(&self) -> bool {
        *self.state.activity() == Activity::Searching
    }

    /// Message currently displayed, if any
    pub fn error_message(&self) -> Option<&str> {
        match self.state.activity() {
            Activity::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Id of the most recent search, 0 before the first one
    pub fn last_request_id(&self) -> u64 {
        self.last_request_id
    }

    /// Searches dispatched but not yet applied
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Open or close the search form
    pub fn toggle(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            ControlState::Collapsed(activity) => {
                self.focus_requested = true;
                ControlState::Expanded(activity)
            }
            ControlState::Expanded(activity) => ControlState::Collapsed(activity),
        };
        log::debug!("geosearch toggled, expanded={}", self.state.is_expanded());
    }

    /// Returns true once after the form was opened; the renderer should then
    /// focus the input and select its text
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Start resolving `query` in the background. Blank queries are ignored.
    ///
    /// Returns the request id. Earlier searches keep running; unless
    /// `ignore_stale_results` is set, whichever finishes last decides what the
    /// map shows.
    pub fn submit(&mut self, query: &str) -> Option<u64> {
        let query = query.trim();
        if query.is_empty() {
            log::debug!("geosearch: ignoring blank query");
            return None;
        }

        let request_id = self.begin_search(query);
        let provider = self.config.provider.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.completion_tx.clone();
        let owned_query = query.to_string();

        let spawned = runtime::spawn(async move {
            let results = resolve(&provider, fetcher.as_ref(), &owned_query).await;
            // The receiver is gone once the control is dropped
            let _ = tx.send(SearchCompletion {
                request_id,
                query: owned_query,
                results,
            });
        });

        match spawned {
            Ok(handle) => {
                self.pending.push(handle);
                self.in_flight += 1;
            }
            Err(e) => {
                log::warn!("geosearch: could not dispatch {:?}: {}", query, e);
                self.show_error();
            }
        }
        Some(request_id)
    }

    /// Resolve `query` on the caller's task and apply the outcome immediately.
    ///
    /// Returns `None` for blank queries. Provider failures are reported as
    /// [`SearchOutcome::NotFound`].
    pub async fn search(&mut self, query: &str, map: &mut dyn MapHost) -> Option<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let request_id = self.begin_search(query);
        let results = resolve(&self.config.provider, self.fetcher.as_ref(), query).await;
        let outcome = match &results {
            Ok(found) => SearchOutcome::from_results(found.clone()),
            Err(_) => SearchOutcome::NotFound,
        };
        self.in_flight += 1;
        self.apply_completion(
            SearchCompletion {
                request_id,
                query: query.to_string(),
                results,
            },
            map,
        );
        Some(outcome)
    }

    /// Show the best of `results` on `map`, or the not-found message when
    /// there is none. Never fails: map errors degrade to the error display.
    pub fn on_results_received(&mut self, results: Vec<SearchResult>, map: &mut dyn MapHost) {
        match SearchOutcome::from_results(results) {
            SearchOutcome::Found(best) => match self.show_location(&best, map) {
                Ok(()) => self.cancel_search(),
                Err(e) => {
                    log::warn!("geosearch: could not show {}: {}", best, e);
                    self.show_error();
                }
            },
            SearchOutcome::NotFound => self.show_error(),
        }
    }

    /// Enter: search for the current input
    pub fn on_key_enter(&mut self) -> Option<u64> {
        let query = self.input.clone();
        self.submit(&query)
    }

    /// Escape: close the form and forget the input and any error
    pub fn on_key_escape(&mut self) {
        self.cancel_search();
    }

    /// The input changed; editing clears a displayed error
    pub fn on_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
        if matches!(self.state.activity(), Activity::Failed { .. }) {
            self.state = self.state.with_activity(Activity::Idle);
        }
    }

    /// Click on the map surface: hide the form, keep the icon and message
    pub fn on_map_click(&mut self) -> EventHandled {
        match std::mem::take(&mut self.state) {
            ControlState::Expanded(activity) => {
                self.state = ControlState::Collapsed(activity);
                EventHandled::Handled
            }
            collapsed => {
                self.state = collapsed;
                EventHandled::NotHandled
            }
        }
    }

    /// Apply every search that finished since the last call.
    /// Returns how many were applied.
    pub fn poll_results(&mut self, map: &mut dyn MapHost) -> usize {
        self.pending.retain(|handle| !handle.is_finished());

        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply_completion(completion, map);
            applied += 1;
        }
        applied
    }

    /// Block until every dispatched search was applied or `timeout` elapsed.
    /// Returns how many were applied.
    pub fn wait_for_results(&mut self, map: &mut dyn MapHost, timeout: Duration) -> usize {
        // Too far out to represent: wait without a deadline
        let deadline = Instant::now().checked_add(timeout);
        let mut applied = 0;

        while self.in_flight > 0 {
            let received = match deadline {
                Some(deadline) => self
                    .completion_rx
                    .recv_timeout(deadline.saturating_duration_since(Instant::now())),
                None => self
                    .completion_rx
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(completion) => {
                    self.apply_completion(completion, map);
                    applied += 1;
                }
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!(
                        "geosearch: {} search(es) still running after {:?}",
                        self.in_flight,
                        timeout
                    );
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.pending.retain(|handle| !handle.is_finished());
        applied
    }

    /// Project the state for a render step
    pub fn view(&self) -> ControlView {
        let icon = match self.state.activity() {
            Activity::Idle => ControlIcon::Glass,
            Activity::Searching => ControlIcon::Spinner,
            Activity::Failed { .. } => ControlIcon::Alert,
        };
        ControlView {
            title: self.config.search_label.clone(),
            placeholder: self.config.search_label.clone(),
            icon,
            form_visible: self.state.is_expanded(),
            input: self.input.clone(),
            message: self.error_message().map(str::to_string),
            focus_input: self.focus_requested,
            position: self.config.position,
        }
    }

    fn begin_search(&mut self, query: &str) -> u64 {
        self.last_request_id += 1;
        self.state = ControlState::Expanded(Activity::Searching);
        log::debug!(
            "geosearch #{}: resolving {:?} with {}",
            self.last_request_id,
            query,
            self.config.provider.name()
        );
        self.last_request_id
    }

    fn apply_completion(&mut self, completion: SearchCompletion, map: &mut dyn MapHost) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.config.ignore_stale_results && completion.request_id != self.last_request_id {
            log::debug!(
                "geosearch #{}: dropping stale results for {:?}",
                completion.request_id,
                completion.query
            );
            return;
        }

        match completion.results {
            Ok(results) => {
                log::debug!(
                    "geosearch #{}: {} result(s) for {:?}",
                    completion.request_id,
                    results.len(),
                    completion.query
                );
                self.on_results_received(results, map);
            }
            Err(e) => {
                log::warn!(
                    "geosearch #{}: {} failed for {:?}: {}",
                    completion.request_id,
                    self.config.provider.name(),
                    completion.query,
                    e
                );
                self.show_error();
            }
        }
    }

    fn show_location(&mut self, location: &SearchResult, map: &mut dyn MapHost) -> Result<()> {
        let position = location.lat_lng();
        // The view rejects unusable positions before any marker is placed
        map.set_view(position, f64::from(self.config.zoom_level))?;

        if self.config.show_marker {
            match self.marker {
                Some(marker) => map.set_marker_position(marker, position)?,
                None => self.marker = Some(map.add_marker(position)?),
            }
        }
        Ok(())
    }

    /// Keeps the form hidden if the user already closed it
    fn show_error(&mut self) {
        self.input.clear();
        self.state = self.state.with_activity(Activity::Failed {
            message: self.config.not_found_message.clone(),
        });
    }

    fn cancel_search(&mut self) {
        self.input.clear();
        self.state = ControlState::Collapsed(Activity::Idle);
    }
}

impl std::fmt::Debug for SearchControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchControl")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("input", &self.input)
            .field("marker", &self.marker)
            .field("last_request_id", &self.last_request_id)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

impl PluginTrait for SearchControl {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn on_add(&mut self, _map: &mut dyn MapHost) -> Result<()> {
        self.attached = true;
        log::debug!("geosearch attached using {}", self.config.provider.name());
        Ok(())
    }

    fn on_remove(&mut self, map: &mut dyn MapHost) -> Result<()> {
        for handle in self.pending.drain(..) {
            handle.cancel();
        }
        // Tasks that finish anyway report into the old, now dropped channel
        let (completion_tx, completion_rx) = unbounded();
        self.completion_tx = completion_tx;
        self.completion_rx = completion_rx;
        self.in_flight = 0;

        self.cancel_search();
        self.focus_requested = false;
        self.attached = false;

        if let Some(marker) = self.marker.take() {
            map.remove_marker(marker)?;
        }
        log::debug!("geosearch removed");
        Ok(())
    }

    fn handle_input(&mut self, input: &InputEvent) -> Result<EventHandled> {
        let handled = match input {
            InputEvent::ToggleClick => {
                self.toggle();
                EventHandled::Handled
            }
            InputEvent::KeyPress {
                key: KeyCode::Enter,
                ..
            } => {
                self.on_key_enter();
                EventHandled::Handled
            }
            InputEvent::KeyUp {
                key: KeyCode::Escape,
                ..
            } => {
                self.on_key_escape();
                EventHandled::Handled
            }
            InputEvent::TextInput { value } => {
                self.on_input(value.clone());
                EventHandled::Handled
            }
            _ => EventHandled::NotHandled,
        };
        Ok(handled)
    }

    fn handle_map_event(&mut self, event: &MapEvent) -> Result<EventHandled> {
        match event {
            MapEvent::Click { .. } => Ok(self.on_map_click()),
            MapEvent::ViewChanged { .. } => Ok(EventHandled::NotHandled),
        }
    }

    fn update(&mut self, map: &mut dyn MapHost) -> Result<()> {
        self.poll_results(map);
        Ok(())
    }
}
