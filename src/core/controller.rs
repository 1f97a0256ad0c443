//! Autocomplete controller - debounced query dispatch and list ownership.
//!
//! State machine:
//!
//! ```text
//! Idle / Querying --text changed--> PendingClear   (timer armed)
//! PendingClear    --timer fires---> Querying       (list reset, query sent)
//!                                   Idle           (empty text, list empty)
//! Querying        --row----------> Querying        (row appended)
//! Querying        --done/error---> Idle
//! ```
//!
//! Every text change takes a new generation number. Profile events carry
//! the generation of the query they answer; anything not matching the
//! in-flight query is dropped.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::buffer::{Ingest, ResultBuffer, NO_SELECTION};
use super::debounce::DebounceTimer;
use super::defaults::{self, DefaultsSettings, SearchEngineProvider};
use super::entry::Entry;
use crate::config::Config;
use crate::error::{OmniboxError, OmniboxResult};
use crate::search::{Favorite, Generation, Profile, ProfileEvent, QueryRequest, RawRow};
use crate::services::tld::TldTable;

/// Where the controller is in its query cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    PendingClear,
    Querying,
}

/// Change notifications for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    SearchTextChanged(String),
    SelectionChanged(i32),
    /// Rows were cleared or appended; a relayout is due.
    EntriesChanged,
    SettingsChanged,
}

type Observer = Box<dyn FnMut(&Notification)>;

/// Owns the result list and drives queries against a [`Profile`].
pub struct AcController<P: Profile> {
    profile: P,
    buffer: ResultBuffer,
    tlds: TldTable,
    settings: DefaultsSettings,
    provider: Option<SearchEngineProvider>,
    search_text: String,
    timer: DebounceTimer,
    state: ControllerState,
    generation: Generation,
    in_flight: Option<Generation>,
    awaiting_first_row: bool,
    observers: Vec<Observer>,
}

impl<P: Profile> AcController<P> {
    /// Create a controller with default settings and no remembered suffixes.
    pub fn new(profile: P) -> Self {
        Self {
            profile,
            buffer: ResultBuffer::new(),
            tlds: TldTable::new(),
            settings: DefaultsSettings::default(),
            provider: None,
            search_text: String::new(),
            timer: DebounceTimer::default(),
            state: ControllerState::Idle,
            generation: 0,
            in_flight: None,
            awaiting_first_row: false,
            observers: Vec::new(),
        }
    }

    /// Create a controller configured from `config`.
    pub fn from_config(profile: P, config: &Config) -> Self {
        let mut controller = Self::new(profile);
        controller.settings = config.defaults_settings();
        controller.provider = config.search_provider.clone();
        controller.tlds = config.tld_table();
        controller
            .timer
            .set_delay(Duration::from_millis(config.behavior.debounce_ms));
        controller
            .buffer
            .set_visible_capacity(config.behavior.visible_entries);
        controller
    }

    /// Open the profile's backing store.
    pub fn initialize(&mut self) -> OmniboxResult<()> {
        self.profile.initialize()?;
        tracing::info!("profile initialized");
        Ok(())
    }

    /// Close the profile's backing store, abandoning any query in flight.
    pub fn uninitialize(&mut self) {
        self.abandon_query();
        self.timer.cancel();
        self.state = ControllerState::Idle;
        self.profile.uninitialize();
    }

    /// Register an observer for change notifications.
    pub fn subscribe(&mut self, observer: impl FnMut(&Notification) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, notification: Notification) {
        for observer in &mut self.observers {
            observer(&notification);
        }
    }

    // --- search text ---------------------------------------------------

    /// Change the search text. See [`set_search_text_at`](Self::set_search_text_at).
    pub fn set_search_text(&mut self, text: &str) {
        self.set_search_text_at(text, Instant::now());
    }

    /// Change the search text as of `now`.
    ///
    /// Setting the current text again does nothing. Otherwise the in-flight
    /// query is abandoned and the quiet timer is (re)armed.
    pub fn set_search_text_at(&mut self, text: &str, now: Instant) {
        if self.search_text == text {
            return;
        }

        self.search_text = text.to_string();
        self.abandon_query();
        self.generation += 1;
        self.timer.cancel();
        self.timer.arm(now);
        self.state = ControllerState::PendingClear;

        tracing::debug!(generation = self.generation, text, "search text changed");
        self.notify(Notification::SearchTextChanged(self.search_text.clone()));
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    // --- timer ---------------------------------------------------------

    /// Fire the quiet timer if it is due at `now`. Returns whether it fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.timer.fire_if_due(now) {
            self.dispatch();
            true
        } else {
            false
        }
    }

    /// Fire the quiet timer immediately if it is armed.
    pub fn fire_timer(&mut self) -> bool {
        if self.timer.cancel() {
            self.dispatch();
            true
        } else {
            false
        }
    }

    /// Time left before the quiet timer fires, or `None` when it is not armed.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }

    pub fn debounce_delay(&self) -> Duration {
        self.timer.delay()
    }

    fn dispatch(&mut self) {
        self.reset_entries();

        if self.search_text.is_empty() {
            self.state = ControllerState::Idle;
            return;
        }

        let request = QueryRequest::new(self.generation, &self.search_text);
        tracing::debug!(generation = request.generation, pattern = %request.pattern, "dispatching query");
        self.in_flight = Some(self.generation);
        self.awaiting_first_row = true;
        self.state = ControllerState::Querying;
        self.profile.query(request);
    }

    fn abandon_query(&mut self) {
        if let Some(generation) = self.in_flight.take() {
            self.profile.cancel(generation);
        }
        self.awaiting_first_row = false;
    }

    /// Clear the list and put back the default rows for the current text.
    fn reset_entries(&mut self) {
        if self.buffer.clear() {
            self.notify(Notification::SelectionChanged(NO_SELECTION));
        }
        if !self.search_text.is_empty() {
            for entry in self.default_entries() {
                self.buffer.push(entry);
            }
        }
        self.notify(Notification::EntriesChanged);
    }

    /// The default rows for the current text and settings.
    pub fn default_entries(&self) -> Vec<Entry> {
        defaults::default_entries(
            self.settings,
            self.provider.as_ref(),
            &self.search_text,
            &self.tlds,
        )
    }

    // --- profile events --------------------------------------------------

    /// Apply an event delivered by the profile.
    pub fn handle_event(&mut self, event: ProfileEvent) {
        if self.in_flight != Some(event.generation()) {
            tracing::debug!(
                generation = event.generation(),
                current = self.generation,
                "dropping event from superseded query"
            );
            return;
        }

        match event {
            ProfileEvent::Row { row, .. } => self.ingest_row(row),
            ProfileEvent::Error { code, message, .. } => {
                // Rows already shown stay put
                let err = OmniboxError::data_source(code, message);
                tracing::warn!("query failed: {}", err);
                self.finish_query();
            }
            ProfileEvent::Done { generation } => {
                tracing::debug!(generation, rows = self.buffer.len(), "query complete");
                self.finish_query();
            }
        }
    }

    /// Deliver a row for the query with the given generation.
    pub fn on_row(&mut self, generation: Generation, row: RawRow) {
        self.handle_event(ProfileEvent::Row { generation, row });
    }

    fn ingest_row(&mut self, row: RawRow) {
        if self.awaiting_first_row {
            self.awaiting_first_row = false;
            self.reset_entries();
        }

        let Some((url, title)) = row.fields() else {
            tracing::debug!(?row, "skipping row without url or title");
            return;
        };

        match self.buffer.ingest(url, title, row.type_tag, &self.search_text) {
            Ingest::Appended => self.notify(Notification::EntriesChanged),
            Ingest::Full => tracing::debug!(url, "list full, dropping row"),
        }
    }

    fn finish_query(&mut self) {
        self.in_flight = None;
        self.awaiting_first_row = false;
        self.state = ControllerState::Idle;
    }

    // --- selection & entries -------------------------------------------

    /// Select a row, or clear the selection with [`NO_SELECTION`].
    pub fn set_selection(&mut self, index: i32) -> OmniboxResult<()> {
        if self.buffer.select(index)? {
            self.notify(Notification::SelectionChanged(index));
        }
        Ok(())
    }

    pub fn selection(&self) -> i32 {
        self.buffer.selection()
    }

    pub fn entry_count(&self) -> usize {
        self.buffer.len()
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.buffer.get(index)
    }

    pub fn entry_url(&self, index: usize) -> Option<&str> {
        self.buffer.get(index).map(|e| e.url.as_str())
    }

    pub fn entries(&self) -> &[Entry] {
        self.buffer.entries()
    }

    pub fn buffer(&self) -> &ResultBuffer {
        &self.buffer
    }

    /// Rows that fit in the consumer's visible area.
    pub fn visible_entry_count(&self) -> usize {
        self.buffer.visible_len()
    }

    pub fn set_visible_capacity(&mut self, rows: usize) {
        self.buffer.set_visible_capacity(rows);
    }

    pub fn note_row_height(&mut self, height: f32) {
        self.buffer.note_row_height(height);
    }

    /// URL to launch for the row at `index`.
    pub fn activate(&self, index: usize) -> Option<String> {
        self.entry_url(index).and_then(launch_url)
    }

    /// URL to launch for the selected row.
    pub fn activate_selection(&self) -> Option<String> {
        self.buffer
            .selected()
            .and_then(|entry| launch_url(&entry.url))
    }

    /// JSON snapshot of the visible rows for out-of-process consumers.
    pub fn snapshot_json(&self) -> OmniboxResult<String> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Snapshot<'a> {
            search_text: &'a str,
            selection: i32,
            entries: &'a [Entry],
        }

        let snapshot = Snapshot {
            search_text: &self.search_text,
            selection: self.buffer.selection(),
            entries: self.buffer.visible(),
        };
        Ok(serde_json::to_string(&snapshot)?)
    }

    // --- settings & suffixes -------------------------------------------

    pub fn set_completion_enabled(&mut self, enabled: bool) {
        if self.settings.completion_enabled != enabled {
            self.settings.completion_enabled = enabled;
            self.notify(Notification::SettingsChanged);
        }
    }

    pub fn set_search_enabled(&mut self, enabled: bool) {
        if self.settings.search_enabled != enabled {
            self.settings.search_enabled = enabled;
            self.notify(Notification::SettingsChanged);
        }
    }

    pub fn settings(&self) -> DefaultsSettings {
        self.settings
    }

    /// Set or clear the search provider.
    pub fn set_search_provider(&mut self, provider: Option<SearchEngineProvider>) {
        if self.provider != provider {
            self.provider = provider;
            self.notify(Notification::SettingsChanged);
        }
    }

    pub fn search_provider(&self) -> Option<&SearchEngineProvider> {
        self.provider.as_ref()
    }

    pub fn record_tld(&mut self, suffix: &str, weight: u32) {
        self.tlds.record_suggestion(suffix, weight);
    }

    /// Known completion suffixes.
    pub fn tld_suggestions(&self) -> Vec<String> {
        self.tlds.suffixes()
    }

    pub fn tlds(&self) -> &TldTable {
        &self.tlds
    }

    // --- misc ----------------------------------------------------------

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Generation of the current search text.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn favorites(&self) -> Vec<Favorite> {
        self.profile.favorites()
    }

    pub fn profile(&self) -> &P {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut P {
        &mut self.profile
    }
}

/// Normalize a row URL for launching: leading spaces go, empty means nothing to open.
pub fn launch_url(url: &str) -> Option<String> {
    let url = url.trim_start_matches(' ');
    (!url.is_empty()).then(|| url.to_string())
}
