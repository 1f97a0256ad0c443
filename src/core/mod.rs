//! Core engine module - UI-agnostic autocomplete logic.
//!
//! This module contains the pieces the controller is assembled from:
//! - Case-insensitive substring matching
//! - Suggestion entries and the bounded result buffer
//! - Default "search" and "go to" rows
//! - The debounce timer
//! - The controller state machine itself

pub mod buffer;
pub mod controller;
pub mod debounce;
pub mod defaults;
pub mod entry;
pub mod matcher;

pub use buffer::{ResultBuffer, MAX_ENTRIES, NO_SELECTION};
pub use controller::{launch_url, AcController, ControllerState, Notification};
pub use debounce::DebounceTimer;
pub use defaults::{DefaultsSettings, SearchEngineProvider};
pub use entry::{Entry, IconKey, RowKind};
