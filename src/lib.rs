//! Omnibox - address-bar autocomplete engine.
//!
//! As the user types into a location bar, the engine produces a short, ranked
//! list of suggestions: a "search the web" row, a "go to this domain" row
//! completed from remembered suffixes, and matching bookmarks and history.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`config`] - Configuration loading and management
//! - [`core`] - Matching, result buffer, default rows and the controller
//! - [`search`] - The [`Profile`] trait the browsing-data source implements
//! - [`services`] - Suffix scores, domain completion and an in-memory profile
//! - `runtime` - Tokio event loop driving the controller (feature `runtime`)
//!
//! # Example
//!
//! ```ignore
//! use omnibox::{AcController, MemoryProfile};
//!
//! let mut profile = MemoryProfile::new();
//! profile.add_visit("http://docs.rs/", "Docs.rs", 0, 12);
//!
//! let mut controller = AcController::new(profile);
//! controller.initialize()?;
//! controller.record_tld(".com", 10);
//! controller.set_search_text("docs");
//! controller.fire_timer();
//! for event in controller.profile_mut().drain_events() {
//!     controller.handle_event(event);
//! }
//! ```

// Public modules
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod search;
pub mod services;

#[cfg(feature = "runtime")]
pub mod runtime;

// Re-export commonly used types for convenience
pub use config::Config;
pub use core::{AcController, ControllerState, Entry, Notification};
pub use error::{OmniboxError, OmniboxResult};
pub use search::{Profile, ProfileEvent, QueryRequest, RawRow};
pub use services::{MemoryProfile, TldTable};
