//! Data-side services: suffix scores, domain completion and the in-memory profile.

pub mod domain;
pub mod history;
pub mod tld;

pub use domain::Completion;
pub use history::MemoryProfile;
pub use tld::TldTable;
