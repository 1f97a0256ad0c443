//! Profile trait for the external browsing-data source.
//!
//! The profile owns the bookmark and history store. The controller hands it
//! a [`QueryRequest`] and the profile answers later, out of band, with
//! [`ProfileEvent`]s tagged with the request's [`Generation`].

use crate::error::OmniboxResult;

/// Identifies one dispatched query. Strictly increasing per controller.
pub type Generation = u64;

/// A query handed to a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub generation: Generation,
    /// The search text as typed
    pub text: String,
    /// The text in LIKE-pattern form, `%text%`
    pub pattern: String,
}

impl QueryRequest {
    pub fn new(generation: Generation, text: &str) -> Self {
        Self {
            generation,
            text: text.to_string(),
            pattern: format!("%{}%", text),
        }
    }
}

/// A row as the data source delivers it. Either field may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub url: Option<String>,
    pub title: Option<String>,
    /// Favicon identifier
    pub type_tag: i32,
}

impl RawRow {
    pub fn new(url: impl Into<String>, title: impl Into<String>, type_tag: i32) -> Self {
        Self {
            url: Some(url.into()),
            title: Some(title.into()),
            type_tag,
        }
    }

    /// URL and title, if both are present and non-empty.
    pub fn fields(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().filter(|u| !u.is_empty())?;
        let title = self.title.as_deref().filter(|t| !t.is_empty())?;
        Some((url, title))
    }
}

/// Asynchronous answer to a [`QueryRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEvent {
    Row { generation: Generation, row: RawRow },
    Error { generation: Generation, code: i32, message: String },
    Done { generation: Generation },
}

impl ProfileEvent {
    pub fn generation(&self) -> Generation {
        match self {
            ProfileEvent::Row { generation, .. }
            | ProfileEvent::Error { generation, .. }
            | ProfileEvent::Done { generation } => *generation,
        }
    }
}

/// A pinned site shown in the favorites grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub url: String,
    pub title: String,
}

/// The browsing-data source the controller queries.
pub trait Profile {
    /// Open the backing store.
    fn initialize(&mut self) -> OmniboxResult<()> {
        Ok(())
    }

    /// Release the backing store. Queries after this are expected to fail.
    fn uninitialize(&mut self) {}

    /// Start a query. Results arrive later as [`ProfileEvent`]s.
    fn query(&mut self, request: QueryRequest);

    /// The request for `generation` is no longer wanted. Late results are
    /// discarded by the controller regardless.
    fn cancel(&mut self, _generation: Generation) {}

    /// Favorite sites, most important first.
    fn favorites(&self) -> Vec<Favorite> {
        Vec::new()
    }
}
