//! In-memory browsing profile.
//!
//! Reproduces the browser's history query: bookmarks (counted as 100 visits)
//! and visited URLs are merged, each row is shown as `"<url> - <title>"`,
//! rows matching `%<text>%` as a `LIKE` pattern are kept, duplicates removed and the rest
//! ordered by visit count, bookmarks first on ties.
//!
//! Answers are queued and handed out by [`MemoryProfile::drain_events`], or
//! pushed into a channel when the profile feeds the async runtime.

use serde::Deserialize;
use std::collections::{HashSet, VecDeque};

use crate::core::matcher;
use crate::error::OmniboxResult;
use crate::search::{Favorite, Generation, Profile, ProfileEvent, QueryRequest, RawRow};

/// Visit count bookmarks are ranked with.
pub const BOOKMARK_VISIT_COUNT: u32 = 100;

/// Error code reported when querying a closed profile.
pub const ERROR_NOT_OPEN: i32 = 21;

#[derive(Debug, Clone, Deserialize)]
pub struct Bookmark {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub favicon_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisitedUrl {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub favicon_id: i32,
    #[serde(default)]
    pub visit_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct FavoriteRecord {
    url: String,
    #[serde(default)]
    title: Option<String>,
}

/// On-disk layout for [`MemoryProfile::from_toml_str`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfileFile {
    bookmarks: Vec<Bookmark>,
    urls: Vec<VisitedUrl>,
    favorites: Vec<FavoriteRecord>,
}

enum Delivery {
    Queue(VecDeque<ProfileEvent>),
    #[cfg(feature = "runtime")]
    Channel(tokio::sync::mpsc::UnboundedSender<ProfileEvent>),
}

/// Bookmarks and history held in memory.
pub struct MemoryProfile {
    bookmarks: Vec<Bookmark>,
    urls: Vec<VisitedUrl>,
    favorites: Vec<Favorite>,
    open: bool,
    delivery: Delivery,
    requests: Vec<QueryRequest>,
}

impl MemoryProfile {
    pub fn new() -> Self {
        Self {
            bookmarks: Vec::new(),
            urls: Vec::new(),
            favorites: Vec::new(),
            open: false,
            delivery: Delivery::Queue(VecDeque::new()),
            requests: Vec::new(),
        }
    }

    /// Parse a profile from TOML with `[[bookmarks]]`, `[[urls]]` and `[[favorites]]` arrays.
    pub fn from_toml_str(content: &str) -> OmniboxResult<Self> {
        let file: ProfileFile = toml::from_str(content)?;
        let mut profile = Self::new();
        profile.bookmarks = file.bookmarks;
        profile.urls = file.urls;
        profile.favorites = file
            .favorites
            .into_iter()
            .map(|f| Favorite {
                title: f.title.unwrap_or_else(|| f.url.clone()),
                url: f.url,
            })
            .collect();
        Ok(profile)
    }

    /// Deliver answers through `sender` instead of the internal queue.
    #[cfg(feature = "runtime")]
    pub fn with_channel(mut self, sender: tokio::sync::mpsc::UnboundedSender<ProfileEvent>) -> Self {
        self.delivery = Delivery::Channel(sender);
        self
    }

    pub fn add_bookmark(&mut self, url: &str, title: &str, favicon_id: i32) {
        self.bookmarks.push(Bookmark {
            url: url.to_string(),
            title: Some(title.to_string()),
            favicon_id,
        });
    }

    pub fn add_visit(&mut self, url: &str, title: &str, favicon_id: i32, visit_count: u32) {
        self.urls.push(VisitedUrl {
            url: url.to_string(),
            title: Some(title.to_string()),
            favicon_id,
            visit_count,
        });
    }

    pub fn add_favorite(&mut self, url: &str, title: &str) {
        self.favorites.push(Favorite {
            url: url.to_string(),
            title: title.to_string(),
        });
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> &[QueryRequest] {
        &self.requests
    }

    /// Take the queued answers, oldest first.
    pub fn drain_events(&mut self) -> Vec<ProfileEvent> {
        match &mut self.delivery {
            Delivery::Queue(queue) => queue.drain(..).collect(),
            #[cfg(feature = "runtime")]
            Delivery::Channel(_) => Vec::new(),
        }
    }

    /// Rows containing `text`, in delivery order. `%` and `_` in `text` act as wildcards.
    pub fn search(&self, text: &str) -> Vec<RawRow> {
        self.search_pattern(&format!("%{}%", text))
    }

    /// Rows whose label matches the `LIKE` pattern, in delivery order.
    pub fn search_pattern(&self, pattern: &str) -> Vec<RawRow> {
        let bookmarks = self.bookmarks.iter().map(|b| {
            (&b.url, b.title.as_deref(), b.favicon_id, BOOKMARK_VISIT_COUNT)
        });
        let visits = self
            .urls
            .iter()
            .map(|u| (&u.url, u.title.as_deref(), u.favicon_id, u.visit_count));

        let mut candidates: Vec<(RawRow, u32)> = Vec::new();
        let mut seen: HashSet<(String, String, i32)> = HashSet::new();

        for (url, title, favicon_id, visits) in bookmarks.chain(visits) {
            // A missing title makes the whole label missing
            let Some(title) = title else { continue };
            let label = format!("{} - {}", url, title);
            if !matcher::like(&label, pattern) {
                continue;
            }
            if !seen.insert((url.clone(), label.clone(), favicon_id)) {
                continue;
            }
            candidates.push((RawRow::new(url.clone(), label, favicon_id), visits));
        }

        // Stable: bookmarks keep their place ahead of equally visited urls
        candidates.sort_by(|a, b| b.1.cmp(&a.1));
        candidates.into_iter().map(|(row, _)| row).collect()
    }

    fn deliver(&mut self, event: ProfileEvent) {
        match &mut self.delivery {
            Delivery::Queue(queue) => queue.push_back(event),
            #[cfg(feature = "runtime")]
            Delivery::Channel(sender) => {
                if sender.send(event).is_err() {
                    tracing::debug!("event receiver gone");
                }
            }
        }
    }
}

impl Default for MemoryProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl Profile for MemoryProfile {
    fn initialize(&mut self) -> OmniboxResult<()> {
        self.open = true;
        tracing::debug!(
            bookmarks = self.bookmarks.len(),
            urls = self.urls.len(),
            "memory profile opened"
        );
        Ok(())
    }

    fn uninitialize(&mut self) {
        self.open = false;
    }

    fn query(&mut self, request: QueryRequest) {
        let generation = request.generation;
        let pattern = request.pattern.clone();
        self.requests.push(request);

        if !self.open {
            self.deliver(ProfileEvent::Error {
                generation,
                code: ERROR_NOT_OPEN,
                message: "no available database connection".to_string(),
            });
            return;
        }

        for row in self.search_pattern(&pattern) {
            self.deliver(ProfileEvent::Row { generation, row });
        }
        self.deliver(ProfileEvent::Done { generation });
    }

    fn cancel(&mut self, generation: Generation) {
        match &mut self.delivery {
            Delivery::Queue(queue) => queue.retain(|event| event.generation() != generation),
            // Already sent; the controller drops them by generation
            #[cfg(feature = "runtime")]
            Delivery::Channel(_) => {}
        }
    }

    fn favorites(&self) -> Vec<Favorite> {
        self.favorites.clone()
    }
}
