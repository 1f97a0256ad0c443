//! Synthetic "Search for ..." and "Go to ..." rows.
//!
//! These are derived purely from the settings, the search text and the
//! suffix table, so resynthesizing them for the same inputs always yields
//! identical rows.

use serde::{Deserialize, Serialize};

use super::entry::{Entry, IconKey, RowKind};
use crate::services::domain;
use crate::services::tld::TldTable;

/// Label template for the search row. `%s` is the search text, `{provider}` the provider name.
const SEARCH_LABEL: &str = "Search for %s on {provider}";

/// Label template for the domain completion row.
const GO_TO_LABEL: &str = "Go to %s";

/// Marker in a provider URL template replaced by the escaped search text.
const QUERY_MARKER: &str = "%s";

/// External search provider, e.g. `{ name = "DuckDuckGo", url_template = "https://duckduckgo.com/?q=%s" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEngineProvider {
    pub name: String,
    pub url_template: String,
}

impl SearchEngineProvider {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    pub fn has_query_placeholder(&self) -> bool {
        self.url_template.contains(QUERY_MARKER)
    }

    /// Substitute the escaped query for the first `%s`, or append it when there is none.
    pub fn resolve_url(&self, query: &str) -> String {
        let escaped = urlencoding::encode(query);
        match self.url_template.split_once(QUERY_MARKER) {
            Some((before, after)) => format!("{}{}{}", before, escaped, after),
            None => format!("{}{}", self.url_template, escaped),
        }
    }
}

/// Flags controlling which default rows are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsSettings {
    pub search_enabled: bool,
    pub completion_enabled: bool,
}

impl Default for DefaultsSettings {
    fn default() -> Self {
        Self {
            search_enabled: true,
            completion_enabled: true,
        }
    }
}

/// Produce the default rows for `search_text`, search row first.
pub fn default_entries(
    settings: DefaultsSettings,
    provider: Option<&SearchEngineProvider>,
    search_text: &str,
    tlds: &TldTable,
) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(2);

    if settings.search_enabled {
        if let Some(provider) = provider {
            let template = SEARCH_LABEL.replace("{provider}", &provider.name);
            entries.push(Entry::from_template(
                &template,
                search_text,
                provider.resolve_url(search_text),
                RowKind::Search,
                IconKey::SearchProvider,
            ));
        }
    }

    if settings.completion_enabled {
        let completion = domain::complete(search_text, tlds);
        entries.push(Entry::from_template(
            GO_TO_LABEL,
            &completion.text,
            completion.url,
            RowKind::Completion,
            IconKey::Globe,
        ));
    }

    entries
}
