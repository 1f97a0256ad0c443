//! Rows shown in the autocomplete list.

use serde::{Deserialize, Serialize};

use super::matcher::{self, Span};

/// Which group a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    /// "Search for ... on ..." entry
    Search,
    /// "Go to ..." domain completion entry
    Completion,
    /// A row delivered by the data source
    External,
}

/// Icon to show next to a row. Resolution to pixels happens elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "id")]
pub enum IconKey {
    /// The configured search provider's icon
    SearchProvider,
    /// Generic globe used for completed domains
    Globe,
    /// Favicon identifier reported by the data source
    Favicon(i32),
}

/// One candidate suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub label: String,
    pub url: String,
    pub row_kind: RowKind,
    /// Highlighted part of `label`, in codepoints.
    pub match_span: Option<Span>,
    pub icon_key: IconKey,
}

impl Entry {
    /// Build an entry for a data-source row, highlighting `search_text` in the label.
    pub fn external(label: String, url: String, search_text: &str, type_tag: i32) -> Self {
        // Rows that don't contain the text are still shown, unhighlighted
        let match_span = matcher::find(&label, search_text);
        Self {
            label,
            url,
            row_kind: RowKind::External,
            match_span,
            icon_key: IconKey::Favicon(type_tag),
        }
    }

    /// Build a synthetic entry from a template containing a `%s` marker.
    ///
    /// The marker is replaced by `insert` and the inserted text becomes the
    /// match span. Without a marker the template is used as-is, unhighlighted.
    pub fn from_template(
        template: &str,
        insert: &str,
        url: String,
        row_kind: RowKind,
        icon_key: IconKey,
    ) -> Self {
        let (label, match_span) = match template.split_once("%s") {
            Some((before, after)) => {
                let start = before.chars().count();
                let end = start + insert.chars().count();
                (format!("{before}{insert}{after}"), Some((start, end)))
            }
            None => (template.to_string(), None),
        };

        Self {
            label,
            url,
            row_kind,
            match_span,
            icon_key,
        }
    }

    /// The highlighted part of the label, if any.
    pub fn matched_text(&self) -> Option<&str> {
        self.match_span
            .map(|span| matcher::slice_span(&self.label, span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_highlight() {
        let entry = Entry::external(
            "http://rust-lang.org/ - Rust".into(),
            "http://rust-lang.org/".into(),
            "LANG",
            3,
        );
        assert_eq!(entry.match_span, Some((12, 16)));
        assert_eq!(entry.matched_text(), Some("lang"));
        assert_eq!(entry.icon_key, IconKey::Favicon(3));
        assert_eq!(entry.row_kind, RowKind::External);
    }

    #[test]
    fn test_external_without_match() {
        let entry = Entry::external("Example".into(), "http://e.com/".into(), "zzz", 0);
        assert_eq!(entry.match_span, None);
        assert_eq!(entry.matched_text(), None);
    }

    #[test]
    fn test_template_marker() {
        let entry = Entry::from_template(
            "Search for %s on Duck",
            "crème",
            "u".into(),
            RowKind::Search,
            IconKey::SearchProvider,
        );
        assert_eq!(entry.label, "Search for crème on Duck");
        assert_eq!(entry.match_span, Some((11, 16)));
        assert_eq!(entry.matched_text(), Some("crème"));
    }

    #[test]
    fn test_template_without_marker() {
        let entry = Entry::from_template("Open", "x", "u".into(), RowKind::Completion, IconKey::Globe);
        assert_eq!(entry.label, "Open");
        assert_eq!(entry.match_span, None);
    }

    #[test]
    fn test_entry_serialize() {
        let entry = Entry::external("a - b".into(), "a".into(), "b", 9);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"rowKind\":\"external\""));
        assert!(json.contains("\"matchSpan\":[4,5]"));
        assert!(json.contains("\"iconKey\":{\"type\":\"favicon\",\"id\":9}"));
    }
}
