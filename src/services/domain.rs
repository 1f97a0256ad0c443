//! Domain completion from remembered suffixes.
//!
//! Text that looks like a bare host gets the best remembered suffix
//! appended. Text that already has a dot is merged with the suffix that
//! overlaps its tail the most, so `exampl.co` becomes `exampl.com` rather
//! than `exampl.co.com`.

use super::tld::TldTable;

/// Result of completing a piece of search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Text shown to the user (`example.com`)
    pub text: String,
    /// Browsable URL (`http://example.com/`), or the input echoed back
    pub url: String,
}

impl Completion {
    fn echo(search_text: &str) -> Self {
        Self {
            text: search_text.to_string(),
            url: search_text.to_string(),
        }
    }

    fn completed(text: String) -> Self {
        let url = format!("http://{}/", text);
        Self { text, url }
    }

    /// Whether anything was appended to the input.
    pub fn is_completed(&self, search_text: &str) -> bool {
        self.text != search_text
    }
}

/// Complete `search_text` against the remembered suffixes in `tlds`.
///
/// Falls back to echoing the input when the table is empty, when the text
/// contains characters that can't appear in a host name, or when no suffix
/// overlaps a dotted input.
pub fn complete(search_text: &str, tlds: &TldTable) -> Completion {
    let Some(best) = tlds.best() else {
        return Completion::echo(search_text);
    };

    if search_text.is_empty() || !looks_like_host(search_text) {
        return Completion::echo(search_text);
    }

    if !search_text.contains('.') {
        return Completion::completed(format!("{}{}", search_text, best));
    }

    let winner = tlds
        .iter()
        .filter_map(|(suffix, score)| {
            let overlap = overlap_len(search_text, suffix);
            (overlap > 0).then_some((suffix, score, overlap))
        })
        .reduce(|best, candidate| {
            let (b_suffix, b_score, b_overlap) = best;
            let (c_suffix, c_score, c_overlap) = candidate;
            let better = c_overlap > b_overlap
                || (c_overlap == b_overlap
                    && (c_score > b_score || (c_score == b_score && c_suffix < b_suffix)));
            if better {
                candidate
            } else {
                best
            }
        });

    match winner {
        Some((suffix, _, overlap)) => {
            Completion::completed(format!("{}{}", search_text, &suffix[overlap..]))
        }
        None => Completion::echo(search_text),
    }
}

/// Alphanumerics, `-` and `.` only.
fn looks_like_host(text: &str) -> bool {
    text.chars()
        .all(|ch| ch.is_alphanumeric() || ch == '-' || ch == '.')
}

/// Length in bytes of the longest tail of `text` that is a prefix of `suffix`.
///
/// Only tails starting on a char boundary are considered, so the returned
/// length always splits `suffix` on a char boundary too.
fn overlap_len(text: &str, suffix: &str) -> usize {
    text.char_indices()
        .map(|(i, _)| &text[i..])
        .filter(|tail| tail.len() <= suffix.len())
        .find(|tail| suffix.starts_with(tail))
        .map(str::len)
        .unwrap_or(0)
}
