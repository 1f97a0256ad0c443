//! Case-insensitive substring matching used for row highlighting.
//!
//! Comparison lower-cases one codepoint at a time, so offsets are always in
//! codepoints and the matched span has exactly as many codepoints as the
//! needle.

/// Span of a match inside a label, in codepoint offsets (`start..end`).
pub type Span = (usize, usize);

/// Find the leftmost case-insensitive occurrence of `needle` in `haystack`.
///
/// An empty needle matches at `(0, 0)`.
pub fn find(haystack: &str, needle: &str) -> Option<Span> {
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() {
        return Some((0, 0));
    }

    let hay: Vec<char> = haystack.chars().collect();
    if needle.len() > hay.len() {
        return None;
    }

    (0..=hay.len() - needle.len())
        .find(|&start| {
            hay[start..start + needle.len()]
                .iter()
                .zip(&needle)
                .all(|(&h, &n)| chars_eq_folded(h, n))
        })
        .map(|start| (start, start + needle.len()))
}

/// Check whether `haystack` contains `needle`, ignoring case.
pub fn contains(haystack: &str, needle: &str) -> bool {
    find(haystack, needle).is_some()
}

fn chars_eq_folded(a: char, b: char) -> bool {
    a == b || fold(a) == fold(b)
}

/// Lower-case a single codepoint, keeping it a single codepoint.
///
/// Characters whose full lowercase mapping expands (`İ` to `i` + U+0307)
/// fold to the first codepoint of that mapping.
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// SQL `LIKE` match of the whole of `haystack` against `pattern`, ignoring case.
///
/// `%` matches any run of codepoints, `_` exactly one.
pub fn like(haystack: &str, pattern: &str) -> bool {
    let hay: Vec<char> = haystack.chars().collect();
    let pat: Vec<char> = pattern.chars().collect();

    let (mut h, mut p) = (0, 0);
    // Last `%` seen and the haystack position it was tried at
    let mut backtrack: Option<(usize, usize)> = None;

    while h < hay.len() {
        match pat.get(p) {
            Some('%') => {
                backtrack = Some((p, h));
                p += 1;
            }
            Some(&c) if c == '_' || chars_eq_folded(hay[h], c) => {
                h += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((star, tried)) => {
                    p = star + 1;
                    h = tried + 1;
                    backtrack = Some((star, tried + 1));
                }
                None => return false,
            },
        }
    }

    pat[p..].iter().all(|&c| c == '%')
}

/// Slice `text` by a codepoint span. Out-of-range spans are clamped.
pub fn slice_span(text: &str, (start, end): Span) -> &str {
    let byte_at = |cp: usize| {
        text.char_indices()
            .nth(cp)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    };
    let start = byte_at(start);
    let end = byte_at(end).max(start);
    &text[start..end]
}
