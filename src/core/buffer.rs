//! Bounded, ordered list of autocomplete rows.
//!
//! Rows are kept in arrival order; ranking is the data source's job. Once
//! the list holds [`MAX_ENTRIES`] rows, further rows are dropped.

use super::entry::Entry;
use crate::error::{OmniboxError, OmniboxResult};

/// Maximum number of rows in the list, default rows included.
pub const MAX_ENTRIES: usize = 15;

/// Selection value meaning "nothing selected".
pub const NO_SELECTION: i32 = -1;

/// Row height hint reset value, matches the icon size.
pub const ICON_SIZE: f32 = 16.0;

/// Outcome of offering a row to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    Appended,
    /// The buffer was full; the row was dropped.
    Full,
}

/// The rows currently on display and the selection among them.
#[derive(Debug, Clone)]
pub struct ResultBuffer {
    entries: Vec<Entry>,
    selection: i32,
    tallest_row: f32,
    visible_capacity: usize,
}

impl ResultBuffer {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_ENTRIES),
            selection: NO_SELECTION,
            tallest_row: ICON_SIZE,
            visible_capacity: MAX_ENTRIES,
        }
    }

    /// Drop every row and reset the selection and row height hint.
    ///
    /// Returns true if a selection was cleared.
    pub fn clear(&mut self) -> bool {
        self.entries.clear();
        self.tallest_row = ICON_SIZE;
        let had_selection = self.selection != NO_SELECTION;
        self.selection = NO_SELECTION;
        had_selection
    }

    /// Append `entry` unless the buffer is already full.
    pub fn push(&mut self, entry: Entry) -> Ingest {
        if self.is_full() {
            return Ingest::Full;
        }
        self.entries.push(entry);
        Ingest::Appended
    }

    /// Append a data-source row, highlighting `search_text` in its title.
    pub fn ingest(&mut self, url: &str, title: &str, type_tag: i32, search_text: &str) -> Ingest {
        if self.is_full() {
            return Ingest::Full;
        }
        self.push(Entry::external(
            title.to_string(),
            url.to_string(),
            search_text,
            type_tag,
        ))
    }

    /// Change the selection. Returns whether it actually changed.
    ///
    /// Valid values are [`NO_SELECTION`] or an index below [`len`](Self::len);
    /// anything else is rejected and the old selection kept.
    pub fn select(&mut self, index: i32) -> OmniboxResult<bool> {
        let valid = index == NO_SELECTION
            || usize::try_from(index).is_ok_and(|i| i < self.entries.len());
        if !valid {
            return Err(OmniboxError::InvalidSelection {
                index,
                len: self.entries.len(),
            });
        }

        let changed = self.selection != index;
        self.selection = index;
        Ok(changed)
    }

    pub fn selection(&self) -> i32 {
        self.selection
    }

    /// The selected row, if any.
    pub fn selected(&self) -> Option<&Entry> {
        usize::try_from(self.selection)
            .ok()
            .and_then(|i| self.entries.get(i))
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_ENTRIES
    }

    /// Record the measured height of a row; the tallest one is kept.
    pub fn note_row_height(&mut self, height: f32) {
        if height > self.tallest_row {
            self.tallest_row = height;
        }
    }

    pub fn tallest_row(&self) -> f32 {
        self.tallest_row
    }

    /// How many rows the consumer has room for; clamped to `1..=MAX_ENTRIES`.
    pub fn set_visible_capacity(&mut self, rows: usize) {
        self.visible_capacity = rows.clamp(1, MAX_ENTRIES);
    }

    /// Rows actually visible: the smaller of the room available and the rows present.
    pub fn visible_len(&self) -> usize {
        self.visible_capacity.min(self.entries.len())
    }

    /// Rows that fit in the visible area.
    pub fn visible(&self) -> &[Entry] {
        &self.entries[..self.visible_len()]
    }
}

impl Default for ResultBuffer {
    fn default() -> Self {
        Self::new()
    }
}
