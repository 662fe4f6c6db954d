//! In-memory playlist implementing the playback cursor

use cadence_core::{ItemRef, Locator, Metadata, PlaylistSession};
use std::collections::HashMap;
use tracing::debug;

use super::shuffle::shuffle_order;
use crate::types::{RepeatMode, ShuffleMode};

/// Ordered list of items with a playback cursor
///
/// Navigation walks `order`, a permutation of row indices. With shuffle off it is the
/// identity. Clearing the cursor while shuffled invalidates the shuffle anchor: the
/// next row made current is reshuffled to the front of a fresh order.
#[derive(Debug, Clone)]
pub struct Playlist {
    name: String,
    items: Vec<ItemRef>,
    order: Vec<usize>,
    current: Option<usize>,
    last_played: Option<usize>,
    stop_after: Option<usize>,
    scrobbled: bool,
    shuffle: ShuffleMode,
    repeat: RepeatMode,
    reshuffle_pending: bool,
    stream_metadata: HashMap<Locator, Metadata>,
}

impl Playlist {
    /// Create an empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            order: Vec::new(),
            current: None,
            last_played: None,
            stop_after: None,
            scrobbled: false,
            shuffle: ShuffleMode::Off,
            repeat: RepeatMode::Off,
            reshuffle_pending: false,
            stream_metadata: HashMap::new(),
        }
    }

    /// Create a playlist holding `items`
    pub fn with_items(name: impl Into<String>, items: impl IntoIterator<Item = ItemRef>) -> Self {
        let mut playlist = Self::new(name);
        playlist.extend(items);
        playlist
    }

    /// Playlist name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append one item
    pub fn push(&mut self, item: ItemRef) {
        self.order.push(self.items.len());
        self.items.push(item);
    }

    /// Append several items
    pub fn extend(&mut self, items: impl IntoIterator<Item = ItemRef>) {
        for item in items {
            self.push(item);
        }
    }

    /// All items in row order
    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    /// Rows in navigation order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Current shuffle mode
    pub fn shuffle(&self) -> ShuffleMode {
        self.shuffle
    }

    /// Change shuffle mode
    ///
    /// Turning shuffle on reshuffles with the current row first; turning it off
    /// restores row order.
    pub fn set_shuffle(&mut self, mode: ShuffleMode) {
        if self.shuffle == mode {
            return;
        }

        self.shuffle = mode;
        self.reshuffle_pending = false;

        match mode {
            ShuffleMode::Off => self.order = (0..self.items.len()).collect(),
            ShuffleMode::Random | ShuffleMode::Smart => self.reshuffle(self.current),
        }
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Change repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    /// Whether the current track was already scrobbled
    pub fn is_scrobbled(&self) -> bool {
        self.scrobbled
    }

    /// Metadata received from a live stream, if any
    pub fn stream_metadata(&self, locator: &Locator) -> Option<&Metadata> {
        self.stream_metadata.get(locator)
    }

    /// Metadata to display for a row: stream metadata wins over the item's own
    pub fn display_metadata(&self, index: usize) -> Option<Metadata> {
        let item = self.items.get(index)?;
        Some(
            self.stream_metadata
                .get(item.locator())
                .cloned()
                .unwrap_or_else(|| item.metadata()),
        )
    }

    fn position_of(&self, row: usize) -> Option<usize> {
        self.order.iter().position(|&candidate| candidate == row)
    }

    fn reshuffle(&mut self, first: Option<usize>) {
        self.order = (0..self.items.len()).collect();
        let items = &self.items;
        shuffle_order(&mut self.order, self.shuffle, |row| {
            items[row].metadata().artist
        });

        if let Some(pos) = first.and_then(|row| self.position_of(row)) {
            self.order[..=pos].rotate_right(1);
        }

        debug!(playlist = %self.name, order = ?self.order, "Reshuffled playlist");
    }
}

impl PlaylistSession for Playlist {
    fn current_index(&self) -> Option<usize> {
        self.current
    }

    fn set_current_index(&mut self, index: Option<usize>) {
        let index = index.filter(|&row| row < self.items.len());

        if index != self.current {
            if self.current.is_some() {
                self.last_played = self.current;
            }
            self.scrobbled = false;
        }

        match index {
            None if self.shuffle != ShuffleMode::Off => self.reshuffle_pending = true,
            Some(row) if self.reshuffle_pending => {
                self.reshuffle_pending = false;
                self.reshuffle(Some(row));
            }
            _ => {}
        }

        self.current = index;
    }

    fn next_index(&self) -> Option<usize> {
        let Some(current) = self.current else {
            return self.order.first().copied();
        };

        if self.repeat == RepeatMode::One {
            return Some(current);
        }

        let pos = self.position_of(current)?;
        match self.order.get(pos + 1) {
            Some(&next) => Some(next),
            None if self.repeat == RepeatMode::All => self.order.first().copied(),
            None => None,
        }
    }

    fn previous_index(&self) -> Option<usize> {
        let current = self.current?;

        if self.repeat == RepeatMode::One {
            return Some(current);
        }

        let pos = self.position_of(current)?;
        if pos > 0 {
            Some(self.order[pos - 1])
        } else if self.repeat == RepeatMode::All {
            self.order.last().copied()
        } else {
            None
        }
    }

    fn last_played_index(&self) -> Option<usize> {
        self.last_played.filter(|&row| row < self.items.len())
    }

    fn stop_after_current(&self) -> bool {
        self.current.is_some() && self.stop_after == self.current
    }

    fn stop_after(&mut self, index: Option<usize>) {
        self.stop_after = index;
    }

    fn row_count(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, index: usize) -> Option<ItemRef> {
        self.items.get(index).cloned()
    }

    fn set_stream_metadata(&mut self, locator: &Locator, metadata: Metadata) {
        self.stream_metadata.insert(locator.clone(), metadata);
    }

    fn set_scrobbled(&mut self, scrobbled: bool) {
        self.scrobbled = scrobbled;
    }
}
