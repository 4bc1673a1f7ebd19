//! Bounded play history

use juke_core::Song;
use std::collections::VecDeque;

/// Ring of previously played songs
///
/// Bounded at `capacity`; the oldest entry is evicted on overflow. Two
/// adjacent entries are never the same song, so replaying a track does
/// not pile up duplicates.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<Song>,
    capacity: usize,
}

impl History {
    /// Create a history bounded at `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a played song
    ///
    /// Skipped when the song matches the most recent entry; evicts the
    /// oldest entry when full.
    pub fn push(&mut self, song: Song) {
        if self.entries.back().is_some_and(|last| last.id == song.id) {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(song);
    }

    /// Take the most recently played song
    pub fn pop(&mut self) -> Option<Song> {
        self.entries.pop_back()
    }

    /// Number of remembered songs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot oldest-first
    pub fn snapshot(&self) -> Vec<Song> {
        self.entries.iter().cloned().collect()
    }
}
