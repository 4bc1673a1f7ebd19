//! The shared song queue

use crate::types::QueueEntry;
use juke_core::{SessionId, Song, SongId};
use rand::Rng;

/// Ordered queue of songs with per-entry votes
///
/// A song id appears at most once; queueing a song that is already
/// present is handled by the sequencer as a vote on the existing
/// entry. Out-of-range positions are ignored throughout, matching the
/// documented silent no-op policy for queue commands.
#[derive(Debug, Default)]
pub struct Queue {
    entries: Vec<QueueEntry>,
}

impl Queue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the entry holding `song_id`, if queued
    pub fn position_of(&self, song_id: SongId) -> Option<usize> {
        self.entries.iter().position(|e| e.song.id == song_id)
    }

    /// Append a song with an initial vote from `session`
    pub fn push(&mut self, song: Song, session: SessionId) {
        self.entries.push(QueueEntry::new(song, session));
    }

    /// Put an entry at the front of the queue
    pub fn push_front(&mut self, entry: QueueEntry) {
        self.entries.insert(0, entry);
    }

    /// Register a vote on the entry at `position`
    ///
    /// Idempotent per session. When `voting_order` is set, a counted
    /// vote re-sorts the queue descending by votes; the sort is stable
    /// so ties keep their insertion order. Returns whether the vote
    /// counted.
    pub fn vote(&mut self, position: usize, session: &SessionId, voting_order: bool) -> bool {
        let Some(entry) = self.entries.get_mut(position) else {
            return false;
        };
        if entry.voters.contains(session) {
            return false;
        }

        entry.voters.push(session.clone());
        entry.votes += 1;

        if voting_order {
            self.entries.sort_by(|a, b| b.votes.cmp(&a.votes));
        }
        true
    }

    /// Dequeue the head entry
    pub fn pop_front(&mut self) -> Option<QueueEntry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    /// Dequeue a uniformly random entry
    pub fn remove_random(&mut self) -> Option<QueueEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let position = rand::thread_rng().gen_range(0..self.entries.len());
        Some(self.entries.remove(position))
    }

    /// Remove the entry at `position`; out of range is a no-op
    pub fn remove(&mut self, position: usize) -> Option<QueueEntry> {
        if position < self.entries.len() {
            Some(self.entries.remove(position))
        } else {
            None
        }
    }

    /// Swap the entry at `position` with its predecessor
    ///
    /// The head and out-of-range positions are no-ops. Returns whether
    /// anything moved.
    pub fn move_up(&mut self, position: usize) -> bool {
        if position > 0 && position < self.entries.len() {
            self.entries.swap(position, position - 1);
            true
        } else {
            false
        }
    }

    /// Swap the entry at `position` with its successor
    ///
    /// The tail and out-of-range positions are no-ops. Returns whether
    /// anything moved.
    pub fn move_down(&mut self, position: usize) -> bool {
        if position + 1 < self.entries.len() {
            self.entries.swap(position, position + 1);
            true
        } else {
            false
        }
    }

    /// Number of queued entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of all entries in queue order
    pub fn snapshot(&self) -> Vec<QueueEntry> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn song(id: i64) -> Song {
        Song {
            id,
            path: PathBuf::from(format!("/m/{id}.mp3")),
            title: format!("Song {id}"),
            artist: "X".to_string(),
            album: "Alb".to_string(),
            genre: "Rock".to_string(),
        }
    }

    fn session(name: &str) -> SessionId {
        SessionId::new(name)
    }

    #[test]
    fn vote_is_idempotent_per_session() {
        let mut queue = Queue::new();
        queue.push(song(1), session("a"));

        assert!(queue.vote(0, &session("b"), false));
        assert!(!queue.vote(0, &session("b"), false));

        let entries = queue.snapshot();
        assert_eq!(entries[0].votes, 2);
        assert_eq!(entries[0].voters.len(), 2);
    }

    #[test]
    fn vote_out_of_range_is_ignored() {
        let mut queue = Queue::new();
        queue.push(song(1), session("a"));
        assert!(!queue.vote(5, &session("b"), false));
        assert_eq!(queue.snapshot()[0].votes, 1);
    }

    #[test]
    fn voting_order_sorts_descending_with_stable_ties() {
        let mut queue = Queue::new();
        queue.push(song(1), session("a"));
        queue.push(song(2), session("a"));
        queue.push(song(3), session("a"));

        queue.vote(2, &session("b"), true);

        let ids: Vec<i64> = queue.snapshot().iter().map(|e| e.song.id).collect();
        // Song 3 has 2 votes and moves to the head; 1 and 2 keep their
        // relative order
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn votes_do_not_reorder_when_disabled() {
        let mut queue = Queue::new();
        queue.push(song(1), session("a"));
        queue.push(song(2), session("a"));

        queue.vote(1, &session("b"), false);

        let ids: Vec<i64> = queue.snapshot().iter().map(|e| e.song.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn move_down_on_last_entry_is_a_no_op() {
        let mut queue = Queue::new();
        queue.push(song(1), session("a"));
        queue.push(song(2), session("a"));

        assert!(!queue.move_down(1));
        let ids: Vec<i64> = queue.snapshot().iter().map(|e| e.song.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn move_up_on_head_is_a_no_op() {
        let mut queue = Queue::new();
        queue.push(song(1), session("a"));
        queue.push(song(2), session("a"));

        assert!(!queue.move_up(0));
        assert!(queue.move_up(1));
        let ids: Vec<i64> = queue.snapshot().iter().map(|e| e.song.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn remove_random_takes_exactly_one_entry() {
        let mut queue = Queue::new();
        for id in 1..=5 {
            queue.push(song(id), session("a"));
        }
        let removed = queue.remove_random().unwrap();
        assert_eq!(queue.len(), 4);
        assert!(queue.position_of(removed.song.id).is_none());
    }

    #[test]
    fn remove_random_reaches_every_entry() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let mut queue = Queue::new();
            for id in 1..=4 {
                queue.push(song(id), session("a"));
            }
            seen.insert(queue.remove_random().unwrap().song.id);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn remove_out_of_range_is_ignored() {
        let mut queue = Queue::new();
        queue.push(song(1), session("a"));
        assert!(queue.remove(3).is_none());
        assert_eq!(queue.len(), 1);
    }
}
