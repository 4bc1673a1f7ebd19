//! Playback state types

use juke_core::{SessionId, Song};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A song waiting in the shared queue
///
/// Votes accumulate per entry; each session counts at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// The queued song
    pub song: Song,

    /// Accumulated vote count
    pub votes: u32,

    /// Sessions that have voted for this entry
    pub voters: Vec<SessionId>,
}

impl QueueEntry {
    /// Create an entry with a single initial vote from `session`
    pub fn new(song: Song, session: SessionId) -> Self {
        Self {
            song,
            votes: 1,
            voters: vec![session],
        }
    }
}

/// The song currently owned by the sequencer
///
/// Holds every transient playback field. Not serializable because the
/// start instant only has meaning inside the running process.
#[derive(Debug, Clone)]
pub struct CurrentSong {
    /// The current song
    pub song: Song,

    /// Whether output is actively producing audio
    pub playing: bool,

    /// Whether natural completion should advance to the next queue entry
    pub auto_play_next: bool,

    /// When this playback attempt started
    pub started_at: Instant,

    /// Set while the song is being replayed from the top; cleared when
    /// that playback attempt completes
    pub repeat: bool,

    /// Votes carried over from the queue entry
    pub votes: u32,

    /// Voters carried over from the queue entry
    pub voters: Vec<SessionId>,
}

/// Sequencer configuration
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Maximum number of songs kept in play history
    pub history_capacity: usize,

    /// Whether votes reorder the queue
    pub voting_order: bool,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            history_capacity: 25,
            voting_order: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn queue_entry_starts_with_one_vote() {
        let song = Song {
            id: 1,
            path: PathBuf::from("/m/a.mp3"),
            title: "A".to_string(),
            artist: "X".to_string(),
            album: "Alb".to_string(),
            genre: "Rock".to_string(),
        };
        let entry = QueueEntry::new(song, SessionId::new("s1"));
        assert_eq!(entry.votes, 1);
        assert_eq!(entry.voters, vec![SessionId::new("s1")]);
    }

    #[test]
    fn default_config_caps_history_at_25() {
        let config = SequencerConfig::default();
        assert_eq!(config.history_capacity, 25);
        assert!(!config.voting_order);
    }
}
