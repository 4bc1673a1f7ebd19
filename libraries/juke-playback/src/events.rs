//! Playback events

use juke_core::SongId;
use serde::{Deserialize, Serialize};

/// Events emitted by the sequencer
///
/// Accumulated internally and handed out through
/// [`drain_events`](crate::Sequencer::drain_events); the embedding
/// layer forwards them to connected clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Output started or stopped producing audio
    StateChanged {
        /// Whether audio is now playing
        playing: bool,
    },

    /// The current song changed
    SongChanged {
        /// The new current song
        song_id: SongId,
        /// The song it replaced, if any
        previous_song_id: Option<SongId>,
    },

    /// A playback attempt finished, naturally or forced
    SongFinished {
        /// The song that finished
        song_id: SongId,
    },

    /// The queue's contents or order changed
    QueueChanged {
        /// Queue length after the change
        length: usize,
    },

    /// A non-fatal playback error
    Error {
        /// Human-readable description
        message: String,
    },
}
