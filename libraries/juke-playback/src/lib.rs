//! Juke Playback
//!
//! The shared playback sequencer for the Juke jukebox: one current
//! song, a collaborative vote-aware queue, bounded play history,
//! shuffle, and play/pause/skip/previous semantics.
//!
//! The [`Sequencer`] is a synchronous state machine; the embedding
//! layer serializes commands behind its own lock and forwards audio
//! completion signals to [`Sequencer::on_playback_finished`]. Audio
//! decode and device output sit behind the `juke_core::AudioOutput`
//! trait.

#![forbid(unsafe_code)]

pub mod clock;
pub mod error;
pub mod events;
pub mod history;
pub mod queue;
pub mod sequencer;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use history::History;
pub use queue::Queue;
pub use sequencer::Sequencer;
pub use types::{CurrentSong, QueueEntry, SequencerConfig};
