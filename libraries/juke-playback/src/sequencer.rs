//! The shared playback sequencer

use crate::clock::{Clock, SystemClock};
use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::history::History;
use crate::queue::Queue;
use crate::types::{CurrentSong, QueueEntry, SequencerConfig};
use juke_core::{AudioOutput, PlaybackToken, SessionId, Song, SongId};
use std::time::Duration;
use tracing::{debug, warn};

/// Below this much elapsed playback, `previous` steps back through
/// history; at or above it, it restarts the current song instead.
const PREVIOUS_RESTART_THRESHOLD: Duration = Duration::from_millis(3000);

/// State machine owning the current song, queue, and history
///
/// All commands take `&mut self`; the embedding layer serializes them
/// behind its own lock. Completion signals from the audio output
/// arrive through [`on_playback_finished`](Self::on_playback_finished)
/// tagged with the token of the attempt that produced them, so signals
/// from an output the sequencer has already replaced are ignored.
///
/// State observations are emitted as [`PlaybackEvent`]s, accumulated
/// until the embedding layer collects them with
/// [`drain_events`](Self::drain_events).
pub struct Sequencer {
    current: Option<CurrentSong>,
    queue: Queue,
    history: History,
    shuffle: bool,
    voting_order: bool,
    output: Box<dyn AudioOutput>,
    clock: Box<dyn Clock>,
    token_counter: u64,
    active_token: Option<PlaybackToken>,
    pending_events: Vec<PlaybackEvent>,
}

impl Sequencer {
    /// Create a sequencer with default configuration
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self::with_config(output, SequencerConfig::default())
    }

    /// Create a sequencer with custom configuration
    pub fn with_config(output: Box<dyn AudioOutput>, config: SequencerConfig) -> Self {
        Self::with_clock(output, Box::new(SystemClock), config)
    }

    /// Create a sequencer with an injected clock
    pub fn with_clock(
        output: Box<dyn AudioOutput>,
        clock: Box<dyn Clock>,
        config: SequencerConfig,
    ) -> Self {
        Self {
            current: None,
            queue: Queue::new(),
            history: History::new(config.history_capacity),
            shuffle: false,
            voting_order: config.voting_order,
            output,
            clock,
            token_counter: 0,
            active_token: None,
            pending_events: Vec::new(),
        }
    }

    /// Play `song` immediately when idle, otherwise add it to the queue
    ///
    /// # Errors
    /// Returns an error if the audio output fails to shut down
    pub fn play_or_queue(&mut self, song: Song, session: SessionId) -> Result<()> {
        if self.current.is_some() {
            self.queue_song(song, session);
            Ok(())
        } else {
            self.start_song(song, 0, Vec::new(), None)
        }
    }

    /// Add `song` to the queue
    ///
    /// A song already queued is not duplicated; the request registers
    /// as a vote on the existing entry instead.
    pub fn queue_song(&mut self, song: Song, session: SessionId) {
        if let Some(position) = self.queue.position_of(song.id) {
            self.vote(position, session);
        } else {
            self.queue.push(song, session);
            self.pending_events.push(PlaybackEvent::QueueChanged {
                length: self.queue.len(),
            });
        }
    }

    /// Vote for the queue entry at `position`
    ///
    /// Idempotent per session; out-of-range positions are ignored.
    pub fn vote(&mut self, position: usize, session: SessionId) {
        if self.queue.vote(position, &session, self.voting_order) {
            self.pending_events.push(PlaybackEvent::QueueChanged {
                length: self.queue.len(),
            });
        }
    }

    /// Replace the current song with `song`, bypassing the queue
    ///
    /// The interrupted song is recorded in history.
    ///
    /// # Errors
    /// Returns an error if the audio output fails to shut down
    pub fn play_now(&mut self, song: Song) -> Result<()> {
        let previous_song_id = self.current.as_ref().map(|c| c.song.id);
        if let Some(current) = &self.current {
            self.history.push(current.song.clone());
        }
        self.start_song(song, 0, Vec::new(), previous_song_id)
    }

    /// Advance to the next queued song
    ///
    /// With shuffle on, a uniformly random entry is taken; otherwise
    /// the head. An empty queue ends playback and clears the current
    /// song.
    ///
    /// # Errors
    /// Returns an error if the audio output fails to shut down
    pub fn next(&mut self) -> Result<()> {
        let previous_song_id = self.current.as_ref().map(|c| c.song.id);
        if let Some(current) = &self.current {
            self.history.push(current.song.clone());
        }
        if let Some(entry) = self.take_next_entry() {
            self.start_song(entry.song, entry.votes, entry.voters, previous_song_id)
        } else {
            self.go_idle();
            Ok(())
        }
    }

    /// Step back to the previously played song
    ///
    /// When the current song has played for at least three seconds it
    /// is restarted from the top instead of truly going back; a track
    /// skipping backwards near its end reads as broken. Otherwise the
    /// most recent history entry plays and the interrupted song is put
    /// back at the front of the queue. Idle, or empty history, is a
    /// no-op.
    ///
    /// # Errors
    /// Returns an error if the audio output fails to shut down
    pub fn previous(&mut self) -> Result<()> {
        let elapsed = match &self.current {
            Some(current) => self.clock.now().duration_since(current.started_at),
            None => return Ok(()),
        };

        if elapsed >= PREVIOUS_RESTART_THRESHOLD {
            if let Some(current) = self.current.as_mut() {
                current.repeat = true;
            }
            return self.restart_current();
        }

        let Some(prev) = self.history.pop() else {
            return Ok(());
        };

        let mut previous_song_id = None;
        if let Some(current) = self.current.take() {
            previous_song_id = Some(current.song.id);
            self.queue.push_front(QueueEntry {
                song: current.song,
                votes: current.votes,
                voters: current.voters,
            });
            self.pending_events.push(PlaybackEvent::QueueChanged {
                length: self.queue.len(),
            });
        }
        self.start_song(prev, 0, Vec::new(), previous_song_id)
    }

    /// Restart the current song's output from the top
    ///
    /// No-op when idle. Queue and history are untouched.
    ///
    /// # Errors
    /// Returns an error if the audio output fails to shut down
    pub fn resume(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Ok(());
        }
        self.restart_current()
    }

    /// Stop playback without clearing the current song
    ///
    /// Natural completion of the stopped output will not auto-advance.
    ///
    /// # Errors
    /// Returns an error if the audio output fails to shut down
    pub fn stop(&mut self) -> Result<()> {
        if let Some(current) = self.current.as_mut() {
            current.auto_play_next = false;
            current.playing = false;
            self.pending_events
                .push(PlaybackEvent::StateChanged { playing: false });
        }
        self.output
            .stop()
            .map_err(|e| PlaybackError::Output(e.to_string()))
    }

    /// Remove the queue entry at `position`; out of range is a no-op
    pub fn remove(&mut self, position: usize) {
        if self.queue.remove(position).is_some() {
            self.pending_events.push(PlaybackEvent::QueueChanged {
                length: self.queue.len(),
            });
        }
    }

    /// Move the queue entry at `position` one slot toward the head
    pub fn move_up(&mut self, position: usize) {
        if self.queue.move_up(position) {
            self.pending_events.push(PlaybackEvent::QueueChanged {
                length: self.queue.len(),
            });
        }
    }

    /// Move the queue entry at `position` one slot toward the tail
    pub fn move_down(&mut self, position: usize) {
        if self.queue.move_down(position) {
            self.pending_events.push(PlaybackEvent::QueueChanged {
                length: self.queue.len(),
            });
        }
    }

    /// Turn shuffle on; affects only future `next` selections
    pub fn start_shuffle(&mut self) {
        self.shuffle = true;
    }

    /// Turn shuffle off
    pub fn stop_shuffle(&mut self) {
        self.shuffle = false;
    }

    /// Make votes reorder the queue
    pub fn enable_voting_order(&mut self) {
        self.voting_order = true;
    }

    /// Stop votes from reordering the queue
    pub fn disable_voting_order(&mut self) {
        self.voting_order = false;
    }

    /// Handle a completion signal from the audio output
    ///
    /// `token` identifies the playback attempt that completed; a token
    /// other than the active one is ignored. A matching completion
    /// clears the repeat flag and auto-advances unless auto-play was
    /// turned off.
    ///
    /// # Errors
    /// Returns an error if the audio output fails to shut down while
    /// advancing
    pub fn on_playback_finished(&mut self, token: PlaybackToken) -> Result<()> {
        if self.active_token != Some(token) {
            debug!(%token, "ignoring completion for stale playback token");
            return Ok(());
        }
        self.active_token = None;

        let Some(current) = self.current.as_mut() else {
            return Ok(());
        };
        current.playing = false;
        let song_id = current.song.id;
        let auto_play_next = current.auto_play_next;
        current.repeat = false;

        self.pending_events
            .push(PlaybackEvent::SongFinished { song_id });

        if !auto_play_next {
            self.pending_events
                .push(PlaybackEvent::StateChanged { playing: false });
            return Ok(());
        }
        self.next()
    }

    /// Snapshot of the queue
    pub fn queue(&self) -> Vec<QueueEntry> {
        self.queue.snapshot()
    }

    /// Snapshot of the current song, if any
    pub fn current_song(&self) -> Option<CurrentSong> {
        self.current.clone()
    }

    /// Whether audio is actively playing
    pub fn is_playing(&self) -> bool {
        self.current.as_ref().is_some_and(|c| c.playing)
    }

    /// Whether shuffle is on
    pub fn is_shuffle_on(&self) -> bool {
        self.shuffle
    }

    /// Whether votes reorder the queue
    pub fn is_voting_order_enabled(&self) -> bool {
        self.voting_order
    }

    /// Whether a current song is selected, playing or not
    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    /// Snapshot of the play history, oldest first
    pub fn history(&self) -> Vec<Song> {
        self.history.snapshot()
    }

    /// Number of queued entries
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Take all accumulated events, leaving the buffer empty
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Start `song`, walking the queue on output failures
    ///
    /// A failed start is treated as an instantly finished track: the
    /// failure is reported, the song lands in history, and the next
    /// queue entry is tried, until one starts or the queue runs dry.
    fn start_song(
        &mut self,
        song: Song,
        votes: u32,
        voters: Vec<SessionId>,
        previous_song_id: Option<SongId>,
    ) -> Result<()> {
        let mut previous = previous_song_id;
        let mut next_item = Some((song, votes, voters));

        while let Some((song, votes, voters)) = next_item.take() {
            let song_id = song.id;
            if self.try_start(song, votes, voters, previous) {
                return Ok(());
            }

            previous = Some(song_id);
            if let Some(current) = self.current.take() {
                self.pending_events.push(PlaybackEvent::SongFinished {
                    song_id: current.song.id,
                });
                self.history.push(current.song);
            }
            next_item = self
                .take_next_entry()
                .map(|entry| (entry.song, entry.votes, entry.voters));
        }

        self.active_token = None;
        self.pending_events
            .push(PlaybackEvent::StateChanged { playing: false });
        Ok(())
    }

    /// Make `song` current and start its output; false on start failure
    fn try_start(
        &mut self,
        song: Song,
        votes: u32,
        voters: Vec<SessionId>,
        previous_song_id: Option<SongId>,
    ) -> bool {
        self.end_output_quietly();

        self.token_counter += 1;
        let token = PlaybackToken::new(self.token_counter);
        self.active_token = Some(token);

        let path = song.path.clone();
        let song_id = song.id;
        self.current = Some(CurrentSong {
            song,
            playing: true,
            auto_play_next: true,
            started_at: self.clock.now(),
            repeat: false,
            votes,
            voters,
        });
        self.pending_events.push(PlaybackEvent::SongChanged {
            song_id,
            previous_song_id,
        });

        match self.output.start(&path, token) {
            Ok(()) => {
                self.pending_events
                    .push(PlaybackEvent::StateChanged { playing: true });
                true
            }
            Err(e) => {
                warn!(song_id, error = %e, "audio output failed to start");
                self.pending_events.push(PlaybackEvent::Error {
                    message: e.to_string(),
                });
                if let Some(current) = self.current.as_mut() {
                    current.playing = false;
                }
                self.active_token = None;
                false
            }
        }
    }

    /// Restart the current song's output with a fresh token
    fn restart_current(&mut self) -> Result<()> {
        let (path, song_id) = match &self.current {
            Some(current) => (current.song.path.clone(), current.song.id),
            None => return Ok(()),
        };

        self.end_output_quietly();

        self.token_counter += 1;
        let token = PlaybackToken::new(self.token_counter);
        self.active_token = Some(token);

        if let Some(current) = self.current.as_mut() {
            current.playing = true;
            current.auto_play_next = true;
            current.started_at = self.clock.now();
        }

        match self.output.start(&path, token) {
            Ok(()) => {
                self.pending_events
                    .push(PlaybackEvent::StateChanged { playing: true });
                Ok(())
            }
            Err(e) => {
                warn!(song_id, error = %e, "audio output failed to restart");
                self.active_token = None;
                if let Some(current) = self.current.as_mut() {
                    current.playing = false;
                }
                self.pending_events.push(PlaybackEvent::Error {
                    message: e.to_string(),
                });
                self.pending_events
                    .push(PlaybackEvent::StateChanged { playing: false });
                Ok(())
            }
        }
    }

    /// Dequeue the next entry, honoring shuffle
    fn take_next_entry(&mut self) -> Option<QueueEntry> {
        let entry = if self.shuffle {
            self.queue.remove_random()
        } else {
            self.queue.pop_front()
        };
        if entry.is_some() {
            self.pending_events.push(PlaybackEvent::QueueChanged {
                length: self.queue.len(),
            });
        }
        entry
    }

    /// End output and clear the current song
    fn go_idle(&mut self) {
        self.end_output_quietly();
        self.active_token = None;
        if self.current.take().is_some() {
            self.pending_events
                .push(PlaybackEvent::StateChanged { playing: false });
        }
    }

    /// Stop the output, tolerating shutdown failures
    ///
    /// Used when tearing down one output to start another; the failure
    /// of the dying output must not block its replacement.
    fn end_output_quietly(&mut self) {
        if let Err(e) = self.output.stop() {
            warn!(error = %e, "audio output failed to stop");
        }
    }
}
