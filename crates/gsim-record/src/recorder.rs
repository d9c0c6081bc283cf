//! The recorder state machine:
//!
//! ```text
//!                  start(path)
//!      [IDLE] ─────────────────▶ [RECORDING]
//!        ▲                         │  │   ▲
//!        │                   pause │  │   │ play (resume)
//!        │                         ▼  │   │
//!        │                    [PAUSED] ◀──┘
//!        │         stop()                 stop()
//!        └──────────────[ writes TERMINATE, closes fp ]
//! ```
//!
//! `record()` is the predicate used by emitters; it is true iff
//! the recorder is `Recording`. Composing it with "and the context is
//! alive" is `gsim-sim::Context`'s job, not this crate's — the recorder has
//! no notion of simulation termination.
//!
//! Every mutator that needs to emit calls [`Recorder::emit`], the single
//! choke point every replayable mutation wraps around: callers do the
//! mutation, then call `emit` once, so there is exactly one place to
//! intercept in tests.

use std::path::{Path, PathBuf};

use gsim_core::MonotonicClock;
use tracing::warn;

use crate::error::{RecordError, RecordResult};
use crate::event::{EventPayload, RecordEvent};
use crate::file::GgrWriter;
use crate::opcode::Opcode;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Recording,
    Paused,
}

pub struct Recorder {
    state: State,
    writer: Option<GgrWriter>,
    clock: MonotonicClock,
    path: Option<PathBuf>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            writer: None,
            clock: MonotonicClock::new(),
            path: None,
        }
    }

    /// `start(path)`. Fails [`RecordError::RecorderState`] if
    /// already recording or paused; fails [`RecordError::FileExists`] if the
    /// (normalized `.ggr`) path already exists.
    pub fn start(&mut self, path: impl AsRef<Path>) -> RecordResult<()> {
        if self.state != State::Idle {
            return Err(RecordError::RecorderState(
                "start() called while already recording".into(),
            ));
        }
        let path = path.as_ref();
        let writer = GgrWriter::create(path)?;
        self.writer = Some(writer);
        self.path = Some(path.to_path_buf());
        self.state = State::Recording;
        Ok(())
    }

    /// Non-fatal: a `pause()` call while not recording is logged as a
    /// warning rather than treated as an error.
    pub fn pause(&mut self) {
        match self.state {
            State::Recording => self.state = State::Paused,
            _ => warn!("pause() called while not recording"),
        }
    }

    /// Resume recording from a paused state. Non-fatal if not paused.
    pub fn play(&mut self) {
        match self.state {
            State::Paused => self.state = State::Recording,
            _ => warn!("play() called while not paused"),
        }
    }

    /// Write the closing `TERMINATE` record and close the file handle.
    /// Fails [`RecordError::RecorderState`] if not currently recording/paused.
    pub fn stop(&mut self) -> RecordResult<()> {
        match self.state {
            State::Recording | State::Paused => {
                if let Some(writer) = self.writer.as_mut() {
                    let timestamp = self.clock.next();
                    writer.write_event(&RecordEvent {
                        timestamp,
                        opcode: Opcode::Terminate,
                        data: EventPayload::Empty,
                    })?;
                    writer.flush()?;
                }
                self.writer = None;
                self.path = None;
                self.state = State::Idle;
                Ok(())
            }
            State::Idle => Err(RecordError::RecorderState(
                "stop() called while not recording".into(),
            )),
        }
    }

    /// `record()`: true iff actively recording (not paused, not
    /// idle).
    pub fn is_recording(&self) -> bool {
        self.state == State::Recording
    }

    pub fn is_paused(&self) -> bool {
        self.state == State::Paused
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The single emission choke point. A no-op (`Ok(())`) when not actively
    /// recording — emitting while not recording is silently a
    /// no-op for the public API.
    pub fn emit(&mut self, opcode: Opcode, data: EventPayload) -> RecordResult<()> {
        if !self.is_recording() {
            return Ok(());
        }
        let timestamp = self.clock.next();
        self.writer
            .as_mut()
            .expect("writer present while Recording")
            .write_event(&RecordEvent {
                timestamp,
                opcode,
                data,
            })
    }
}
