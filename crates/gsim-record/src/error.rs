//! Recorder/replayer error type: `RecorderState` plus the
//! `Invalid`/`NotFound`/`Conflict` kinds shared with the rest of the stack.

use std::path::PathBuf;

use gsim_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    /// An existing recording file is never overwritten.
    #[error("recording file already exists: {}", .0.display())]
    FileExists(PathBuf),

    /// The magic must be `"MMGR"`; a mismatch is a hard failure regardless
    /// of version tolerance.
    #[error("bad magic number: {0:#010x}")]
    BadMagic(u32),

    /// An opcode the reader doesn't recognize always aborts replay.
    #[error("unknown opcode: {0:#010x}")]
    UnknownOpcode(u32),

    /// `start()` while already recording; `stop()` while not recording.
    #[error("recorder state error: {0}")]
    RecorderState(String),

    /// `replay(path)` of a missing file, or a record referencing an
    /// unregistered component type.
    #[error("not found: {0}")]
    NotFound(String),
}

pub type RecordResult<T> = Result<T, RecordError>;
