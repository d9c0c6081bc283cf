//! Shared base error kind.
//!
//! Sub-crates define their own `thiserror` enums and wrap this one with
//! `#[from]` where a lower layer's failure should propagate unchanged,
//! mirroring the common pattern of a per-crate error wrapping a shared base kind
//! pattern. `RecorderState` and `External` (the other two §7 kinds) are
//! domain-specific and live in `gsim-record`/`gsim-sim` instead.

use thiserror::Error;

/// The shared base error kind, common to every `gsim-*` crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Missing agent, sensor, node, edge, or component.
    #[error("not found: {0}")]
    NotFound(String),

    /// Duplicate id on create. Never silently swallowed.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Malformed input: empty linestring, unknown sensor type, bad opcode, etc.
    #[error("invalid: {0}")]
    Invalid(String),
}

/// Shorthand result type for `gsim-core` itself.
pub type CoreResult<T> = Result<T, CoreError>;
