//! `gsim-sim` — the `Context` that wires the graph store, sensor engine,
//! agent engine, recorder, and component registry into a single runtime, the
//! two-phase turn loop, the Visual Contract, and
//! `GAMMS_LOG_LEVEL`-driven logging.
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|----------------------------------------------------------|
//! | [`context`] | `Context` — subsystem wiring, the tick loop, replay dispatch |
//! | [`visual`]  | `VisualContract`, `NoopVisual`                          |
//! | [`config`]  | `ContextConfig`, `LoggerConfig`, `GAMMS_LOG_LEVEL` init  |
//! | [`error`]   | `SimError`, `SimResult<T>`                              |

pub mod config;
pub mod context;
pub mod error;
pub mod visual;

#[cfg(test)]
mod tests;

pub use config::{ContextConfig, LogLevel, LoggerConfig};
pub use context::Context;
pub use error::{SimError, SimResult};
pub use visual::{NoopVisual, VisualContract};
