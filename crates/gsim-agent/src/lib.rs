//! `gsim-agent` — the agent runtime for the simulation framework: per-agent
//! state, sensor binding, strategy invocation, and the engine that drives
//! the sense/decide/commit turn for each agent.
//!
//! # Crate layout
//!
//! | Module     | Contents                                              |
//! |------------|--------------------------------------------------------|
//! | [`agent`]  | `Agent` (per-agent data), `Strategy`                   |
//! | [`state`]  | `State`, the map exchanged with a strategy             |
//! | [`engine`] | `AgentEngine` — creation, sensor binding, turn loop     |
//! | [`error`]  | `AgentError`                                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.   |

pub mod agent;
pub mod engine;
pub mod error;
pub mod state;

#[cfg(test)]
mod tests;

pub use agent::{Agent, Strategy};
pub use engine::AgentEngine;
pub use error::{AgentError, AgentResult};
pub use state::State;
