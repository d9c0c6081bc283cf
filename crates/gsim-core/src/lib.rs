//! `gsim-core` — foundational types shared by every `gsim-*` crate.
//!
//! This crate is a dependency of every other `gsim-*` crate. It intentionally
//! has no `gsim-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                        |
//! |-----------|--------------------------------------------------|
//! | [`ids`]   | `NodeId`, `EdgeId`                                |
//! | [`geo`]   | `Point`, `Vec2`, orientation composition, bearing |
//! | [`time`]  | `Timestamp`, `MonotonicClock`                     |
//! | [`value`] | `Value` — the open tagged value type               |
//! | [`error`] | `CoreError`, `CoreResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|--------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.     |

pub mod error;
pub mod geo;
pub mod ids;
pub mod time;
pub mod value;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{normalize_angle, Point, Vec2};
pub use ids::{EdgeId, NodeId};
pub use time::{MonotonicClock, Timestamp};
pub use value::Value;
