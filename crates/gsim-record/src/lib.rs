//! `gsim-record` — the opcode event log, the recorder/replayer state
//! machines, and the component-tracking system.
//!
//! # Crate layout
//!
//! | Module       | Contents                                             |
//! |--------------|--------------------------------------------------------|
//! | [`opcode`]   | `Opcode` — the authoritative, stable opcode table      |
//! | [`event`]    | `RecordEvent`, `EventPayload`                          |
//! | [`file`]     | `.ggr` binary encoding: magic/version header, records  |
//! | [`recorder`] | `Recorder` — start/pause/play/stop, the emission choke point |
//! | [`replay`]   | `Replayer`, `ReplayTarget`                             |
//! | [`component`]| `Component`, `ComponentRegistry`, `FieldType`           |
//! | [`error`]    | `RecordError`, `RecordResult<T>`                       |
//!
//! This crate has no dependency on `gsim-graph` or `gsim-agent` — only
//! `gsim-core` (ids/value/time) and `gsim-sensor` (for `SensorKind`, whose
//! payload the `SENSOR_CREATE` opcode carries verbatim). `gsim-sim::Context`
//! is the only crate that wires a `Recorder`/`Replayer` to the concrete
//! agent/sensor/graph engines, via the [`replay::ReplayTarget`] trait —
//! keeping that back-reference out of this crate entirely.

pub mod component;
pub mod error;
pub mod event;
pub mod file;
pub mod opcode;
pub mod recorder;
pub mod replay;


pub use component::{Component, ComponentKey, ComponentRegistry, FieldType};
pub use error::{RecordError, RecordResult};
pub use event::{AgentCreateArgs, EventPayload, RecordEvent, SensorCreateArgs};
pub use file::{GgrReader, GgrWriter};
pub use opcode::Opcode;
pub use recorder::Recorder;
pub use replay::{Replayer, ReplayTarget};
