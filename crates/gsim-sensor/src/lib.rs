//! `gsim-sensor` — sensor variants, orientation/angular-filter math, and the
//! custom-sensor registration hook.
//!
//! # Crate layout
//!
//! | Module     | Contents                                          |
//! |------------|-----------------------------------------------------|
//! | [`kind`]   | `SensorKind`, `SensorData`                           |
//! | [`sensor`] | `Sensor`, `SenseContext`, orientation composition    |
//! | [`engine`] | `SensorEngine` — factory, registry, custom tag hook  |
//! | [`error`]  | `SensorError`, `SensorResult<T>`                     |

pub mod engine;
pub mod error;
pub mod kind;
pub mod sensor;


pub use engine::SensorEngine;
pub use error::{SensorError, SensorResult};
pub use kind::{SensorData, SensorKind};
pub use sensor::{SenseContext, Sensor};
