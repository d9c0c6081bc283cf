//! `Context`-level error type — a thin union over every engine's own error
//! plus the visual back-end's `External` kind.

use gsim_agent::AgentError;
use gsim_graph::GraphError;
use gsim_record::RecordError;
use gsim_sensor::SensorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error(transparent)]
    Record(#[from] RecordError),

    /// A visual back-end's draw callback failed. Context
    /// catches and logs this at the call site — it never propagates out of
    /// [`crate::context::Context::tick`] — but a caller that drives
    /// `simulate()` directly may still want to observe it.
    #[error("visual back-end error: {0}")]
    External(String),
}

pub type SimResult<T> = Result<T, SimError>;
