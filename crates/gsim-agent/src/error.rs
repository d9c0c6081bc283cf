//! Agent-runtime error type.

use gsim_core::CoreError;
use gsim_graph::GraphError;
use gsim_sensor::SensorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Sensor(#[from] SensorError),

    /// `step()` called with no strategy registered.
    #[error("agent {0} has no strategy registered")]
    NoStrategy(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
