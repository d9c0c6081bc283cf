//! Sensor-engine error type.

use gsim_core::CoreError;
use gsim_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SensorError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type SensorResult<T> = Result<T, SensorError>;
