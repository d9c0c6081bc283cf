//! `RecordEvent` and the per-opcode payload shapes.

use gsim_core::{NodeId, Timestamp, Value};
use gsim_sensor::SensorKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::component::{ComponentKey, FieldType};
use crate::opcode::Opcode;

/// One recorded mutation. Log is append-only; `timestamp` is
/// `monotonic_ns()` while recording and the recorded value played back
/// while replaying.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordEvent {
    pub timestamp: Timestamp,
    pub opcode: Opcode,
    pub data: EventPayload,
}

/// Full construction args for a replayed agent: the `AGENT_CREATE` payload,
/// including `start_node_id` and the requested sensor bindings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentCreateArgs {
    pub name: String,
    pub start_node_id: NodeId,
    /// `(local_name, sensor_id)` pairs, in the order they were requested.
    pub sensors: Vec<(String, String)>,
    pub meta: IndexMap<String, Value>,
}

/// Full construction args for a replayed sensor: the `SENSOR_CREATE`
/// payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorCreateArgs {
    pub id: String,
    pub kind: SensorKind,
    pub range: f64,
    pub fov: f64,
    pub orientation: Option<(f64, f64)>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventPayload {
    /// `TERMINATE` / `SIMULATE`: no payload.
    Empty,
    AgentCreate(AgentCreateArgs),
    AgentDelete {
        name: String,
    },
    AgentCurrentNode {
        agent_name: String,
        node_id: NodeId,
    },
    AgentPrevNode {
        agent_name: String,
        node_id: NodeId,
    },
    AgentSensorRegister {
        agent_name: String,
        name: String,
        sensor_id: String,
    },
    AgentSensorDeregister {
        agent_name: String,
        name: String,
        sensor_id: String,
    },
    SensorCreate(SensorCreateArgs),
    ComponentRegister {
        key: ComponentKey,
        schema: IndexMap<String, FieldType>,
    },
    ComponentCreate {
        key: ComponentKey,
        name: String,
    },
    ComponentUpdate {
        name: String,
        field: String,
        value: Value,
    },
}
