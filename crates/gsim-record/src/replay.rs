//! Replay dispatch.
//!
//! ```text
//!      replay(path)
//!      [IDLE] ─────────────────▶ [REPLAYING] ─── end-of-stream ──▶ [IDLE]
//! ```
//!
//! [`ReplayTarget`] is the seam between this crate (which only knows how to
//! decode the opcode stream) and `gsim-sim::Context` (which owns the agent
//! engine, sensor engine, and visual contract the opcodes actually mutate).
//! The recorder never holds a strong reference back to the context it's
//! replaying into.

use std::path::Path;

use gsim_core::{NodeId, Timestamp, Value};
use indexmap::IndexMap;
use gsim_sensor::SensorKind;

use crate::component::{ComponentKey, FieldType};
use crate::error::RecordResult;
use crate::event::EventPayload;
use crate::file::GgrReader;
use crate::opcode::Opcode;

/// Everything a replayed opcode stream can mutate. Implemented by
/// `gsim-sim::Context`.
pub trait ReplayTarget {
    fn agent_create(
        &mut self,
        name: String,
        start_node_id: NodeId,
        sensors: Vec<(String, String)>,
        meta: IndexMap<String, Value>,
    );
    fn agent_delete(&mut self, name: String);
    /// Direct field assignment — bypasses the normal commit path to avoid
    /// recursive emission during replay.
    fn agent_set_current_node(&mut self, agent_name: String, node_id: NodeId);
    fn agent_set_prev_node(&mut self, agent_name: String, node_id: NodeId);
    fn agent_sensor_register(&mut self, agent_name: String, name: String, sensor_id: String);
    fn agent_sensor_deregister(&mut self, agent_name: String, name: String, sensor_id: String);
    fn sensor_create(&mut self, id: String, kind: SensorKind, range: f64, fov: f64, orientation: Option<(f64, f64)>);
    fn component_register(&mut self, key: ComponentKey, schema: IndexMap<String, FieldType>);
    fn component_create(&mut self, key: ComponentKey, name: String);
    fn component_update(&mut self, name: String, field: String, value: Value);
    /// Drive one visualization tick (`SIMULATE`).
    fn simulate_tick(&mut self);
    /// Called once per dispatched record so `time()` can return the
    /// recorded timestamp during replay.
    fn observe_timestamp(&mut self, _timestamp: Timestamp) {}
}

pub struct Replayer {
    reader: GgrReader,
}

impl Replayer {
    pub fn open(path: impl AsRef<Path>) -> RecordResult<Self> {
        Ok(Self {
            reader: GgrReader::open(path.as_ref())?,
        })
    }

    /// Dispatch every record in file order into `target`, stopping at
    /// `TERMINATE` or end of stream. Replaying into a fresh context with the
    /// same graph reconstructs agent/sensor state bit-identically at each
    /// `SIMULATE` boundary.
    pub fn run(&mut self, target: &mut dyn ReplayTarget) -> RecordResult<()> {
        while let Some(event) = self.reader.read_event()? {
            target.observe_timestamp(event.timestamp);
            match event.opcode {
                Opcode::Terminate => break,
                Opcode::Simulate => target.simulate_tick(),
                Opcode::AgentCreate => {
                    if let EventPayload::AgentCreate(args) = event.data {
                        target.agent_create(args.name, args.start_node_id, args.sensors, args.meta);
                    }
                }
                Opcode::AgentDelete => {
                    if let EventPayload::AgentDelete { name } = event.data {
                        target.agent_delete(name);
                    }
                }
                Opcode::AgentCurrentNode => {
                    if let EventPayload::AgentCurrentNode { agent_name, node_id } = event.data {
                        target.agent_set_current_node(agent_name, node_id);
                    }
                }
                Opcode::AgentPrevNode => {
                    if let EventPayload::AgentPrevNode { agent_name, node_id } = event.data {
                        target.agent_set_prev_node(agent_name, node_id);
                    }
                }
                Opcode::AgentSensorRegister => {
                    if let EventPayload::AgentSensorRegister { agent_name, name, sensor_id } = event.data {
                        target.agent_sensor_register(agent_name, name, sensor_id);
                    }
                }
                Opcode::AgentSensorDeregister => {
                    if let EventPayload::AgentSensorDeregister { agent_name, name, sensor_id } = event.data {
                        target.agent_sensor_deregister(agent_name, name, sensor_id);
                    }
                }
                Opcode::SensorCreate => {
                    if let EventPayload::SensorCreate(args) = event.data {
                        target.sensor_create(args.id, args.kind, args.range, args.fov, args.orientation);
                    }
                }
                Opcode::ComponentRegister => {
                    if let EventPayload::ComponentRegister { key, schema } = event.data {
                        target.component_register(key, schema);
                    }
                }
                Opcode::ComponentCreate => {
                    if let EventPayload::ComponentCreate { key, name } = event.data {
                        target.component_create(key, name);
                    }
                }
                Opcode::ComponentUpdate => {
                    if let EventPayload::ComponentUpdate { name, field, value } = event.data {
                        target.component_update(name, field, value);
                    }
                }
            }
        }
        Ok(())
    }
}
