//! The agent runtime contract and engine.

use gsim_core::{CoreError, NodeId, Vec2};
use gsim_graph::GraphStore;
use gsim_sensor::sensor::SenseContext;
use gsim_sensor::SensorEngine;
use indexmap::IndexMap;
use tracing::warn;

use crate::agent::{Agent, Strategy};
use crate::error::{AgentError, AgentResult};
use crate::state::State;

/// Owns every agent, in insertion order — the host loop relies on this order
/// for deterministic turns.
#[derive(Default)]
pub struct AgentEngine {
    agents: IndexMap<String, Agent>,
}

impl AgentEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Engine-level operations ───────────────────────────────────────────

    /// Create an agent bound to the given sensors.
    ///
    /// `sensors` is `(local_name, sensor_id)` pairs. A `sensor_id` that
    /// doesn't resolve in `sensor_engine` is logged as a warning and skipped
    /// — never fatal.
    pub fn create_agent(
        &mut self,
        name: impl Into<String>,
        start_node_id: NodeId,
        sensors: impl IntoIterator<Item = (String, String)>,
        meta: IndexMap<String, gsim_core::Value>,
        sensor_engine: &mut SensorEngine,
    ) -> AgentResult<()> {
        let name = name.into();
        if self.agents.contains_key(&name) {
            return Err(AgentError::Core(CoreError::AlreadyExists(format!(
                "agent {name}"
            ))));
        }
        let mut agent = Agent::new(name.clone(), start_node_id);
        agent.meta = meta;
        self.agents.insert(name.clone(), agent);

        for (local_name, sensor_id) in sensors {
            if let Err(err) = self.register_sensor(&name, local_name.clone(), &sensor_id, sensor_engine) {
                warn!(agent = %name, sensor = %sensor_id, %err, "sensor binding downgraded to a skip");
            }
        }
        Ok(())
    }

    pub fn get_agent(&self, name: &str) -> AgentResult<&Agent> {
        self.agents
            .get(name)
            .ok_or_else(|| AgentError::Core(CoreError::NotFound(format!("agent {name}"))))
    }

    pub fn get_agent_mut(&mut self, name: &str) -> AgentResult<&mut Agent> {
        self.agents
            .get_mut(name)
            .ok_or_else(|| AgentError::Core(CoreError::NotFound(format!("agent {name}"))))
    }

    /// Non-fatal warning (not an error) if `name` doesn't exist, matching the
    /// matching a best-effort deletion path: a missing name is logged, not treated as an error.
    pub fn delete_agent(&mut self, name: &str, sensor_engine: &mut SensorEngine) {
        match self.agents.shift_remove(name) {
            Some(agent) => {
                for sensor_id in agent.sensors.values() {
                    if let Ok(sensor) = sensor_engine.get_sensor_mut(sensor_id) {
                        sensor.owner = None;
                    }
                }
            }
            None => warn!(agent = %name, "deleting non-existent agent"),
        }
    }

    /// Agents in insertion order — the host loop's turn order.
    pub fn create_iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    // ── Agent contract ────────────────────────────────────────────────────

    /// Bind `sensor_id` under `local_name` and set its owner to this agent
    /// Fails [`CoreError::NotFound`] if the sensor doesn't exist
    /// — callers that must downgrade this to a warning (agent creation) catch
    /// it themselves.
    pub fn register_sensor(
        &mut self,
        agent_name: &str,
        local_name: String,
        sensor_id: &str,
        sensor_engine: &mut SensorEngine,
    ) -> AgentResult<()> {
        sensor_engine.get_sensor_mut(sensor_id)?.owner = Some(agent_name.to_string());
        let agent = self.get_agent_mut(agent_name)?;
        agent.sensors.insert(local_name, sensor_id.to_string());
        Ok(())
    }

    /// Inverse of `register_sensor`: unbinds and clears ownership.
    pub fn deregister_sensor(
        &mut self,
        agent_name: &str,
        local_name: &str,
        sensor_engine: &mut SensorEngine,
    ) -> AgentResult<()> {
        let agent = self.get_agent_mut(agent_name)?;
        let sensor_id = agent
            .sensors
            .shift_remove(local_name)
            .ok_or_else(|| AgentError::Core(CoreError::NotFound(format!("sensor {local_name}"))))?;
        if let Ok(sensor) = sensor_engine.get_sensor_mut(&sensor_id) {
            sensor.owner = None;
        }
        Ok(())
    }

    pub fn register_strategy(&mut self, agent_name: &str, strategy: Strategy) -> AgentResult<()> {
        self.get_agent_mut(agent_name)?.strategy = Some(strategy);
        Ok(())
    }

    /// The unit vector from `prev_node_id`'s position to `current_node_id`'s,
    /// or `(0,0)` if they coincide.
    pub fn orientation(&self, agent_name: &str, graph: &GraphStore) -> AgentResult<Vec2> {
        let agent = self.get_agent(agent_name)?;
        let prev = graph.get_node(agent.prev_node_id)?.position();
        let curr = graph.get_node(agent.current_node_id)?.position();
        Ok(Vec2::from_points(prev, curr).normalize())
    }

    /// Snapshot of every agent's current node, in `create_iter()` order —
    /// what `Agent`/`AgentRange`/`AgentArc` sensors read.
    fn agent_positions(&self) -> IndexMap<String, NodeId> {
        self.agents
            .iter()
            .map(|(name, agent)| (name.clone(), agent.current_node_id))
            .collect()
    }

    /// `get_state()`: invokes `sense(current_node_id)` on every
    /// bound sensor in insertion order, then returns the fresh state map.
    pub fn get_state(
        &mut self,
        agent_name: &str,
        sensor_engine: &mut SensorEngine,
        graph: &GraphStore,
    ) -> AgentResult<()> {
        let owner_orientation = self.orientation(agent_name, graph)?;
        let agent_positions = self.agent_positions();

        let agent = self.get_agent(agent_name)?;
        let node = agent.current_node_id;
        let sensor_ids: Vec<(String, String)> = agent
            .sensors
            .iter()
            .map(|(local, id)| (local.clone(), id.clone()))
            .collect();

        let mut state = State::new(node);
        let ctx = SenseContext {
            node,
            graph,
            agents: &agent_positions,
        };
        for (local_name, sensor_id) in sensor_ids {
            let sensor = sensor_engine.get_sensor_mut(&sensor_id)?;
            let data = sensor.sense(&ctx, owner_orientation).clone();
            state.sensor.insert(local_name, (sensor.kind.clone(), data));
        }

        self.get_agent_mut(agent_name)?.state = Some(state);
        Ok(())
    }

    /// `set_state()`: reads the `action` field of the previously
    /// returned state, asserts it is a valid node id, and commits
    /// `prev_node_id <- current_node_id; current_node_id <- action`.
    pub fn set_state(&mut self, agent_name: &str) -> AgentResult<()> {
        let agent = self.get_agent_mut(agent_name)?;
        let action = agent
            .state
            .as_ref()
            .and_then(|s| s.action)
            .ok_or_else(|| AgentError::Core(CoreError::Invalid(format!("agent {agent_name} state has no action"))))?;
        agent.prev_node_id = agent.current_node_id;
        agent.current_node_id = action;
        Ok(())
    }

    /// `get_state -> strategy`, stopping short of the commit (`set_state`).
    ///
    /// Exists so a two-phase host loop (gather
    /// — `get_state`+strategy for every agent — then commit — `set_state`
    /// for every agent) can run every agent's decision against pre-move
    /// positions before any agent commits. `step()` is the single-agent
    /// convenience that chains this with an immediate `set_state`.
    pub fn decide(
        &mut self,
        agent_name: &str,
        sensor_engine: &mut SensorEngine,
        graph: &GraphStore,
    ) -> AgentResult<()> {
        self.get_state(agent_name, sensor_engine, graph)?;

        let agent = self.get_agent_mut(agent_name)?;
        let mut strategy = agent
            .strategy
            .take()
            .ok_or_else(|| AgentError::NoStrategy(agent_name.to_string()))?;
        let mut state = agent.state.take().expect("get_state just populated it");
        strategy(&mut state);
        let agent = self.get_agent_mut(agent_name)?;
        agent.state = Some(state);
        agent.strategy = Some(strategy);
        Ok(())
    }

    /// `step()`: chains `get_state -> strategy -> set_state` for one agent.
    pub fn step(
        &mut self,
        agent_name: &str,
        sensor_engine: &mut SensorEngine,
        graph: &GraphStore,
    ) -> AgentResult<()> {
        self.decide(agent_name, sensor_engine, graph)?;
        self.set_state(agent_name)
    }
}
