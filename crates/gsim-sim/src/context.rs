//! `Context`: the single object owning every subsystem — graph
//! store, sensor engine, agent engine, recorder, component registry, and the
//! visual contract — and the sole place that centralizes "mutate + emit"
//! by wrapping every engine mutator that must be replayable.

use std::path::Path;

use gsim_agent::AgentEngine;
use gsim_core::{MonotonicClock, NodeId, Timestamp, Value, Vec2};
use gsim_graph::GraphStore;
use gsim_record::{
    AgentCreateArgs, Component, ComponentKey, ComponentRegistry, EventPayload, FieldType, Opcode,
    Recorder, Replayer, ReplayTarget, SensorCreateArgs,
};
use gsim_sensor::{SensorEngine, SensorKind};
use indexmap::IndexMap;
use tracing::warn;

use crate::config::{init_logging, ContextConfig};
use crate::error::SimResult;
use crate::visual::{NoopVisual, VisualContract};

/// Owns the full runtime's six subsystems, minus the process-wide logger
/// which is global. Every subsystem is reached directly through this
/// struct rather than holding a back-reference to it, avoiding a
/// bidirectional Context<->Engine cycle.
pub struct Context {
    pub graph: GraphStore,
    pub sensors: SensorEngine,
    pub agents: AgentEngine,
    pub components: ComponentRegistry,
    recorder: Recorder,
    visual: Box<dyn VisualContract>,
    terminated: bool,
    clock: MonotonicClock,
    /// Set by `observe_timestamp` while replaying; `time()` reports this in
    /// place of the live clock so replayed user code sees the original
    /// trace's time.
    replay_timestamp: Option<Timestamp>,
}

impl Context {
    pub fn new(config: ContextConfig) -> Self {
        init_logging(&config.logger_config);
        Self {
            graph: GraphStore::new(),
            sensors: SensorEngine::new(),
            agents: AgentEngine::new(),
            components: ComponentRegistry::new(),
            recorder: Recorder::new(),
            visual: Box::new(NoopVisual),
            terminated: false,
            clock: MonotonicClock::new(),
            replay_timestamp: None,
        }
    }

    pub fn with_visual(mut self, visual: Box<dyn VisualContract>) -> Self {
        self.visual = visual;
        self
    }

    /// `time()`: the recorded timestamp while replaying,
    /// otherwise the live monotonic clock.
    pub fn time(&mut self) -> Timestamp {
        self.replay_timestamp.unwrap_or_else(|| self.clock.next())
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Cancellation: no preemption, an in-flight tick always
    /// completes; the host is expected to poll `is_terminated()` between
    /// ticks and stop calling `tick()`.
    pub fn terminate(&mut self) {
        self.terminated = true;
        self.visual.terminate();
    }

    // ── Recording ──────────────────────────────────────────────────────────

    /// `record()`: true iff actively recording and the
    /// context hasn't been terminated.
    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording() && !self.terminated
    }

    pub fn start_recording(&mut self, path: impl AsRef<Path>) -> SimResult<()> {
        Ok(self.recorder.start(path)?)
    }

    /// The emission choke point every mutator routes through. Gated on
    /// [`Context::is_recording`] (not `Recorder::is_recording`) so that once
    /// the context is terminated, emission stops even though the recorder
    /// itself is never told to stop — spec §4.4/§5: a terminated context
    /// makes `record()` false regardless of the recorder's own state.
    fn emit(&mut self, opcode: Opcode, data: EventPayload) -> SimResult<()> {
        if !self.is_recording() {
            return Ok(());
        }
        Ok(self.recorder.emit(opcode, data)?)
    }

    pub fn pause_recording(&mut self) {
        self.recorder.pause();
    }

    pub fn resume_recording(&mut self) {
        self.recorder.play();
    }

    pub fn stop_recording(&mut self) -> SimResult<()> {
        Ok(self.recorder.stop()?)
    }

    pub fn replay(&mut self, path: impl AsRef<Path>) -> SimResult<()> {
        let mut replayer = Replayer::open(path)?;
        let result = replayer.run(self);
        // `time()` must only report the recorded timestamp while a replay is
        // actually in progress; clear it here so a live clock reading
        // doesn't keep echoing the last replayed stamp forever after.
        self.replay_timestamp = None;
        result?;
        Ok(())
    }

    // ── Graph ──────────────────────────────────────────────────────────────

    pub fn save_graph(&self, path: impl AsRef<Path>) -> SimResult<()> {
        Ok(self.graph.save(path)?)
    }

    pub fn load_graph(path: impl AsRef<Path>) -> SimResult<GraphStore> {
        Ok(GraphStore::load(path)?)
    }

    // ── Sensors ────────────────────────────────────────────────────────────

    pub fn register_custom_tag(&mut self, tag: impl Into<String>) -> SimResult<()> {
        Ok(self.sensors.register_custom_tag(tag)?)
    }

    pub fn create_sensor(
        &mut self,
        id: impl Into<String>,
        kind: SensorKind,
        range: f64,
        fov: f64,
        orientation: Option<Vec2>,
    ) -> SimResult<()> {
        let id = id.into();
        self.sensors.create_sensor(id.clone(), kind.clone(), range, fov, orientation)?;
        self.emit(
            Opcode::SensorCreate,
            EventPayload::SensorCreate(SensorCreateArgs {
                id,
                kind,
                range,
                fov,
                orientation: orientation.map(|v| (v.x, v.y)),
            }),
        )?;
        Ok(())
    }

    // ── Agents ─────────────────────────────────────────────────────────────

    pub fn create_agent(
        &mut self,
        name: impl Into<String>,
        start_node_id: NodeId,
        sensors: impl IntoIterator<Item = (String, String)>,
        meta: IndexMap<String, Value>,
    ) -> SimResult<()> {
        let name = name.into();
        let sensors: Vec<(String, String)> = sensors.into_iter().collect();
        self.agents
            .create_agent(name.clone(), start_node_id, sensors.clone(), meta.clone(), &mut self.sensors)?;
        self.emit(
            Opcode::AgentCreate,
            EventPayload::AgentCreate(AgentCreateArgs {
                name,
                start_node_id,
                sensors,
                meta,
            }),
        )?;
        Ok(())
    }

    pub fn delete_agent(&mut self, name: &str) -> SimResult<()> {
        self.agents.delete_agent(name, &mut self.sensors);
        self.emit(Opcode::AgentDelete, EventPayload::AgentDelete { name: name.to_string() })?;
        Ok(())
    }

    pub fn register_sensor_on_agent(
        &mut self,
        agent_name: &str,
        local_name: impl Into<String>,
        sensor_id: &str,
    ) -> SimResult<()> {
        let local_name = local_name.into();
        self.agents.register_sensor(agent_name, local_name.clone(), sensor_id, &mut self.sensors)?;
        self.emit(
            Opcode::AgentSensorRegister,
            EventPayload::AgentSensorRegister {
                agent_name: agent_name.to_string(),
                name: local_name,
                sensor_id: sensor_id.to_string(),
            },
        )?;
        Ok(())
    }

    pub fn deregister_sensor_on_agent(&mut self, agent_name: &str, local_name: &str) -> SimResult<()> {
        let sensor_id = self
            .agents
            .get_agent(agent_name)?
            .sensors
            .get(local_name)
            .cloned()
            .unwrap_or_default();
        self.agents.deregister_sensor(agent_name, local_name, &mut self.sensors)?;
        self.emit(
            Opcode::AgentSensorDeregister,
            EventPayload::AgentSensorDeregister {
                agent_name: agent_name.to_string(),
                name: local_name.to_string(),
                sensor_id,
            },
        )?;
        Ok(())
    }

    /// `get_state`+strategy+`set_state` for one agent, emitting
    /// `AGENT_PREV_NODE` then `AGENT_CURRENT_NODE` in that mutation order.
    fn commit_agent(&mut self, name: &str) -> SimResult<()> {
        self.agents.set_state(name)?;
        let agent = self.agents.get_agent(name)?;
        let prev = agent.prev_node_id;
        let curr = agent.current_node_id;
        self.emit(
            Opcode::AgentPrevNode,
            EventPayload::AgentPrevNode { agent_name: name.to_string(), node_id: prev },
        )?;
        self.emit(
            Opcode::AgentCurrentNode,
            EventPayload::AgentCurrentNode { agent_name: name.to_string(), node_id: curr },
        )?;
        Ok(())
    }

    /// Single-agent convenience chaining `decide` and `commit_agent`.
    pub fn step_agent(&mut self, name: &str) -> SimResult<()> {
        self.agents.decide(name, &mut self.sensors, &self.graph)?;
        self.commit_agent(name)
    }

    /// One full tick: gather-phase for every
    /// agent in `create_iter()` order, then commit-phase for every agent,
    /// then one visualization step.
    pub fn tick(&mut self) -> SimResult<()> {
        let names: Vec<String> = self.agents.create_iter().map(|a| a.name.clone()).collect();
        for name in &names {
            self.agents.decide(name, &mut self.sensors, &self.graph)?;
        }
        for name in &names {
            self.commit_agent(name)?;
        }
        if let Err(err) = self.visual.simulate() {
            tracing::error!(%err, "visual back-end simulate() failed");
        }
        self.emit(Opcode::Simulate, EventPayload::Empty)?;
        Ok(())
    }

    /// Delegates to the visual contract, short-circuiting to a no-op action
    /// once the context is terminated.
    pub fn human_input(&mut self, agent_name: &str) -> SimResult<NodeId> {
        let curr = self.agents.get_agent(agent_name)?.current_node_id;
        if self.terminated {
            return Ok(curr);
        }
        Ok(self.visual.human_input(agent_name, curr))
    }

    // ── Components ─────────────────────────────────────────────────────────

    pub fn register_component<T: Component + Default + 'static>(
        &mut self,
        module: impl Into<String>,
        qualname: impl Into<String>,
    ) -> SimResult<ComponentKey> {
        let key: ComponentKey = (module.into(), qualname.into());
        self.components.register::<T>(key.clone())?;
        let schema = self.components.schema_of(&key).cloned().unwrap_or_default();
        self.emit(
            Opcode::ComponentRegister,
            EventPayload::ComponentRegister { key: key.clone(), schema },
        )?;
        Ok(key)
    }

    pub fn create_component(&mut self, key: ComponentKey, name: impl Into<String>) -> SimResult<()> {
        let name = name.into();
        self.components.create(key.clone(), name.clone())?;
        self.emit(Opcode::ComponentCreate, EventPayload::ComponentCreate { key, name })?;
        Ok(())
    }

    pub fn set_component_field(&mut self, name: &str, field: impl Into<String>, value: Value) -> SimResult<()> {
        let field = field.into();
        self.components.set_field(name, &field, value.clone())?;
        self.emit(
            Opcode::ComponentUpdate,
            EventPayload::ComponentUpdate { name: name.to_string(), field, value },
        )?;
        Ok(())
    }
}

// ── Replay dispatch ──────────────────────────────────────────────────────────

/// Opcodes replayed into the concrete engines directly, assigning fields
/// directly to prevent recursive emission — none of these
/// paths call back into `Recorder::emit`. Construction failures are logged
/// and skipped rather than aborting the whole replay; only an unknown opcode
/// (handled inside `gsim-record`, before dispatch ever reaches here) is a
/// hard failure.
impl ReplayTarget for Context {
    fn agent_create(
        &mut self,
        name: String,
        start_node_id: NodeId,
        sensors: Vec<(String, String)>,
        meta: IndexMap<String, Value>,
    ) {
        if let Err(err) = self.agents.create_agent(name.clone(), start_node_id, sensors, meta, &mut self.sensors) {
            warn!(agent = %name, %err, "replay: agent_create failed");
        }
    }

    fn agent_delete(&mut self, name: String) {
        self.agents.delete_agent(&name, &mut self.sensors);
    }

    fn agent_set_current_node(&mut self, agent_name: String, node_id: NodeId) {
        match self.agents.get_agent_mut(&agent_name) {
            Ok(agent) => agent.current_node_id = node_id,
            Err(err) => warn!(agent = %agent_name, %err, "replay: agent_set_current_node failed"),
        }
    }

    fn agent_set_prev_node(&mut self, agent_name: String, node_id: NodeId) {
        match self.agents.get_agent_mut(&agent_name) {
            Ok(agent) => agent.prev_node_id = node_id,
            Err(err) => warn!(agent = %agent_name, %err, "replay: agent_set_prev_node failed"),
        }
    }

    fn agent_sensor_register(&mut self, agent_name: String, name: String, sensor_id: String) {
        if let Err(err) = self.agents.register_sensor(&agent_name, name, &sensor_id, &mut self.sensors) {
            warn!(agent = %agent_name, %err, "replay: agent_sensor_register failed");
        }
    }

    fn agent_sensor_deregister(&mut self, agent_name: String, name: String, _sensor_id: String) {
        if let Err(err) = self.agents.deregister_sensor(&agent_name, &name, &mut self.sensors) {
            warn!(agent = %agent_name, %err, "replay: agent_sensor_deregister failed");
        }
    }

    fn sensor_create(&mut self, id: String, kind: SensorKind, range: f64, fov: f64, orientation: Option<(f64, f64)>) {
        let orientation = orientation.map(|(x, y)| Vec2::new(x, y));
        if let Err(err) = self.sensors.create_sensor(id.clone(), kind, range, fov, orientation) {
            warn!(sensor = %id, %err, "replay: sensor_create failed");
        }
    }

    fn component_register(&mut self, key: ComponentKey, schema: IndexMap<String, FieldType>) {
        self.components.register_schema_only(key, schema);
    }

    fn component_create(&mut self, key: ComponentKey, name: String) {
        if let Err(err) = self.components.create(key.clone(), name.clone()) {
            warn!(component = %name, key = ?key, %err, "replay: component_create failed");
        }
    }

    fn component_update(&mut self, name: String, field: String, value: Value) {
        if let Err(err) = self.components.set_field(&name, &field, value) {
            warn!(component = %name, %field, %err, "replay: component_update failed");
        }
    }

    fn simulate_tick(&mut self) {
        if let Err(err) = self.visual.simulate() {
            tracing::error!(%err, "visual back-end simulate() failed during replay");
        }
    }

    fn observe_timestamp(&mut self, timestamp: Timestamp) {
        self.replay_timestamp = Some(timestamp);
    }
}
