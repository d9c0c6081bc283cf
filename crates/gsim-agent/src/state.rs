//! The ephemeral state map exchanged between `get_state`, the strategy, and
//! `set_state`.
//!
//! The well-known fields (`curr_pos`, `sensor`, `action`) get dedicated
//! struct fields; anything else a strategy wants to stash rides in `extra`,
//! the open `Value` escape hatch.

use gsim_core::{NodeId, Value};
use gsim_sensor::{SensorData, SensorKind};
use indexmap::IndexMap;

/// The state map an agent's strategy receives and mutates.
///
/// Constructed fresh by [`crate::engine::AgentEngine::get_state`]; the
/// strategy is expected to write [`State::action`] before `set_state` runs.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    pub curr_pos: NodeId,
    /// `name -> (type, data)` for every sensor bound to the agent, in
    /// registration order.
    pub sensor: IndexMap<String, (SensorKind, SensorData)>,
    /// The strategy's decision: the node the agent commits to next.
    pub action: Option<NodeId>,
    /// Caller-extensible remainder of the state map.
    pub extra: IndexMap<String, Value>,
}

impl State {
    pub fn new(curr_pos: NodeId) -> Self {
        Self {
            curr_pos,
            sensor: IndexMap::new(),
            action: None,
            extra: IndexMap::new(),
        }
    }
}
