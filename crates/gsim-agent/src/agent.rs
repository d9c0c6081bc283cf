//! A single agent's data. Behavior lives in
//! [`crate::engine::AgentEngine`] since most operations need simultaneous
//! access to the sensor engine and the graph store.

use gsim_core::{NodeId, Value};
use indexmap::IndexMap;

use crate::state::State;

/// A strategy: a user-supplied function over the state map that must leave
/// it with a valid `action`.
pub type Strategy = Box<dyn FnMut(&mut State)>;

pub struct Agent {
    pub name: String,
    pub current_node_id: NodeId,
    pub prev_node_id: NodeId,
    /// Arbitrary caller-supplied metadata attached at creation time.
    pub meta: IndexMap<String, Value>,
    /// `local sensor name -> sensor_id` for every sensor currently bound to
    /// this agent, in registration order.
    pub sensors: IndexMap<String, String>,
    pub strategy: Option<Strategy>,
    /// The state map returned by the most recent `get_state` call.
    pub state: Option<State>,
}

impl Agent {
    pub fn new(name: String, start_node_id: NodeId) -> Self {
        Self {
            name,
            current_node_id: start_node_id,
            prev_node_id: start_node_id,
            meta: IndexMap::new(),
            sensors: IndexMap::new(),
            strategy: None,
            state: None,
        }
    }
}
