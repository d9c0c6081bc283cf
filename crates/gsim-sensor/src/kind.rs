//! Sensor variant tags and their sensed payload shapes: a closed variant
//! with one case per built-in sensor type plus one open `Custom(tag)` case,
//! dispatched on the variant tag rather than through a base-class
//! hierarchy.

use gsim_core::NodeId;
use gsim_graph::{Edge, Node};
use indexmap::IndexMap;

/// The sensor's declared type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorKind {
    Neighbor,
    Map,
    Range,
    Arc,
    Agent,
    AgentRange,
    AgentArc,
    /// User-registered tag extending the sensor type space, registered via
    /// `custom(name)` rather than mutating the enum at runtime.
    Custom(String),
}

impl SensorKind {
    /// `Map`/`Range`/`Arc` all share the node+edge sensing shape; only the
    /// geometric predicate (range/fov) differs between them.
    pub fn is_map_family(&self) -> bool {
        matches!(self, SensorKind::Map | SensorKind::Range | SensorKind::Arc)
    }

    /// `Agent`/`AgentRange`/`AgentArc` share the agent-position sensing shape.
    pub fn is_agent_family(&self) -> bool {
        matches!(
            self,
            SensorKind::Agent | SensorKind::AgentRange | SensorKind::AgentArc
        )
    }

    /// Whether the angular filter applies to this variant (the `Arc` forms).
    pub fn is_arc_family(&self) -> bool {
        matches!(self, SensorKind::Arc | SensorKind::AgentArc)
    }
}

/// The `data` field produced by the most recent `sense()` call. The concrete
/// shape is a function of [`SensorKind`]; `get_state` pairs `(kind, data)` so
/// strategies can match on both together.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorData {
    /// `Neighbor`: the sensing node plus every neighbor.
    Neighbor(Vec<NodeId>),
    /// `Map`/`Range`/`Arc`: every node and edge whose endpoints are included.
    Map {
        nodes: IndexMap<NodeId, Node>,
        edges: Vec<Edge>,
    },
    /// `Agent`/`AgentRange`/`AgentArc`: every other (or owner's own) agent
    /// position passing the filter.
    Agent(IndexMap<String, NodeId>),
    /// `Custom`: user-defined payload, opaque to the engine.
    Custom(gsim_core::Value),
    /// The type-specific empty form, returned before any `sense()` call.
    Empty,
}

impl SensorData {
    pub fn empty_for(kind: &SensorKind) -> SensorData {
        match kind {
            SensorKind::Neighbor => SensorData::Neighbor(Vec::new()),
            k if k.is_map_family() => SensorData::Map {
                nodes: IndexMap::new(),
                edges: Vec::new(),
            },
            k if k.is_agent_family() => SensorData::Agent(IndexMap::new()),
            SensorKind::Custom(_) => SensorData::Empty,
            _ => SensorData::Empty,
        }
    }
}
