//! A single sensor instance: its parameters, its owner binding, and the
//! orientation/angular-filter math.

use gsim_core::{normalize_angle, NodeId, Point, Vec2};
use gsim_graph::GraphStore;
use indexmap::IndexMap;
use std::f64::consts::TAU;

use crate::kind::{SensorData, SensorKind};

/// A live sensor. Created and owned by a [`crate::engine::SensorEngine`];
/// bound to at most one agent at a time via `owner`.
pub struct Sensor {
    pub sensor_id: String,
    pub kind: SensorKind,
    pub owner: Option<String>,
    /// Configured orientation, a unit 2-vector. Default `(1,0)`.
    pub orientation: Vec2,
    /// Euclidean sensing range. `f64::INFINITY` for the unbounded variants.
    pub range: f64,
    /// Field of view in radians. `TAU` (2π) means omnidirectional.
    pub fov: f64,
    pub data: SensorData,
    /// Only present for `SensorKind::Custom`: the user-supplied sense function.
    custom_sense: Option<Box<dyn FnMut(&SenseContext) -> SensorData>>,
}

/// Everything a `sense()` call needs to read, bundled so the dispatch
/// functions stay free functions instead of methods with a dozen parameters.
pub struct SenseContext<'a> {
    pub node: NodeId,
    pub graph: &'a GraphStore,
    /// Every agent's current node, in `create_iter()` order, keyed by name.
    pub agents: &'a IndexMap<String, NodeId>,
}

impl Sensor {
    pub fn new(sensor_id: String, kind: SensorKind, range: f64, fov: f64) -> Self {
        Self {
            sensor_id,
            kind,
            owner: None,
            orientation: Vec2::UNIT_X,
            range,
            fov,
            data: SensorData::Empty,
            custom_sense: None,
        }
    }

    pub fn with_custom_sense(
        sensor_id: String,
        tag: String,
        sense_fn: Box<dyn FnMut(&SenseContext) -> SensorData>,
    ) -> Self {
        Self {
            sensor_id,
            kind: SensorKind::Custom(tag),
            owner: None,
            orientation: Vec2::UNIT_X,
            range: f64::INFINITY,
            fov: TAU,
            data: SensorData::Empty,
            custom_sense: Some(sense_fn),
        }
    }

    /// The effective orientation used for the angular filter: the complex
    /// product of this sensor's configured orientation and `owner_orientation`.
    /// When the owner hasn't moved (`(0,0)`) callers should treat
    /// the filter as bypassed — see [`Sensor::angular_filter_bypassed`].
    pub fn effective_orientation(&self, owner_orientation: Vec2) -> Vec2 {
        self.orientation.compose(owner_orientation)
    }

    /// True when the angular filter should be skipped entirely: `fov == 2π`,
    /// or the owner's orientation is `(0,0)` (hasn't moved yet).
    pub fn angular_filter_bypassed(&self, owner_orientation: Vec2) -> bool {
        (self.fov - TAU).abs() < 1e-12 || owner_orientation.is_zero()
    }

    /// The angular predicate: `|θ| ≤ fov/2` where
    /// `θ = atan2(dy,dx) - atan2(oy,ox)` normalized into `(-π, π]`.
    fn passes_angular_filter(&self, from: Point, to: Point, effective_orientation: Vec2) -> bool {
        let bearing = from.bearing_to(to);
        let theta = normalize_angle(bearing - effective_orientation.angle());
        theta.abs() <= self.fov / 2.0
    }

    /// Re-run this sensor's sense function against `node`, updating `data`
    /// in place and returning a reference to the refreshed value.
    ///
    /// `owner_orientation` is the owning agent's current orientation vector
    /// (`(0,0)` if the owner hasn't moved, or unused if unowned).
    pub fn sense(&mut self, ctx: &SenseContext, owner_orientation: Vec2) -> &SensorData {
        self.data = match &self.kind {
            SensorKind::Neighbor => sense_neighbor(ctx),
            SensorKind::Map | SensorKind::Range | SensorKind::Arc => {
                sense_map_family(self, ctx, owner_orientation)
            }
            SensorKind::Agent | SensorKind::AgentRange | SensorKind::AgentArc => {
                sense_agent_family(self, ctx, owner_orientation)
            }
            SensorKind::Custom(_) => {
                if let Some(f) = self.custom_sense.as_mut() {
                    f(ctx)
                } else {
                    SensorData::Empty
                }
            }
        };
        &self.data
    }
}

fn sense_neighbor(ctx: &SenseContext) -> SensorData {
    let mut out = vec![ctx.node];
    if let Ok(neighbors) = ctx.graph.neighbors(ctx.node) {
        out.extend(neighbors);
    }
    SensorData::Neighbor(out)
}

fn sense_map_family(sensor: &Sensor, ctx: &SenseContext, owner_orientation: Vec2) -> SensorData {
    let Ok(origin_node) = ctx.graph.get_node(ctx.node) else {
        return SensorData::Map {
            nodes: IndexMap::new(),
            edges: Vec::new(),
        };
    };
    let origin = origin_node.position();
    let effective_orientation = sensor.effective_orientation(owner_orientation);
    let bypass_angular = sensor.angular_filter_bypassed(owner_orientation);

    let mut nodes = IndexMap::new();
    for node_id in ctx.graph.get_nodes() {
        if node_id == ctx.node {
            nodes.insert(node_id, ctx.graph.get_node(node_id).unwrap().clone());
            continue;
        }
        let Ok(node) = ctx.graph.get_node(node_id) else {
            continue;
        };
        let pos = node.position();
        if origin.distance(pos) > sensor.range {
            continue;
        }
        if !bypass_angular && !sensor.passes_angular_filter(origin, pos, effective_orientation) {
            continue;
        }
        nodes.insert(node_id, node.clone());
    }

    let edges = ctx
        .graph
        .get_edges()
        .filter_map(|edge_id| ctx.graph.get_edge(edge_id).ok())
        .filter(|edge| nodes.contains_key(&edge.source) && nodes.contains_key(&edge.target))
        .cloned()
        .collect();

    SensorData::Map { nodes, edges }
}

fn sense_agent_family(sensor: &Sensor, ctx: &SenseContext, owner_orientation: Vec2) -> SensorData {
    let origin = ctx.graph.get_node(ctx.node).ok().map(|n| n.position());
    let effective_orientation = sensor.effective_orientation(owner_orientation);
    let bypass_angular = sensor.angular_filter_bypassed(owner_orientation);

    let mut out = IndexMap::new();
    for (name, &node_id) in ctx.agents {
        // The sensing node and the owner's own position are always included
        // independent of range/fov — avoids an ill-defined
        // bearing at zero distance.
        if Some(name) == sensor.owner.as_ref() {
            out.insert(name.clone(), node_id);
            continue;
        }
        let Some(origin) = origin else { continue };
        let Ok(node) = ctx.graph.get_node(node_id) else {
            continue;
        };
        let pos = node.position();
        if origin.distance(pos) > sensor.range {
            continue;
        }
        if !bypass_angular && !sensor.passes_angular_filter(origin, pos, effective_orientation) {
            continue;
        }
        out.insert(name.clone(), node_id);
    }
    SensorData::Agent(out)
}
