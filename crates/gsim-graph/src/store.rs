//! Mutable node/edge graph store.
//!
//! Same split as a typical road-network builder — node data, edge data, and
//! a spatial index used only for queries — but kept mutable after
//! construction (`add_node`/`remove_node`/`update_edge` all need to work at
//! any time), so this store is two `HashMap`s instead of sorted arrays, and
//! the spatial query (`get_edges(d, x, y)`) is a plain linear scan rather
//! than an R-tree.

use std::collections::HashMap;

use gsim_core::{EdgeId, NodeId, Point};
use serde::{Deserialize, Serialize};

use crate::edge::{Edge, EdgeUpdate};
use crate::error::{GraphError, GraphResult};
use crate::node::{Node, NodeUpdate};

/// On-disk representation written by [`GraphStore::save`] and read back by
/// [`GraphStore::load`]. Not part of the public contract — the on-disk
/// layout only needs to be stable across save/load round-trips.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// In-memory node/edge graph with polyline edge geometry.
#[derive(Default)]
pub struct GraphStore {
    nodes: HashMap<NodeId, Node>,
    edges: HashMap<EdgeId, Edge>,
    /// Every edge incident to a node (as source or target), kept in sync by
    /// every mutator so `neighbors`/cascading `remove_node` avoid a full scan.
    incident: HashMap<NodeId, Vec<EdgeId>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Nodes ───────────────────────────────────────────────────────────

    /// Fails [`GraphError::Core`] (`AlreadyExists`) if `id` is already present.
    pub fn add_node(&mut self, id: NodeId, x: f64, y: f64) -> GraphResult<()> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::Core(gsim_core::CoreError::AlreadyExists(
                format!("node {id}"),
            )));
        }
        self.nodes.insert(id, Node::new(id, x, y));
        self.incident.entry(id).or_default();
        Ok(())
    }

    pub fn get_node(&self, id: NodeId) -> GraphResult<&Node> {
        self.nodes
            .get(&id)
            .ok_or_else(|| GraphError::Core(gsim_core::CoreError::NotFound(format!("node {id}"))))
    }

    pub fn get_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Partial update; `None` fields in `update` retain the node's previous value.
    pub fn update_node(&mut self, id: NodeId, update: NodeUpdate) -> GraphResult<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| GraphError::Core(gsim_core::CoreError::NotFound(format!("node {id}"))))?;
        if let Some(x) = update.x {
            node.x = x;
        }
        if let Some(y) = update.y {
            node.y = y;
        }
        Ok(())
    }

    /// Removes the node and cascades: every edge incident to it is also removed.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<()> {
        if !self.nodes.contains_key(&id) {
            return Err(GraphError::Core(gsim_core::CoreError::NotFound(format!("node {id}"))));
        }
        let incident = self.incident.remove(&id).unwrap_or_default();
        for edge_id in incident {
            self.remove_edge_unchecked(edge_id);
        }
        self.nodes.remove(&id);
        Ok(())
    }

    /// Neighbor query (bidirectional — an edge in either direction counts):
    /// every `v` such that `(node_id, v)` or
    /// `(v, node_id)` is an edge.
    pub fn neighbors(&self, node_id: NodeId) -> GraphResult<Vec<NodeId>> {
        if !self.nodes.contains_key(&node_id) {
            return Err(GraphError::Core(gsim_core::CoreError::NotFound(format!(
                "node {node_id}"
            ))));
        }
        let mut out = Vec::new();
        for edge_id in self.incident.get(&node_id).into_iter().flatten() {
            let edge = &self.edges[edge_id];
            let other = if edge.source == node_id {
                edge.target
            } else {
                edge.source
            };
            if !out.contains(&other) {
                out.push(other);
            }
        }
        Ok(out)
    }

    // ── Edges ───────────────────────────────────────────────────────────

    /// `linestring`: `None` synthesizes a straight 2-point line from source to
    /// target; `Some(pts)` with fewer than 2 points is rejected as degenerate.
    pub fn add_edge(
        &mut self,
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        length: f64,
        linestring: Option<Vec<Point>>,
    ) -> GraphResult<()> {
        if self.edges.contains_key(&id) {
            return Err(GraphError::Core(gsim_core::CoreError::AlreadyExists(
                format!("edge {id}"),
            )));
        }
        let source_pos = self.get_node(source)?.position();
        let target_pos = self.get_node(target)?.position();

        let linestring = match linestring {
            None => vec![source_pos, target_pos],
            Some(pts) if pts.len() >= 2 => pts,
            Some(_) => {
                return Err(GraphError::Core(gsim_core::CoreError::Invalid(
                    "edge linestring must have at least two points".into(),
                )));
            }
        };

        self.edges.insert(
            id,
            Edge {
                id,
                source,
                target,
                length,
                linestring,
            },
        );
        self.incident.entry(source).or_default().push(id);
        if target != source {
            self.incident.entry(target).or_default().push(id);
        }
        Ok(())
    }

    pub fn get_edge(&self, id: EdgeId) -> GraphResult<&Edge> {
        self.edges
            .get(&id)
            .ok_or_else(|| GraphError::Core(gsim_core::CoreError::NotFound(format!("edge {id}"))))
    }

    pub fn get_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys().copied()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Spatial scan: edges with at least one endpoint within
    /// distance `d` of `(x, y)`. A plain linear scan, shared by the sensor
    /// engine so there is exactly one filter implementation across the
    /// codebase.
    pub fn get_edges_near(&self, d: f64, x: f64, y: f64) -> Vec<EdgeId> {
        let center = Point::new(x, y);
        self.edges
            .values()
            .filter(|edge| {
                let src = self.nodes[&edge.source].position();
                let dst = self.nodes[&edge.target].position();
                src.distance(center) <= d || dst.distance(center) <= d
            })
            .map(|edge| edge.id)
            .collect()
    }

    /// Partial update; `None` fields in `update` retain the edge's previous value.
    pub fn update_edge(&mut self, id: EdgeId, update: EdgeUpdate) -> GraphResult<()> {
        let edge = self
            .edges
            .get_mut(&id)
            .ok_or_else(|| GraphError::Core(gsim_core::CoreError::NotFound(format!("edge {id}"))))?;
        if let Some(length) = update.length {
            edge.length = length;
        }
        if let Some(linestring) = update.linestring {
            if linestring.len() < 2 {
                return Err(GraphError::Core(gsim_core::CoreError::Invalid(
                    "edge linestring must have at least two points".into(),
                )));
            }
            edge.linestring = linestring;
        }
        Ok(())
    }

    /// Local removal — does not touch the endpoint nodes.
    pub fn remove_edge(&mut self, id: EdgeId) -> GraphResult<()> {
        if !self.edges.contains_key(&id) {
            return Err(GraphError::Core(gsim_core::CoreError::NotFound(format!("edge {id}"))));
        }
        self.remove_edge_unchecked(id);
        Ok(())
    }

    fn remove_edge_unchecked(&mut self, id: EdgeId) {
        if let Some(edge) = self.edges.remove(&id) {
            if let Some(list) = self.incident.get_mut(&edge.source) {
                list.retain(|e| *e != id);
            }
            if edge.target != edge.source {
                if let Some(list) = self.incident.get_mut(&edge.target) {
                    list.retain(|e| *e != id);
                }
            }
        }
    }

    // ── Bulk ingestion ────────────────────────────────────────────────────

    /// Bulk-ingest an external adjacency description (an `attach_networkx_graph`
    /// equivalent). For each edge lacking a linestring,
    /// synthesize straight; for each lacking a length, default to `0`.
    pub fn ingest_adjacency(
        &mut self,
        nodes: impl IntoIterator<Item = (NodeId, f64, f64)>,
        edges: impl IntoIterator<Item = (EdgeId, NodeId, NodeId, Option<f64>, Option<Vec<Point>>)>,
    ) -> GraphResult<()> {
        for (id, x, y) in nodes {
            self.add_node(id, x, y)?;
        }
        for (id, source, target, length, linestring) in edges {
            self.add_edge(id, source, target, length.unwrap_or(0.0), linestring)?;
        }
        Ok(())
    }

    // ── Persistence ───────────────────────────────────────────────────────

    /// Serialize the full node+edge tables to `path`.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> GraphResult<()> {
        let snapshot = Snapshot {
            nodes: self.nodes.values().cloned().collect(),
            edges: self.edges.values().cloned().collect(),
        };
        let bytes = serde_json::to_vec(&snapshot)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a graph previously written by [`GraphStore::save`].
    pub fn load(path: impl AsRef<std::path::Path>) -> GraphResult<Self> {
        let bytes = std::fs::read(path)?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        let mut store = GraphStore::new();
        for node in snapshot.nodes {
            store.add_node(node.id, node.x, node.y)?;
        }
        for edge in snapshot.edges {
            store.add_edge(edge.id, edge.source, edge.target, edge.length, Some(edge.linestring))?;
        }
        Ok(store)
    }
}
