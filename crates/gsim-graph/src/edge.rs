//! Graph edge — directed, with polyline geometry.
//! `(u→v)` and `(v→u)` are distinct edges.

use gsim_core::{EdgeId, NodeId, Point};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub length: f64,
    /// Ordered sequence of `(x,y)` with at least two points.
    pub linestring: Vec<Point>,
}

/// Partial update payload for [`super::store::GraphStore::update_edge`].
/// Missing fields (`None`) retain the edge's previous value.
#[derive(Default, Clone, Debug)]
pub struct EdgeUpdate {
    pub length: Option<f64>,
    pub linestring: Option<Vec<Point>>,
}
