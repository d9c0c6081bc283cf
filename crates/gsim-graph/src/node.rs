//! Graph node — immutable identity, updatable position. Nodes own no
//! edges directly.

use gsim_core::{NodeId, Point};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Partial update payload for [`super::store::GraphStore::update_node`].
/// Missing fields (`None`) retain the node's previous value.
#[derive(Default, Clone, Debug)]
pub struct NodeUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
}
