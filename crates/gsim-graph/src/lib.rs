//! `gsim-graph` — the node/edge graph store.
//!
//! # Crate layout
//!
//! | Module    | Contents                                          |
//! |-----------|-----------------------------------------------------|
//! | [`node`]  | `Node`, `NodeUpdate`                                |
//! | [`edge`]  | `Edge`, `EdgeUpdate`                                |
//! | [`store`] | `GraphStore` — add/get/update/remove, spatial scan  |
//! | [`error`] | `GraphError`, `GraphResult<T>`                      |

pub mod edge;
pub mod error;
pub mod node;
pub mod store;


pub use edge::{Edge, EdgeUpdate};
pub use error::{GraphError, GraphResult};
pub use node::{Node, NodeUpdate};
pub use store::GraphStore;
