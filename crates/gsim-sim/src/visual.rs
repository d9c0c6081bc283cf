//! The Visual Contract: the interface every rendering back-end implements
//! and the core calls into, never the reverse. [`NoopVisual`] is the
//! headless default that makes the core usable without a renderer.

use gsim_core::{NodeId, Value};
use indexmap::IndexMap;

/// Styling/drawing hooks a host-supplied renderer implements. All methods
/// default to no-ops so a partial implementation (or the headless default)
/// only needs to override what it actually renders.
pub trait VisualContract {
    fn set_graph_visual(&mut self, _kwargs: IndexMap<String, Value>) {}
    fn set_agent_visual(&mut self, _name: &str, _kwargs: IndexMap<String, Value>) {}
    fn set_sensor_visual(&mut self, _name: &str, _kwargs: IndexMap<String, Value>) {}

    /// Register a user-supplied draw callback under `name`. A callback that
    /// returns `Err` is surfaced as an external error — the caller of
    /// `simulate()` is responsible for catching, logging, and continuing.
    fn add_artist(&mut self, _name: &str, _artist: Box<dyn FnMut() -> Result<(), String>>) {}
    fn remove_artist(&mut self, _name: &str) {}

    /// Advance one rendered step; may block waiting on external I/O. The
    /// core treats this as opaque.
    fn simulate(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Ask a human operator for the next node for `agent_name`. The no-op
    /// back-end returns `curr_pos` unchanged.
    fn human_input(&mut self, _agent_name: &str, curr_pos: NodeId) -> NodeId {
        curr_pos
    }

    fn terminate(&mut self) {}
}

/// The required headless back-end: a renderer-free implementation that
/// always succeeds and never blocks.
#[derive(Default)]
pub struct NoopVisual;

impl VisualContract for NoopVisual {}
