//! Template marker side table
//!
//! Clones appended for a sequence item start out [`SlotState::Unbound`].
//! Binding a value into a clone flips its slot to [`SlotState::Bound`], so
//! the locator can tell the one fresh clone apart from earlier items that
//! share its field names. The markers live here rather than on the
//! elements, so nothing leaks into the rendered HTML.

use std::collections::HashMap;

use pepper_dom::NodeId;

/// Binding state of a cloned template element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Appended from a template, waiting for a value
    Unbound,
    /// Value written
    Bound,
}

/// Per-node [`SlotState`] for one rendering pass
#[derive(Debug, Default)]
pub struct Markers {
    states: HashMap<NodeId, SlotState>,
}

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_unbound(&mut self, id: NodeId) {
        self.states.insert(id, SlotState::Unbound);
    }

    /// Only nodes that came from a template are tracked
    pub fn mark_bound(&mut self, id: NodeId) {
        if let Some(state) = self.states.get_mut(&id) {
            *state = SlotState::Bound;
        }
    }

    pub fn state(&self, id: NodeId) -> Option<SlotState> {
        self.states.get(&id).copied()
    }

    pub fn is_unbound(&self, id: NodeId) -> bool {
        self.state(id) == Some(SlotState::Unbound)
    }

    /// Nodes still waiting for a value
    pub fn unbound_count(&self) -> usize {
        self.states.values().filter(|s| **s == SlotState::Unbound).count()
    }

    /// Nodes that came from a template
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
