mod error;
mod resolver;

use glint_util::NodeId;
use rustc_hash::FxHashMap;

pub use error::ResolveError;
pub use resolver::resolve;

/// `node -> depth` produced by the resolver and consulted by the
/// evaluator. A missing entry means "look in the global environment":
/// absence is meaningful, not an error.
#[derive(Debug, Default)]
pub struct ResolutionMap(FxHashMap<NodeId, u32>);

impl ResolutionMap {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self, id: NodeId) -> Option<u32> {
        self.0.get(&id).copied()
    }

    fn insert(&mut self, id: NodeId, depth: u32) {
        self.0.insert(id, depth);
    }
}
