/*!
Traits for the named paths embedded in a graph.

A path is an ordered list of handles, one per step. The same handle
may occur on several steps of a path.
*/

use crate::handle::Handle;
use crate::handlegraph::HandleGraph;

/// A unique identifier for a single path.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PathId(pub u64);

impl std::fmt::Display for PathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable access to the paths of a graph.
pub trait GraphPaths {
    /// The number of embedded paths
    fn path_count(&self) -> usize;

    /// All path IDs, in ascending order.
    fn path_ids(&self) -> Vec<PathId>;

    /// Get the path ID for the given name, if it exists
    fn get_path_id(&self, name: &[u8]) -> Option<PathId>;

    /// Get the name for the given ID, if it exists
    fn get_path_name(&self, id: PathId) -> Option<&[u8]>;

    /// The steps of the path, in order.
    fn path_steps(&self, id: PathId) -> Option<&[Handle]>;

    fn path_len(&self, id: PathId) -> Option<usize> {
        self.path_steps(id).map(|steps| steps.len())
    }

    /// The sequence spelled by the path: the concatenation of the
    /// oriented sequences of its steps.
    fn path_sequence(&self, id: PathId) -> Option<Vec<u8>>
    where
        Self: HandleGraph,
    {
        let steps = self.path_steps(id)?;
        let mut seq = Vec::new();
        for &handle in steps {
            seq.extend(self.sequence(handle));
        }
        Some(seq)
    }
}

/// Creating, removing, and rewriting paths.
pub trait MutableGraphPaths {
    /// Register a path with the given steps. If a path with the same
    /// name exists its steps are replaced and its ID is kept.
    fn create_path(&mut self, name: &[u8], steps: Vec<Handle>) -> PathId;

    /// Remove a path, returning `true` if it existed.
    fn destroy_path(&mut self, id: PathId) -> bool;

    /// Append a step to the path, returning the index of the new step,
    /// or `None` if the path doesn't exist.
    fn path_append_step(&mut self, id: PathId, handle: Handle)
        -> Option<usize>;

    /// Apply `f` to the steps of every path, in ascending `PathId`
    /// order.
    fn with_paths_mut<F>(&mut self, f: F)
    where
        F: FnMut(PathId, &mut Vec<Handle>);
}
