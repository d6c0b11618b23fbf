/*!

A `HashMap`-based graph that does nothing to reduce its memory
footprint, but is fast to mutate. Incorporation works on a clone of
it, leaving the input graph untouched.

*/

mod graph;
pub mod node;
pub mod path;

pub use self::graph::HashGraph;
pub use self::node::Node;
pub use self::path::Path;
