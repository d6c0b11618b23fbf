/*!
Whole-graph algorithms.

* [`linearize`] orders the nodes topologically and gives each one a
  coordinate along the graph's main axis.
* [`unchop`] merges runs of nodes that every path and edge traverse
  together.
*/

pub mod linearize;
pub mod unchop;

pub use self::linearize::{linearize, topological_order, Linearization};
pub use self::unchop::unchop;
