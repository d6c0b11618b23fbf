use bstr::BString;

use crate::handle::Handle;
use crate::pathhandlegraph::PathId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub path_id: PathId,
    pub name: BString,
    pub nodes: Vec<Handle>,
}

impl Path {
    pub fn new<T: Into<BString>>(
        name: T,
        path_id: PathId,
        nodes: Vec<Handle>,
    ) -> Self {
        Path {
            name: name.into(),
            path_id,
            nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
