/*!

`HashGraph` node definition

*/

use bstr::BString;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub sequence: Vec<u8>,
    /// The segment name this node was read under, when it differs
    /// from the node ID.
    pub name: Option<BString>,
}

impl Node {
    pub fn new(sequence: &[u8]) -> Node {
        Node {
            sequence: sequence.into(),
            name: None,
        }
    }

    /// The node's sequence as seen from a handle with the given
    /// orientation.
    pub fn oriented_sequence(&self, is_reverse: bool) -> Vec<u8> {
        if is_reverse {
            self.sequence.iter().rev().map(|&b| complement(b)).collect()
        } else {
            self.sequence.clone()
        }
    }
}

#[inline]
const fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'a' => b't',
        b't' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_sequence_is_reverse_complement() {
        let node = Node::new(b"GATTACa");
        assert_eq!(node.oriented_sequence(false), b"GATTACa".to_vec());
        assert_eq!(node.oriented_sequence(true), b"tGTAATC".to_vec());
    }

    #[test]
    fn unknown_bases_keep_their_case() {
        let node = Node::new(b"AnNRy");
        assert_eq!(node.oriented_sequence(true), b"yRNnT".to_vec());
    }
}
