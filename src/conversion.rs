/*!
Reading and writing graphs in GFA.

Lines are parsed with the [`gfa`] crate. Only the `S`, `L` and `P`
records are understood: header (`H`) and comment (`#`) lines are
skipped, and any other record type is an error.

Segment names are mapped to [`NodeId`]s as they are read. A name that
is a positive integer becomes the node ID when that ID is still free;
any other name gets the next free ID and is kept on the node, so that
writing the graph back out reproduces the original names.
*/

use std::fs::File;
use std::io::{BufRead, BufReader, Write};

use bstr::{io::BufReadExt, ByteSlice};
use fnv::{FnvHashMap, FnvHashSet};

use gfa::{
    gfa::{Line, Link, Orientation, Path, Segment, GFA},
    parser::GFAParser,
};

#[allow(unused_imports)]
use log::{debug, trace};

use crate::{
    error::{PangenomeError, Result},
    handle::{Edge, Handle, NodeId},
    handlegraph::*,
    hashgraph::HashGraph,
    mutablehandlegraph::*,
    pathhandlegraph::{GraphPaths, MutableGraphPaths},
};

/// Read a GFA file into a new graph.
pub fn read_gfa<P: AsRef<std::path::Path>>(path: P) -> Result<HashGraph> {
    let file = File::open(path.as_ref())?;
    debug!("reading GFA from {}", path.as_ref().display());
    parse_gfa(BufReader::new(file))
}

/// Parse GFA lines from any buffered reader.
pub fn parse_gfa<R: BufRead>(reader: R) -> Result<HashGraph> {
    let mut builder = GfaBuilder::default();
    for (ix, line) in reader.byte_lines().enumerate() {
        let line = line?;
        builder.add_line(ix + 1, &line)?;
    }
    builder.finish()
}

fn orient(is_reverse: bool) -> Orientation {
    if is_reverse {
        Orientation::Backward
    } else {
        Orientation::Forward
    }
}

/// Build the GFA records of the graph: segments in ID order, links in
/// edge order, then paths. Segments carry their provenance names.
pub fn to_gfa(graph: &HashGraph) -> GFA<Vec<u8>, ()> {
    let mut gfa = GFA::new();

    for id in graph.sorted_node_ids() {
        let seq = graph.sequence(Handle::pack(id, false));
        let sequence: Vec<u8> = if seq.is_empty() {
            b"*".to_vec()
        } else {
            seq.to_vec()
        };
        gfa.segments.push(Segment {
            name: graph.node_name(id).to_vec(),
            sequence,
            optional: (),
        });
    }

    for Edge(left, right) in graph.sorted_edges() {
        gfa.links.push(Link {
            from_segment: graph.node_name(left.id()).to_vec(),
            from_orient: orient(left.is_reverse()),
            to_segment: graph.node_name(right.id()).to_vec(),
            to_orient: orient(right.is_reverse()),
            overlap: b"0M".to_vec(),
            optional: (),
        });
    }

    for path_id in graph.path_ids() {
        let path_name =
            graph.get_path_name(path_id).unwrap_or_default().to_vec();
        let steps = graph.path_steps(path_id).unwrap_or_default();
        let segment_names = steps
            .iter()
            .map(|h| {
                format!("{}{}", graph.node_name(h.id()), h.orientation_char())
            })
            .collect::<Vec<_>>()
            .join(",");
        let path: Path<Vec<u8>, ()> =
            Path::new(path_name, segment_names.into_bytes(), Vec::new(), ());
        gfa.paths.push(path);
    }

    gfa
}

/// Write the graph as GFA: header, segments, links, then paths.
pub fn write_gfa<W: Write>(graph: &HashGraph, mut out: W) -> Result<()> {
    let gfa = to_gfa(graph);

    writeln!(out, "H\tVN:Z:1.0")?;
    for seg in gfa.segments.iter() {
        writeln!(
            out,
            "S\t{}\t{}",
            seg.name.as_bstr(),
            seg.sequence.as_bstr()
        )?;
    }
    for link in gfa.links.iter() {
        writeln!(
            out,
            "L\t{}\t{}\t{}\t{}\t{}",
            link.from_segment.as_bstr(),
            link.from_orient,
            link.to_segment.as_bstr(),
            link.to_orient,
            link.overlap.as_bstr()
        )?;
    }
    for path in gfa.paths.iter() {
        writeln!(
            out,
            "P\t{}\t{}\t*",
            path.path_name.as_bstr(),
            path.segment_names.as_bstr()
        )?;
    }

    Ok(())
}

/// Render the graph as a GFA string.
pub fn gfa_string(graph: &HashGraph) -> String {
    let mut buf: Vec<u8> = Vec::new();
    // writing to a Vec cannot fail
    let _ = write_gfa(graph, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

struct GfaBuilder {
    parser: GFAParser<Vec<u8>, ()>,
    graph: HashGraph,
    names: FnvHashMap<Vec<u8>, NodeId>,
    used: FnvHashSet<NodeId>,
    next_id: u64,
}

impl Default for GfaBuilder {
    fn default() -> Self {
        GfaBuilder {
            parser: GFAParser::new(),
            graph: HashGraph::new(),
            names: Default::default(),
            used: Default::default(),
            next_id: 0,
        }
    }
}

impl GfaBuilder {
    fn add_line(&mut self, line_no: usize, line: &[u8]) -> Result<()> {
        let line = line.trim_end();
        if line.is_empty() || line[0] == b'#' {
            return Ok(());
        }

        let fields: Vec<&[u8]> = line.split_str("\t").collect();
        match fields[0] {
            b"H" => return Ok(()),
            b"S" | b"L" => (),
            // the parser rejects a path with no steps
            b"P" if fields.get(2).map_or(false, |f| f.is_empty()) => {
                self.graph.create_path(fields[1], Vec::new());
                return Ok(());
            }
            b"P" => (),
            other => {
                return Err(PangenomeError::UnsupportedRecord {
                    line: line_no,
                    record: other.to_str_lossy().into_owned(),
                })
            }
        }

        let record = self.parser.parse_gfa_line(line).map_err(|err| {
            PangenomeError::MalformedLine {
                line: line_no,
                reason: format!("{:?}", err),
            }
        })?;

        match record {
            Line::Segment(seg) => {
                let seq: &[u8] = if seg.sequence == b"*" {
                    b""
                } else {
                    seg.sequence.as_slice()
                };
                let id = self.resolve(&seg.name);
                self.graph.create_handle(seq, id);
                self.graph.set_node_name(id, &seg.name);
                trace!("segment {} -> node {}", seg.name.as_bstr(), id);
            }
            Line::Link(link) => {
                let left = Handle::pack(
                    self.resolve(&link.from_segment),
                    matches!(link.from_orient, Orientation::Backward),
                );
                let right = Handle::pack(
                    self.resolve(&link.to_segment),
                    matches!(link.to_orient, Orientation::Backward),
                );
                self.graph.create_edge(Edge(left, right));
            }
            Line::Path(path) => {
                let mut steps = Vec::new();
                for step in path.segment_names.split_str(",") {
                    let (orient, seg) = match step.split_last() {
                        Some((orient, seg)) if !seg.is_empty() => {
                            (orient, seg)
                        }
                        _ => {
                            return Err(PangenomeError::MalformedLine {
                                line: line_no,
                                reason: format!(
                                    "bad path step '{}'",
                                    step.as_bstr()
                                ),
                            })
                        }
                    };
                    let orient = std::slice::from_ref(orient);
                    let is_reverse = parse_orientation(orient, line_no)?;
                    steps.push(Handle::pack(self.resolve(seg), is_reverse));
                }
                self.graph.create_path(&path.path_name, steps);
            }
            _ => (),
        }
        Ok(())
    }

    fn resolve(&mut self, name: &[u8]) -> NodeId {
        if let Some(&id) = self.names.get(name) {
            return id;
        }

        let numeric = name
            .to_str()
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(NodeId)
            .filter(|id| {
                !id.is_zero() && id.0 < (1 << 63) && !self.used.contains(id)
            });

        let id = match numeric {
            Some(id) => id,
            None => loop {
                self.next_id += 1;
                let id = NodeId(self.next_id);
                if !self.used.contains(&id) {
                    break id;
                }
            },
        };

        self.used.insert(id);
        self.names.insert(name.to_vec(), id);
        id
    }

    fn finish(self) -> Result<HashGraph> {
        let mut undefined: Vec<&Vec<u8>> = self
            .names
            .iter()
            .filter(|(_, id)| !self.graph.has_node(**id))
            .map(|(name, _)| name)
            .collect();
        undefined.sort();

        if let Some(name) = undefined.first() {
            return Err(PangenomeError::UndefinedSegment(
                name.to_str_lossy().into_owned(),
            ));
        }

        debug!(
            "parsed GFA: {} nodes, {} edges, {} paths",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.graph.path_count()
        );
        Ok(self.graph)
    }
}

fn parse_orientation(field: &[u8], line_no: usize) -> Result<bool> {
    match field {
        b"+" => Ok(false),
        b"-" => Ok(true),
        other => Err(PangenomeError::MalformedLine {
            line: line_no,
            reason: format!("bad orientation '{}'", other.as_bstr()),
        }),
    }
}
