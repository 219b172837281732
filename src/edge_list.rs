use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use nom::IResult;
use nom::branch::alt;
use nom::character::complete::{digit1, one_of, space0, space1};
use nom::combinator::{eof, map, map_res, opt, recognize};
use nom::sequence::{pair, tuple};

use crate::color::{ColoringInstance, PreAssigned, VertexId};
use crate::error::{ColoringError, Result};


/** models a distance-2 coloring instance read from an edge list.
Both neighborhoods are computed once at construction and stay immutable.
*/
#[derive(Debug, Clone)]
pub struct EdgeListInstance {
    /// vertices (sorted)
    vertices: Vec<VertexId>,
    /// nb edges
    m: usize,
    /// adj_list[u]: vertices adjacent to u (sorted)
    adj_list: BTreeMap<VertexId, Vec<VertexId>>,
    /// two_hop[u]: vertices at distance exactly 2 from u (sorted)
    two_hop: BTreeMap<VertexId, Vec<VertexId>>,
}

impl ColoringInstance for EdgeListInstance {
    fn vertices(&self) -> &[VertexId] { &self.vertices }

    fn nb_edges(&self) -> usize { self.m }

    fn neighbors(&self, u:VertexId) -> &[VertexId] {
        self.adj_list.get(&u).map(|l| l.as_slice()).unwrap_or(&[])
    }

    fn two_hop_neighbors(&self, u:VertexId) -> &[VertexId] {
        self.two_hop.get(&u).map(|l| l.as_slice()).unwrap_or(&[])
    }
}


impl EdgeListInstance {

    /** constructor using a list of undirected edges.
    Repeated edges are absorbed, self loops only register the vertex.
    */
    pub fn from_edges(edges:&[(VertexId,VertexId)]) -> Self {
        let mut adj:BTreeMap<VertexId, BTreeSet<VertexId>> = BTreeMap::new();
        for (a,b) in edges {
            adj.entry(*a).or_default();
            adj.entry(*b).or_default();
            if a != b {
                adj.entry(*a).or_default().insert(*b);
                adj.entry(*b).or_default().insert(*a);
            }
        }
        let m = adj.values().map(|l| l.len()).sum::<usize>() / 2;
        let two_hop = compute_two_hop(&adj);
        Self {
            vertices: adj.keys().copied().collect(),
            m,
            adj_list: adj.into_iter()
                .map(|(u,l)| (u, l.into_iter().collect()))
                .collect(),
            two_hop,
        }
    }

    /// creates an instance from the content of an edge-list file
    pub fn from_text(s:&str) -> Self {
        Self::from_edges(&read_edge_list(s))
    }

    /// creates an instance from an edge-list file
    pub fn from_file(filename:&str) -> Result<Self> {
        let s = fs::read_to_string(filename)
            .map_err(|source| ColoringError::Io { path: filename.to_string(), source })?;
        Ok(Self::from_text(&s))
    }
}


/** for every vertex u, collects the neighbors of its neighbors,
except u itself and its direct neighbors */
fn compute_two_hop(adj:&BTreeMap<VertexId, BTreeSet<VertexId>>) -> BTreeMap<VertexId, Vec<VertexId>> {
    adj.iter().map(|(u,neighbors)| {
        let mut res:BTreeSet<VertexId> = BTreeSet::new();
        for v in neighbors {
            res.extend(adj[v].iter().filter(|w| *w != u && !neighbors.contains(*w)));
        }
        (*u, res.into_iter().collect())
    }).collect()
}


/** reads the edges of an edge-list file. The first line is a header and is ignored.
Lines that do not start with two (possibly signed) integers are skipped.
*/
pub fn read_edge_list(s:&str) -> Vec<(VertexId,VertexId)> {
    s.lines()
        .skip(1)
        .filter_map(|line| read_edge(line).ok().map(|(_,e)| e))
        .collect()
}

/// reads an integer with an optional sign
fn read_integer(s:&str) -> IResult<&str, VertexId> {
    map_res(
        recognize(pair(opt(one_of("+-")), digit1)),
        |d:&str| d.parse::<VertexId>()
    )(s)
}

/// reads an edge line: two whitespace separated integers, extra tokens are ignored
pub fn read_edge(s:&str) -> IResult<&str, (VertexId,VertexId)> {
    map(
        tuple((space0, read_integer, space1, read_integer, alt((space1, eof)))),
        |(_, a, _, b, _)| (a,b)
    )(s)
}


/** reads pre-assigned colors from a JSON object mapping vertices to colors,
for instance `{"0": 1, "7": 3}` */
pub fn read_preassigned(filename:&str) -> Result<PreAssigned> {
    let s = fs::read_to_string(filename)
        .map_err(|source| ColoringError::Io { path: filename.to_string(), source })?;
    serde_json::from_str(&s)
        .map_err(|source| ColoringError::Json { path: filename.to_string(), source })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_instance() {
        let inst = EdgeListInstance::from_file("insts/cycle4.txt").unwrap();
        assert_eq!(inst.nb_vertices(), 4);
        assert_eq!(inst.nb_edges(), 4);
        assert_eq!(inst.neighbors(0), &[1,3]);
        assert_eq!(inst.two_hop_neighbors(0), &[2]);
    }

    #[test]
    fn test_read_hypercube() {
        let inst = EdgeListInstance::from_file("insts/hypercube3.txt").unwrap();
        assert_eq!(inst.nb_vertices(), 8);
        assert_eq!(inst.nb_edges(), 12);
        for u in inst.vertices() {
            assert_eq!(inst.degree(*u), 3);
            assert_eq!(inst.two_hop_neighbors(*u).len(), 3);
        }
    }

    #[test]
    fn test_missing_file() {
        match EdgeListInstance::from_file("insts/does_not_exist.txt") {
            Err(ColoringError::Io { path, .. }) => assert_eq!(path, "insts/does_not_exist.txt"),
            other => panic!("expected an io error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let inst = EdgeListInstance::from_file("insts/malformed.txt").unwrap();
        assert_eq!(inst.vertices(), &[1,2,3,4]);
        assert_eq!(inst.nb_edges(), 3);
    }

    #[test]
    fn test_read_edge() {
        assert_eq!(read_edge("1 2").unwrap().1, (1,2));
        assert_eq!(read_edge("  10\t20 0.5").unwrap().1, (10,20));
        assert!(read_edge("7").is_err());
        assert!(read_edge("").is_err());
        assert!(read_edge("a b").is_err());
        assert!(read_edge("1 2x").is_err());
        assert!(read_edge("- 2").is_err());
        assert!(read_edge("1 --2").is_err());
        assert_eq!(read_edge("-1 2").unwrap().1, (-1,2));
        assert_eq!(read_edge("+3 -40").unwrap().1, (3,-40));
    }

    #[test]
    fn test_negative_ids() {
        let inst = EdgeListInstance::from_text("h\n-1 2\n2 3\n");
        assert_eq!(inst.vertices(), &[-1,2,3]);
        assert_eq!(inst.nb_vertices(), 3);
        assert_eq!(inst.neighbors(2), &[-1,3]);
        assert_eq!(inst.two_hop_neighbors(-1), &[3]);
    }

    #[test]
    fn test_header_is_ignored() {
        let edges = read_edge_list("1 2\n3 4\n5 6\n");
        assert_eq!(edges, vec![(3,4),(5,6)]);
    }

    #[test]
    fn test_duplicate_edges_and_self_loops() {
        let inst = EdgeListInstance::from_edges(&[(0,1),(1,0),(0,1),(2,2)]);
        assert_eq!(inst.vertices(), &[0,1,2]);
        assert_eq!(inst.nb_edges(), 1);
        assert_eq!(inst.neighbors(0), &[1]);
        assert!(inst.neighbors(2).is_empty());
        assert!(inst.two_hop_neighbors(2).is_empty());
    }

    #[test]
    fn test_two_hop_excludes_self_and_neighbors() {
        // triangle 0-1-2 with a tail 2-3
        let inst = EdgeListInstance::from_edges(&[(0,1),(1,2),(2,0),(2,3)]);
        assert_eq!(inst.two_hop_neighbors(0), &[3]);
        assert_eq!(inst.two_hop_neighbors(2), &[] as &[VertexId]);
        assert_eq!(inst.two_hop_neighbors(3), &[0,1]);
        for u in inst.vertices() {
            for w in inst.two_hop_neighbors(*u) {
                assert_ne!(u, w);
                assert!(!inst.are_adjacent(*u, *w));
            }
        }
    }

    #[test]
    fn test_read_preassigned() {
        let pre = read_preassigned("insts/hypercube3_preassigned.json").unwrap();
        assert_eq!(pre.len(), 2);
        assert_eq!(pre[&0], 2);
        assert_eq!(pre[&7], 2);
    }
}
