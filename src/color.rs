use std::collections::BTreeMap;

/** Vertex Id (any integer, negative ids included) */
pub type VertexId = i64;

/** Color (colors start at 1) */
pub type Color = usize;

/** Solution of a distance-2 coloring problem (represented as vertex -> color). */
pub type Coloring = BTreeMap<VertexId, Color>;

/** number of vertices using each color */
pub type ColorCounts = BTreeMap<Color, usize>;

/** colors fixed by the caller before the search starts */
pub type PreAssigned = BTreeMap<VertexId, Color>;


/** models a distance-2 coloring instance.
Every neighborhood is returned sorted by ascending vertex id.
*/
pub trait ColoringInstance {
    /// vertices of the graph (ascending ids)
    fn vertices(&self) -> &[VertexId];

    /// number of vertices
    fn nb_vertices(&self) -> usize { self.vertices().len() }

    /// number of (undirected) edges
    fn nb_edges(&self) -> usize;

    /// direct neighbors of u (empty if u is not in the graph)
    fn neighbors(&self, u:VertexId) -> &[VertexId];

    /// vertices at distance exactly 2 from u
    fn two_hop_neighbors(&self, u:VertexId) -> &[VertexId];

    /// number of direct neighbors of u
    fn degree(&self, u:VertexId) -> usize { self.neighbors(u).len() }

    /// true iff u and v share an edge
    fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// true iff u belongs to the graph
    fn contains(&self, u:VertexId) -> bool {
        self.vertices().binary_search(&u).is_ok()
    }

    /// displays various statistics about the instance
    fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        let degrees:Vec<usize> = self.vertices().iter().map(|u| self.degree(*u)).collect();
        if let (Some(min), Some(max)) = (degrees.iter().min(), degrees.iter().max()) {
            println!("\t{} \t min degree", min);
            println!("\t{} \t max degree", max);
        }
        let max_two_hop = self.vertices().iter()
            .map(|u| self.two_hop_neighbors(*u).len())
            .max().unwrap_or(0);
        println!("\t{} \t max two-hop neighbors", max_two_hop);
    }
}


/// per-color usage of a coloring
pub fn color_counts(coloring:&Coloring) -> ColorCounts {
    let mut res = ColorCounts::new();
    for c in coloring.values() {
        *res.entry(*c).or_insert(0) += 1;
    }
    res
}

/** counts the pairs of vertices at distance 1 or 2 sharing the same color.
Each pair is seen from both endpoints, hence the final division.
*/
pub fn count_conflicts(inst:&dyn ColoringInstance, coloring:&Coloring) -> usize {
    let mut conflicts = 0;
    for (u,c) in coloring {
        conflicts += inst.neighbors(*u).iter()
            .chain(inst.two_hop_neighbors(*u).iter())
            .filter(|v| coloring.get(*v) == Some(c))
            .count();
    }
    conflicts / 2
}


/// result of the solution checker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// feasible solution using this many colors
    Ok(usize),
    /// vertex of the instance with no color
    MissingVertex(VertexId),
    /// colored vertex that is not in the instance
    UnknownVertex(VertexId),
    /// two vertices at distance at most 2 share a color
    Conflict(VertexId, VertexId),
}

/**
checks that every vertex is colored exactly once and that no two vertices
within two hops share a color. Returns the number of colors if feasible.
*/
pub fn checker(inst:&dyn ColoringInstance, coloring:&Coloring) -> CheckerResult {
    for u in inst.vertices() {
        if !coloring.contains_key(u) {
            return CheckerResult::MissingVertex(*u);
        }
    }
    for u in coloring.keys() {
        if !inst.contains(*u) {
            return CheckerResult::UnknownVertex(*u);
        }
    }
    for (u,c) in coloring {
        let conflict = inst.neighbors(*u).iter()
            .chain(inst.two_hop_neighbors(*u).iter())
            .find(|v| coloring.get(*v) == Some(c));
        if let Some(v) = conflict {
            return CheckerResult::Conflict(*u, *v);
        }
    }
    CheckerResult::Ok(color_counts(coloring).len())
}
