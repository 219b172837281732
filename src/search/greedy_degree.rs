use std::cmp::{Ordering, Reverse};

use bit_set::BitSet;
use priority_queue::PriorityQueue;

use crate::color::{ColorCounts, Coloring, ColoringInstance, PreAssigned, VertexId};

#[derive(PartialEq, Eq)]
struct DegreeInfo {
    degree: usize,
    vertex: Reverse<VertexId>,
}

impl Ord for DegreeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.degree.cmp(&other.degree)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for DegreeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/** implements a degree-first greedy for the distance-2 coloring.
    1. choose the uncolored vertex with the largest degree (break ties by the smallest id)
    2. if it is pre-assigned, give it its fixed color
    3. otherwise, give it the smallest color not used by its colored neighbors
       and colored two-hop neighbors
    4. repeat until every vertex is colored

Never backtracks. Without pre-assigned colors the result has no conflict.

parameters:
 - inst: reference to an instance
 - pre_assigned: fixed colors (vertices not in the instance are ignored)
*/
pub fn greedy_degree(inst:&dyn ColoringInstance, pre_assigned:&PreAssigned) -> (Coloring, ColorCounts) {
    let mut remaining_vertices:PriorityQueue<VertexId, DegreeInfo> = PriorityQueue::new();
    for u in inst.vertices() {
        remaining_vertices.push(*u, DegreeInfo { degree:inst.degree(*u), vertex:Reverse(*u) });
    }
    let mut coloring = Coloring::new();
    let mut counts = ColorCounts::new();
    while let Some((u,_)) = remaining_vertices.pop() {
        let color = match pre_assigned.get(&u) {
            Some(c) => *c,
            None => {
                // the smallest free color is at most max_useful, larger colors never block it
                let max_useful = inst.degree(u) + inst.two_hop_neighbors(u).len() + 1;
                let mut forbidden:BitSet = BitSet::with_capacity(max_useful + 1);
                for v in inst.neighbors(u).iter().chain(inst.two_hop_neighbors(u).iter()) {
                    match coloring.get(v) {
                        Some(c) if *c <= max_useful => { forbidden.insert(*c); },
                        _ => {},
                    }
                }
                let mut c = 1;
                while forbidden.contains(c) { c += 1; }
                c
            }
        };
        coloring.insert(u, color);
        *counts.entry(color).or_insert(0) += 1;
    }
    (coloring, counts)
}
