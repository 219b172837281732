//! Search algorithms for the distance-2 coloring problem.

/// degree-first greedy (initial coloring)
pub mod greedy_degree;

/// search states and their heuristic score
pub mod state;

/// local beam search driving the states towards a conflict-free coloring
pub mod beam_search;
