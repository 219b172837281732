use ordered_float::OrderedFloat;

use crate::color::{ColorCounts, Coloring, ColoringInstance, color_counts, count_conflicts};

/// weight of a conflict in the heuristic score
pub const CONFLICT_WEIGHT:f64 = 1000.;

/// weight of a color in the heuristic score
pub const COLOR_WEIGHT:f64 = 100.;

/** snapshot of a coloring explored by the search.
Never modified once built: a new coloring yields a new state.
*/
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    coloring: Coloring,
    conflicts: usize,
    nb_colors: usize,
    color_counts: ColorCounts,
    balance_penalty: f64,
    heuristic: OrderedFloat<f64>,
}

impl SearchState {
    /** builds a state from a coloring, its number of conflicts and its per-color usage.
    The number of colors is the number of entries in color_counts.
    */
    pub fn new(coloring:Coloring, conflicts:usize, color_counts:ColorCounts) -> Self {
        let nb_colors = color_counts.len();
        let balance_penalty = balance_penalty(&color_counts);
        let heuristic = OrderedFloat(
            conflicts as f64 * CONFLICT_WEIGHT + nb_colors as f64 * COLOR_WEIGHT + balance_penalty
        );
        Self { coloring, conflicts, nb_colors, color_counts, balance_penalty, heuristic }
    }

    /// evaluates a coloring from scratch
    pub fn from_coloring(inst:&dyn ColoringInstance, coloring:Coloring) -> Self {
        let conflicts = count_conflicts(inst, &coloring);
        let counts = color_counts(&coloring);
        Self::new(coloring, conflicts, counts)
    }

    /// vertex -> color
    pub fn coloring(&self) -> &Coloring { &self.coloring }

    /// consumes the state and returns its coloring
    pub fn into_coloring(self) -> Coloring { self.coloring }

    /// number of pairs within two hops sharing a color
    pub fn conflicts(&self) -> usize { self.conflicts }

    /// number of distinct colors used
    pub fn nb_colors(&self) -> usize { self.nb_colors }

    /// number of vertices per color
    pub fn color_counts(&self) -> &ColorCounts { &self.color_counts }

    /// squared deviation of color usage from the mean usage
    pub fn balance_penalty(&self) -> f64 { self.balance_penalty }

    /// score to minimize: conflicts first, then colors, then balance
    pub fn heuristic(&self) -> OrderedFloat<f64> { self.heuristic }
}

/// sum over colors of (usage - mean usage)², 0 if no color is used
fn balance_penalty(color_counts:&ColorCounts) -> f64 {
    if color_counts.is_empty() {
        return 0.;
    }
    let avg = color_counts.values().sum::<usize>() as f64 / color_counts.len() as f64;
    color_counts.values()
        .map(|c| (*c as f64 - avg).powi(2))
        .sum()
}
