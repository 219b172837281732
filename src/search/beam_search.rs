use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::color::{Coloring, ColoringInstance, PreAssigned, count_conflicts};
use crate::error::{ColoringError, Result};
use crate::search::greedy_degree::greedy_degree;
use crate::search::state::SearchState;


/// parameters of the local beam search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamSearchParameters {
    beam_width: usize,
    max_iter: usize,
}

impl BeamSearchParameters {
    /// creates the parameters.
    /// # Errors
    ///  - if the beam width is 0
    pub fn new(beam_width:usize, max_iter:usize) -> Result<Self> {
        if beam_width == 0 {
            return Err(ColoringError::InvalidBeamWidth(beam_width));
        }
        Ok(Self { beam_width, max_iter })
    }

    /// maximum number of states kept between iterations
    pub fn beam_width(&self) -> usize { self.beam_width }

    /// maximum number of iterations
    pub fn max_iter(&self) -> usize { self.max_iter }
}

impl Default for BeamSearchParameters {
    fn default() -> Self { Self { beam_width: 10, max_iter: 100 } }
}


/// progress information given to the observer at each iteration
#[derive(Debug)]
pub struct IterationReport<'a> {
    /// current iteration (starts at 1)
    pub iteration: usize,
    /// maximum number of iterations
    pub max_iter: usize,
    /// best state of the beam
    pub best: &'a SearchState,
    /// number of states in the beam
    pub beam_size: usize,
}

/// how the search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// a state without conflicts was found
    Success,
    /// iteration budget spent without reaching zero conflicts
    Exhausted,
}

/// outcome of a beam search
#[derive(Debug, Clone)]
pub struct BeamSearchResult {
    /// selected state
    pub best: SearchState,
    /// number of iterations performed
    pub iterations: usize,
    /// how the search stopped
    pub termination: Termination,
}


/** checks that every pre-assigned vertex exists and has a valid color */
fn check_pre_assigned(inst:&dyn ColoringInstance, pre_assigned:&PreAssigned) -> Result<()> {
    for (u,c) in pre_assigned {
        if !inst.contains(*u) {
            return Err(ColoringError::UnknownPreAssignedVertex(*u));
        }
        if *c == 0 {
            return Err(ColoringError::InvalidPreAssignedColor { vertex: *u });
        }
    }
    Ok(())
}

/** keeps the k states with the smallest heuristic, sorted by increasing heuristic.
Ties are broken by position in the pool.
*/
fn k_smallest(pool:Vec<SearchState>, k:usize) -> Vec<SearchState> {
    let mut heap:BinaryHeap<(OrderedFloat<f64>, usize)> = BinaryHeap::with_capacity(k+1);
    for (i,s) in pool.iter().enumerate() {
        heap.push((s.heuristic(), i));
        if heap.len() > k { heap.pop(); }
    }
    let mut states:Vec<Option<SearchState>> = pool.into_iter().map(Some).collect();
    heap.into_sorted_vec().into_iter()
        .filter_map(|(_,i)| states[i].take())
        .collect()
}

/// states kept between iterations, sorted by increasing heuristic (never empty)
#[derive(Debug)]
struct Beam {
    /// state with the smallest heuristic
    best: SearchState,
    /// remaining states
    others: Vec<SearchState>,
}

impl Beam {
    /// beam containing a single state
    fn new(state:SearchState) -> Self {
        Self { best: state, others: Vec::new() }
    }

    /// number of states in the beam
    fn len(&self) -> usize { self.others.len() + 1 }

    /** keeps the k states with the smallest heuristic (at least one).
    Ties keep the current order, the current best coming first.
    */
    fn rerank(self, k:usize) -> Self {
        let Beam { mut best, others } = self;
        let mut rest = k_smallest(others, k);
        if rest.first().map_or(false, |s| s.heuristic() < best.heuristic()) {
            std::mem::swap(&mut best, &mut rest[0]);
            let previous_best = rest.remove(0);
            let pos = rest.partition_point(|s| s.heuristic() < previous_best.heuristic());
            rest.insert(pos, previous_best);
        }
        rest.truncate(k.saturating_sub(1));
        Self { best, others: rest }
    }

    /// state with the fewest conflicts, ties broken by the number of colors then by beam order
    fn into_selected(self) -> SearchState {
        self.others.into_iter().fold(self.best, |selected, s| {
            if (s.conflicts(), s.nb_colors()) < (selected.conflicts(), selected.nb_colors()) {
                s
            } else {
                selected
            }
        })
    }
}

/** local beam search for the distance-2 coloring.
    1. build the initial coloring with the degree-first greedy and seed the beam with it
    2. at each iteration, stop if the best state has no conflict,
       otherwise keep the beam_width states with the smallest heuristic
    3. once max_iter iterations are done, return the state with the fewest conflicts
       (break ties by the number of colors)

No neighbor coloring is generated between iterations: the beam is only re-ranked.
Pre-assigned colors stay fixed for the whole run.

parameters:
 - inst: reference to an instance
 - pre_assigned: fixed colors
 - params: beam width and iteration budget
 - observer: if given, called at each iteration with the best state of the beam

# Errors
 - if a pre-assigned vertex is not in the instance or has color 0
*/
pub fn beam_search(
    inst:&dyn ColoringInstance,
    pre_assigned:&PreAssigned,
    params:BeamSearchParameters,
    mut observer:Option<&mut dyn FnMut(&IterationReport)>,
) -> Result<BeamSearchResult> {
    check_pre_assigned(inst, pre_assigned)?;
    let (coloring, counts) = greedy_degree(inst, pre_assigned);
    let conflicts = count_conflicts(inst, &coloring);
    let mut beam = Beam::new(SearchState::new(coloring, conflicts, counts));
    for iteration in 1..=params.max_iter() {
        if let Some(f) = observer.as_deref_mut() {
            f(&IterationReport {
                iteration,
                max_iter: params.max_iter(),
                best: &beam.best,
                beam_size: beam.len(),
            });
        }
        if beam.best.conflicts() == 0 {
            return Ok(BeamSearchResult { best: beam.best, iterations: iteration, termination: Termination::Success });
        }
        beam = beam.rerank(params.beam_width());
    }
    let best = beam.into_selected();
    let termination = if best.conflicts() == 0 { Termination::Success } else { Termination::Exhausted };
    Ok(BeamSearchResult { best, iterations: params.max_iter(), termination })
}

/** colors the instance and returns (coloring, number of colors).

# Errors
 - if the beam width is 0
 - if a pre-assigned vertex is not in the instance or has color 0
*/
pub fn color(
    inst:&dyn ColoringInstance,
    pre_assigned:&PreAssigned,
    beam_width:usize,
    max_iter:usize,
) -> Result<(Coloring, usize)> {
    let params = BeamSearchParameters::new(beam_width, max_iter)?;
    let res = beam_search(inst, pre_assigned, params, None)?;
    let nb_colors = res.best.nb_colors();
    Ok((res.best.into_coloring(), nb_colors))
}
