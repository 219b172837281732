//! Distance-2 graph coloring: degree-first greedy followed by a local beam search

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// coloring instance base trait, solutions, conflicts and checker
pub mod color;

/// error type shared by the readers and the search
pub mod error;

/// read edge-list instances and pre-assigned colors
pub mod edge_list;

/// helper and utility methods for executables
pub mod util;

/// search algorithms for the distance-2 coloring problem
pub mod search;
