//! Maximum flow over capacitated directed graphs with the Edmonds-Karp algorithm.
//!
//! Two representations are provided. A dense capacity matrix, solved in place by [`max_flow`] or
//! owned by a [`DenseNetwork`], and an adjacency-list [`SparseNetwork`] for large graphs with few
//! edges. Both implement [`MaxFlow`], which also exposes the minimum cut and the per-edge flows
//! of a solved network; [`check_flow`] and [`check_cut`] verify those results.
#![no_std]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod algo;
pub mod capacity;
pub mod check;
pub mod edge;
pub mod error;
pub mod flow;
pub mod matrix;

pub use crate::algo::edmonds_karp::{
    find_augmenting_path, max_flow, max_flow_with_paths, AugmentingPath,
};
pub use crate::algo::min_cut::{min_cut, MinCut};
pub use crate::algo::residual::SparseNetwork;
pub use crate::algo::{FlowPath, MaxFlow};
pub use crate::capacity::Capacity;
pub use crate::check::{check_cut, check_flow};
pub use crate::edge::{CapacityEdge, RawEdge, SimpleEdge};
pub use crate::error::{CheckError, InvalidGraphError};
pub use crate::flow::{EdgeFlow, SimpleEdgeFlow};
pub use crate::matrix::{validate, validate_matrix, validate_terminals, DenseNetwork};
