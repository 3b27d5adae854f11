use alloc::vec::Vec;
use core::fmt::Debug;

pub mod edmonds_karp;
pub mod min_cut;
pub mod residual;

use crate::algo::edmonds_karp::AugmentingPath;
use crate::algo::min_cut::MinCut;
use crate::flow::SimpleEdgeFlow;

pub trait FlowPath {
    type Node;
    type Flow;
    type Iter: IntoIterator<Item = Self::Node>;

    fn nodes(&self) -> Self::Iter;
    fn flow(&self) -> Self::Flow;
}

/// A flow network that can be solved for a maximum flow in place.
pub trait MaxFlow {
    type Capacity;
    type Error: Debug;

    fn node_count(&self) -> usize;

    /// Pushes as much flow as possible from `source` to `sink` and returns the amount pushed.
    /// The network keeps the resulting residual capacities, so solving again with the same
    /// terminals returns zero.
    fn max_flow(&mut self, source: usize, sink: usize) -> Result<Self::Capacity, Self::Error>;

    /// The augmenting paths applied by the latest `max_flow` call, in order.
    fn augmenting_paths(&self) -> &[AugmentingPath<Self::Capacity>];

    /// The minimum cut induced by the current residual capacities.
    fn min_cut(&self, source: usize) -> Result<MinCut<Self::Capacity>, Self::Error>;

    /// Every edge of the original network with the flow currently routed through it.
    fn edge_flows(&self) -> Vec<SimpleEdgeFlow<Self::Capacity>>;
}
