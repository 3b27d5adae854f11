use alloc::collections::VecDeque;
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use crate::capacity::Capacity;
use crate::error::InvalidGraphError;
use crate::matrix::validate_matrix;

/// An s-t cut: the nodes on the source side, the original edges leaving that side, and the sum of
/// their capacities.
#[derive(Clone, Debug, PartialEq)]
pub struct MinCut<C> {
    source_side: Vec<usize>,
    edges: Vec<(usize, usize)>,
    capacity: C,
}

impl<C: Copy> MinCut<C> {
    pub(crate) fn new(source_side: Vec<usize>, edges: Vec<(usize, usize)>, capacity: C) -> Self {
        Self {
            source_side,
            edges,
            capacity,
        }
    }

    /// Sorted ascending.
    pub fn source_side(&self) -> &[usize] {
        &self.source_side
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn capacity(&self) -> C {
        self.capacity
    }

    pub fn contains(&self, node: usize) -> bool {
        self.source_side.binary_search(&node).is_ok()
    }
}

/// Marks every node reachable from `source` following `successors`.
pub(crate) fn reachable<I>(
    node_count: usize,
    source: usize,
    mut successors: impl FnMut(usize) -> I,
) -> Vec<bool>
where
    I: IntoIterator<Item = usize>,
{
    let mut seen = vec![false; node_count];
    let mut queue = VecDeque::from([source]);
    seen[source] = true;
    while let Some(u) = queue.pop_front() {
        for v in successors(u) {
            if !seen[v] {
                seen[v] = true;
                queue.push_back(v);
            }
        }
    }
    seen
}

/// Computes the cut left behind by a maximum flow: the source side is everything still reachable
/// from `source` in `residual`, the cut edges are the edges of `capacities` leaving it.
///
/// Once no augmenting path remains its capacity equals the flow value.
pub fn min_cut<C: Capacity>(
    capacities: &[Vec<C>],
    residual: &[Vec<C>],
    source: usize,
) -> Result<MinCut<C>, InvalidGraphError> {
    validate_matrix(capacities)?;
    validate_matrix(residual)?;
    let node_count = capacities.len();
    if residual.len() != node_count {
        return Err(InvalidGraphError::NotSquare {
            row: residual.len().min(node_count),
            len: residual.len(),
            expected: node_count,
        });
    }
    if source >= node_count {
        return Err(InvalidGraphError::NodeOutOfRange {
            node: source,
            node_count,
        });
    }

    let side = reachable(node_count, source, |u| {
        residual[u]
            .iter()
            .enumerate()
            .filter(|(_, r)| **r > C::zero())
            .map(|(v, _)| v)
            .collect::<Vec<_>>()
    });

    let mut edges = Vec::new();
    let mut capacity = C::zero();
    for (u, row) in capacities.iter().enumerate().filter(|(u, _)| side[*u]) {
        for (v, &c) in row.iter().enumerate() {
            if !side[v] && c > C::zero() {
                edges.push((u, v));
                capacity = capacity.add_checked(c).ok_or_else(|| {
                    InvalidGraphError::CapacityOverflow(format!("cut capacity from {source}"))
                })?;
            }
        }
    }

    let source_side = (0..node_count).filter(|&u| side[u]).collect();
    Ok(MinCut::new(source_side, edges, capacity))
}
