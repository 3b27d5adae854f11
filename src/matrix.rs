use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use crate::algo::edmonds_karp::{self, AugmentingPath};
use crate::algo::min_cut::{self, MinCut};
use crate::algo::MaxFlow;
use crate::capacity::{checked_sum, Capacity};
use crate::edge::CapacityEdge;
use crate::error::InvalidGraphError;
use crate::flow::{EdgeFlow, SimpleEdgeFlow};

/// Checks that `graph` is square, that every entry is finite and non-negative, and that no
/// augmentation can overflow the capacity type.
///
/// Augmenting keeps `graph[u][v] + graph[v][u]` constant for every pair, so it is enough to
/// check those sums up front.
pub fn validate_matrix<C: Capacity>(graph: &[Vec<C>]) -> Result<(), InvalidGraphError> {
    let n = graph.len();
    for (from, row) in graph.iter().enumerate() {
        if row.len() != n {
            return Err(InvalidGraphError::NotSquare {
                row: from,
                len: row.len(),
                expected: n,
            });
        }
        for (to, &capacity) in row.iter().enumerate() {
            if !capacity.is_finite() {
                return Err(InvalidGraphError::NonFiniteCapacity { from, to });
            }
            if capacity < C::zero() {
                return Err(InvalidGraphError::NegativeCapacity { from, to });
            }
        }
    }

    for u in 0..n {
        for v in u + 1..n {
            graph[u][v].add_checked(graph[v][u]).ok_or_else(|| {
                InvalidGraphError::CapacityOverflow(format!("edges {u} <-> {v}"))
            })?;
        }
    }
    Ok(())
}

pub fn validate_terminals(
    node_count: usize,
    source: usize,
    sink: usize,
) -> Result<(), InvalidGraphError> {
    for node in [source, sink] {
        if node >= node_count {
            return Err(InvalidGraphError::NodeOutOfRange { node, node_count });
        }
    }
    if source == sink {
        return Err(InvalidGraphError::SourceIsSink);
    }
    Ok(())
}

/// Full validation of a solve request. Nothing is mutated before this passes.
pub fn validate<C: Capacity>(
    graph: &[Vec<C>],
    source: usize,
    sink: usize,
) -> Result<(), InvalidGraphError> {
    validate_matrix(graph)?;
    validate_terminals(graph.len(), source, sink)?;

    // the accumulated flow never exceeds what can leave the source
    checked_sum(graph[source].iter().copied()).ok_or_else(|| {
        InvalidGraphError::CapacityOverflow(format!("outgoing capacity of source {source}"))
    })?;
    Ok(())
}

/// A dense flow network keeping both the original capacities and the residual matrix.
#[derive(Clone, Debug)]
pub struct DenseNetwork<C> {
    capacities: Vec<Vec<C>>,
    residual: Vec<Vec<C>>,
    paths: Vec<AugmentingPath<C>>,
}

impl<C: Capacity> DenseNetwork<C> {
    pub fn new(capacities: Vec<Vec<C>>) -> Result<Self, InvalidGraphError> {
        validate_matrix(&capacities)?;
        Ok(Self {
            residual: capacities.clone(),
            capacities,
            paths: Vec::new(),
        })
    }

    /// Builds the matrix from an edge list; parallel edges are merged into one cell.
    pub fn from_edges<E>(
        node_count: usize,
        edges: impl IntoIterator<Item = E>,
    ) -> Result<Self, InvalidGraphError>
    where
        E: CapacityEdge<Capacity = C>,
    {
        let mut capacities = vec![vec![C::zero(); node_count]; node_count];
        for e in edges {
            let (from, to) = (e.from(), e.to());
            for node in [from, to] {
                if node >= node_count {
                    return Err(InvalidGraphError::NodeOutOfRange { node, node_count });
                }
            }
            let cell = &mut capacities[from][to];
            *cell = cell.add_checked(e.capacity()).ok_or_else(|| {
                InvalidGraphError::CapacityOverflow(format!("parallel edges {from} -> {to}"))
            })?;
        }
        Self::new(capacities)
    }

    pub fn capacities(&self) -> &[Vec<C>] {
        &self.capacities
    }

    pub fn residual(&self) -> &[Vec<C>] {
        &self.residual
    }

    pub fn into_residual(self) -> Vec<Vec<C>> {
        self.residual
    }

    /// Discards any flow pushed so far.
    pub fn reset(&mut self) {
        self.residual.clone_from(&self.capacities);
        self.paths.clear();
    }
}

impl<C: Capacity> MaxFlow for DenseNetwork<C> {
    type Capacity = C;
    type Error = InvalidGraphError;

    fn node_count(&self) -> usize {
        self.capacities.len()
    }

    fn max_flow(&mut self, source: usize, sink: usize) -> Result<C, Self::Error> {
        self.paths.clear();
        let (value, paths) = edmonds_karp::max_flow_with_paths(&mut self.residual, source, sink)?;
        self.paths = paths;
        Ok(value)
    }

    fn augmenting_paths(&self) -> &[AugmentingPath<C>] {
        &self.paths
    }

    fn min_cut(&self, source: usize) -> Result<MinCut<C>, Self::Error> {
        min_cut::min_cut(&self.capacities, &self.residual, source)
    }

    fn edge_flows(&self) -> Vec<SimpleEdgeFlow<C>> {
        let mut flows = Vec::new();
        for (from, (caps, res)) in self.capacities.iter().zip(&self.residual).enumerate() {
            for (to, (&capacity, &residual)) in caps.iter().zip(res).enumerate() {
                if from == to || capacity <= C::zero() {
                    continue;
                }
                // the residual of an antiparallel pair absorbs flow in either direction, only the
                // net surplus travels along this edge
                let flow = if capacity > residual {
                    capacity - residual
                } else {
                    C::zero()
                };
                flows.push(SimpleEdgeFlow::new(from, to, capacity, flow));
            }
        }
        flows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::SimpleEdge;

    #[test]
    fn test_validate_not_square() {
        let graph = vec![vec![0, 1, 2], vec![0, 0], vec![0, 0, 0]];
        assert_eq!(
            validate_matrix(&graph),
            Err(InvalidGraphError::NotSquare {
                row: 1,
                len: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn test_validate_entries() {
        assert_eq!(
            validate_matrix(&[vec![0, -1], vec![0, 0]]),
            Err(InvalidGraphError::NegativeCapacity { from: 0, to: 1 })
        );
        assert_eq!(
            validate_matrix(&[vec![0.0, 1.0], vec![f64::INFINITY, 0.0]]),
            Err(InvalidGraphError::NonFiniteCapacity { from: 1, to: 0 })
        );
    }

    #[test]
    fn test_validate_pair_overflow() {
        let graph = vec![vec![0, i32::MAX], vec![1, 0]];
        assert!(matches!(
            validate_matrix(&graph),
            Err(InvalidGraphError::CapacityOverflow(_))
        ));
    }

    #[test]
    fn test_validate_source_outflow_overflow() {
        let graph = vec![
            vec![0, u32::MAX, 1],
            vec![0, 0, 0],
            vec![0, 0, 0],
        ];
        assert!(validate_matrix(&graph).is_ok());
        assert!(matches!(
            validate(&graph, 0, 2),
            Err(InvalidGraphError::CapacityOverflow(_))
        ));
        assert!(validate(&graph, 1, 2).is_ok());
    }

    #[test]
    fn test_validate_terminals() {
        assert_eq!(
            validate_terminals(3, 0, 3),
            Err(InvalidGraphError::NodeOutOfRange {
                node: 3,
                node_count: 3
            })
        );
        assert_eq!(
            validate_terminals(3, 1, 1),
            Err(InvalidGraphError::SourceIsSink)
        );
        assert_eq!(
            validate_terminals(0, 0, 1),
            Err(InvalidGraphError::NodeOutOfRange {
                node: 0,
                node_count: 0
            })
        );
        assert!(validate_terminals(2, 1, 0).is_ok());
    }

    #[test]
    fn test_from_edges_merges_parallel_edges() {
        let edges = vec![
            SimpleEdge::new(0, 1, 3).unwrap(),
            SimpleEdge::new(0, 1, 4).unwrap(),
            SimpleEdge::new(1, 2, 5).unwrap(),
        ];
        let mut network = DenseNetwork::from_edges(3, edges).unwrap();
        assert_eq!(network.capacities()[0][1], 7);
        assert_eq!(network.max_flow(0, 2), Ok(5));
    }

    #[test]
    fn test_from_edges_out_of_range() {
        let edges = vec![SimpleEdge::new(0, 5, 3).unwrap()];
        assert_eq!(
            DenseNetwork::from_edges(3, edges).unwrap_err(),
            InvalidGraphError::NodeOutOfRange {
                node: 5,
                node_count: 3
            }
        );
    }

    #[test]
    fn test_edge_flows_antiparallel() {
        let mut network = DenseNetwork::new(vec![
            vec![0, 4, 0],
            vec![2, 0, 3],
            vec![0, 0, 0],
        ])
        .unwrap();
        assert_eq!(network.max_flow(0, 2), Ok(3));

        let flows = network.edge_flows();
        assert_eq!(
            flows,
            vec![
                SimpleEdgeFlow::new(0, 1, 4, 3),
                SimpleEdgeFlow::new(1, 0, 2, 0),
                SimpleEdgeFlow::new(1, 2, 3, 3),
            ]
        );
    }

    #[test]
    fn test_reset_restores_capacities() {
        let mut network = DenseNetwork::new(vec![vec![0, 5], vec![0, 0]]).unwrap();
        assert_eq!(network.max_flow(0, 1), Ok(5));
        assert_eq!(network.max_flow(0, 1), Ok(0));
        assert!(network.augmenting_paths().is_empty());

        network.reset();
        assert_eq!(network.residual(), network.capacities());
        assert_eq!(network.max_flow(0, 1), Ok(5));
        assert_eq!(network.augmenting_paths().len(), 1);
        assert_eq!(network.into_residual(), vec![vec![0, 0], vec![5, 0]]);
    }

    #[test]
    fn test_failed_solve_clears_paths() {
        let mut network = DenseNetwork::new(vec![vec![0, 5], vec![0, 0]]).unwrap();
        assert_eq!(network.max_flow(0, 1), Ok(5));
        assert_eq!(network.augmenting_paths().len(), 1);
        assert_eq!(network.max_flow(1, 1), Err(InvalidGraphError::SourceIsSink));
        assert!(network.augmenting_paths().is_empty());
    }
}
