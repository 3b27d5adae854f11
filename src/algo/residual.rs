use alloc::collections::VecDeque;
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use core::iter;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::{EdgeRef, VisitMap, Visitable};

use crate::algo::edmonds_karp::AugmentingPath;
use crate::algo::min_cut::{reachable, MinCut};
use crate::algo::MaxFlow;
use crate::capacity::{checked_sum, Capacity};
use crate::edge::CapacityEdge;
use crate::error::InvalidGraphError;
use crate::flow::{EdgeFlow, SimpleEdgeFlow};
use crate::matrix::{validate_matrix, validate_terminals};

/// An adjacency-list flow network for large sparse graphs.
///
/// Every edge is stored as two arcs with consecutive indices: the forward arc starts with the
/// edge's capacity, the reverse arc with zero. The partner of arc `e` is therefore `e ^ 1` and a
/// push along one arc credits the other in O(1).
#[derive(Clone, Debug)]
pub struct SparseNetwork<C> {
    // arc weights are residual capacities
    graph: DiGraph<(), C>,
    // original capacity of edge `k`, whose forward arc is `2k`
    capacities: Vec<C>,
    paths: Vec<AugmentingPath<C>>,
}

fn partner(e: EdgeIndex) -> EdgeIndex {
    EdgeIndex::new(e.index() ^ 1)
}

impl<C: Capacity> SparseNetwork<C> {
    pub fn with_nodes(node_count: usize) -> Self {
        let mut graph = DiGraph::with_capacity(node_count, 0);
        for _ in 0..node_count {
            graph.add_node(());
        }
        Self {
            graph,
            capacities: Vec::new(),
            paths: Vec::new(),
        }
    }

    pub fn from_edges<E>(
        node_count: usize,
        edges: impl IntoIterator<Item = E>,
    ) -> Result<Self, InvalidGraphError>
    where
        E: CapacityEdge<Capacity = C>,
    {
        edges
            .into_iter()
            .try_fold(Self::with_nodes(node_count), |mut acc, e| {
                acc.add_edge(e.from(), e.to(), e.capacity())?;
                Ok(acc)
            })
    }

    /// Keeps the positive off-diagonal entries of a capacity matrix.
    pub fn from_matrix(graph: &[Vec<C>]) -> Result<Self, InvalidGraphError> {
        validate_matrix(graph)?;
        let mut network = Self::with_nodes(graph.len());
        for (from, row) in graph.iter().enumerate() {
            for (to, &capacity) in row.iter().enumerate() {
                if from != to && capacity > C::zero() {
                    network.add_edge(from, to, capacity)?;
                }
            }
        }
        Ok(network)
    }

    fn check_node(&self, node: usize) -> Result<NodeIndex, InvalidGraphError> {
        let node_count = self.graph.node_count();
        if node < node_count {
            Ok(NodeIndex::new(node))
        } else {
            Err(InvalidGraphError::NodeOutOfRange { node, node_count })
        }
    }

    pub fn add_edge(
        &mut self,
        from: usize,
        to: usize,
        capacity: C,
    ) -> Result<(), InvalidGraphError> {
        let (u, v) = (self.check_node(from)?, self.check_node(to)?);
        if from == to {
            return Err(InvalidGraphError::SelfLoop { node: from });
        }
        if !capacity.is_finite() {
            return Err(InvalidGraphError::NonFiniteCapacity { from, to });
        }
        if capacity < C::zero() {
            return Err(InvalidGraphError::NegativeCapacity { from, to });
        }
        // augmenting never changes the total over all arcs between a node pair
        let pair = self
            .graph
            .edges(u)
            .filter(|e| e.target() == v)
            .chain(self.graph.edges(v).filter(|e| e.target() == u))
            .map(|e| *e.weight());
        checked_sum(pair.chain(iter::once(capacity))).ok_or_else(|| {
            InvalidGraphError::CapacityOverflow(format!("edges {from} <-> {to}"))
        })?;

        self.graph.add_edge(u, v, capacity);
        self.graph.add_edge(v, u, C::zero());
        self.capacities.push(capacity);
        Ok(())
    }

    pub fn edge_count(&self) -> usize {
        self.capacities.len()
    }

    /// Total residual capacity over all arcs `from -> to`.
    pub fn residual(&self, from: usize, to: usize) -> Result<C, InvalidGraphError> {
        let (u, v) = (self.check_node(from)?, self.check_node(to)?);
        Ok(self
            .graph
            .edges(u)
            .filter(|e| e.target() == v)
            .map(|e| *e.weight())
            .sum())
    }

    fn find_augmenting_path(
        &self,
        source: NodeIndex,
        sink: NodeIndex,
        pred: &mut [Option<EdgeIndex>],
        queue: &mut VecDeque<NodeIndex>,
    ) -> Option<(Vec<EdgeIndex>, C)> {
        pred.fill(None);
        queue.clear();

        let mut discovered = self.graph.visit_map();
        discovered.visit(source);
        queue.push_back(source);

        'bfs: while let Some(u) = queue.pop_front() {
            for e in self.graph.edges(u) {
                let v = e.target();
                if *e.weight() > C::zero() && discovered.visit(v) {
                    pred[v.index()] = Some(e.id());
                    if v == sink {
                        break 'bfs;
                    }
                    queue.push_back(v);
                }
            }
        }

        let mut arcs = Vec::new();
        let mut bottleneck: Option<C> = None;
        let mut v = sink;
        while let Some(e) = pred[v.index()] {
            let residual = self.graph[e];
            bottleneck = Some(match bottleneck {
                Some(b) if b <= residual => b,
                _ => residual,
            });
            arcs.push(e);
            // the reverse arc of `e` points back to its tail
            v = self.graph.edge_endpoints(e)?.0;
        }
        arcs.reverse();
        bottleneck.map(|b| (arcs, b))
    }

    fn path_nodes(&self, source: NodeIndex, arcs: &[EdgeIndex]) -> Vec<usize> {
        let mut nodes = vec![source.index()];
        nodes.extend(
            arcs.iter()
                .filter_map(|&e| self.graph.edge_endpoints(e))
                .map(|(_, v)| v.index()),
        );
        nodes
    }
}

impl<C: Capacity> MaxFlow for SparseNetwork<C> {
    type Capacity = C;
    type Error = InvalidGraphError;

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn max_flow(&mut self, source: usize, sink: usize) -> Result<C, Self::Error> {
        self.paths.clear();
        validate_terminals(self.graph.node_count(), source, sink)?;
        let (s, t) = (NodeIndex::new(source), NodeIndex::new(sink));
        checked_sum(self.graph.edges(s).map(|e| *e.weight())).ok_or_else(|| {
            InvalidGraphError::CapacityOverflow(format!("outgoing capacity of source {source}"))
        })?;

        let mut pred = vec![None; self.graph.node_count()];
        let mut queue = VecDeque::new();
        let mut max_flow = C::zero();

        while let Some((arcs, flow)) = self.find_augmenting_path(s, t, &mut pred, &mut queue) {
            for &e in &arcs {
                self.graph[e] -= flow;
                self.graph[partner(e)] += flow;
            }
            let path = AugmentingPath::new(self.path_nodes(s, &arcs), flow);
            log::trace!("augmenting {:?} by {}", path.vertices(), flow);
            max_flow += flow;
            self.paths.push(path);
        }

        log::debug!(
            "max flow {source} -> {sink} = {max_flow} after {} augmentations over {} edges",
            self.paths.len(),
            self.edge_count()
        );
        Ok(max_flow)
    }

    fn augmenting_paths(&self) -> &[AugmentingPath<C>] {
        &self.paths
    }

    fn min_cut(&self, source: usize) -> Result<MinCut<C>, Self::Error> {
        let s = self.check_node(source)?;
        let side = reachable(self.graph.node_count(), s.index(), |u| {
            self.graph
                .edges(NodeIndex::new(u))
                .filter(|e| *e.weight() > C::zero())
                .map(|e| e.target().index())
                .collect::<Vec<_>>()
        });

        let mut edges = Vec::new();
        let mut capacity = C::zero();
        for (e, &c) in self.graph.edge_references().step_by(2).zip(&self.capacities) {
            let (u, v) = (e.source().index(), e.target().index());
            if side[u] && !side[v] && c > C::zero() {
                edges.push((u, v));
                capacity = capacity.add_checked(c).ok_or_else(|| {
                    InvalidGraphError::CapacityOverflow(format!("cut capacity from {source}"))
                })?;
            }
        }

        let source_side = (0..self.graph.node_count()).filter(|&u| side[u]).collect();
        Ok(MinCut::new(source_side, edges, capacity))
    }

    fn edge_flows(&self) -> Vec<SimpleEdgeFlow<C>> {
        self.graph
            .edge_references()
            .step_by(2)
            .zip(&self.capacities)
            .map(|(e, &capacity)| {
                SimpleEdgeFlow::new(
                    e.source().index(),
                    e.target().index(),
                    capacity,
                    capacity - *e.weight(),
                )
            })
            .collect()
    }
}
