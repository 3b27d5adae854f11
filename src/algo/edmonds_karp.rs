use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use itertools::Itertools;

use crate::algo::FlowPath;
use crate::capacity::Capacity;
use crate::error::InvalidGraphError;
use crate::matrix::validate;

/// A source-to-sink path of positive residual capacity.
#[derive(Clone, Debug, PartialEq)]
pub struct AugmentingPath<C> {
    nodes: Vec<usize>,
    bottleneck: C,
}

impl<C: Copy> AugmentingPath<C> {
    pub(crate) fn new(nodes: Vec<usize>, bottleneck: C) -> Self {
        Self { nodes, bottleneck }
    }

    /// Nodes from source to sink, both included.
    pub fn vertices(&self) -> &[usize] {
        &self.nodes
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.iter().copied().tuple_windows()
    }

    /// The smallest residual capacity along the path, i.e. the flow one augmentation pushes.
    pub fn bottleneck(&self) -> C {
        self.bottleneck
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: Copy> FlowPath for AugmentingPath<C> {
    type Node = usize;
    type Flow = C;
    type Iter = Vec<usize>;

    fn nodes(&self) -> Self::Iter {
        self.nodes.clone()
    }

    fn flow(&self) -> Self::Flow {
        self.bottleneck
    }
}

fn partial_min<C: PartialOrd>(a: C, b: C) -> C {
    if b < a {
        b
    } else {
        a
    }
}

/// Reusable BFS state, so repeated searches over the same matrix don't reallocate.
struct Search {
    parent: Vec<Option<usize>>,
    queue: VecDeque<usize>,
}

impl Search {
    fn new(node_count: usize) -> Self {
        Self {
            parent: vec![None; node_count],
            queue: VecDeque::with_capacity(node_count),
        }
    }

    // Neighbours are scanned in increasing index order, which fixes the path returned when
    // several shortest ones exist.
    fn run<C: Capacity>(
        &mut self,
        graph: &[Vec<C>],
        source: usize,
        sink: usize,
    ) -> Option<AugmentingPath<C>> {
        self.parent.fill(None);
        self.queue.clear();

        self.parent[source] = Some(source);
        self.queue.push_back(source);

        while let Some(u) = self.queue.pop_front() {
            for (v, &residual) in graph[u].iter().enumerate() {
                if self.parent[v].is_none() && residual > C::zero() {
                    self.parent[v] = Some(u);
                    if v == sink {
                        return Some(self.trace(graph, source, sink));
                    }
                    self.queue.push_back(v);
                }
            }
        }
        None
    }

    fn trace<C: Capacity>(
        &self,
        graph: &[Vec<C>],
        source: usize,
        sink: usize,
    ) -> AugmentingPath<C> {
        let mut nodes = vec![sink];
        let mut bottleneck = None;
        let mut v = sink;
        while v != source {
            let Some(u) = self.parent[v] else { break };
            let residual = graph[u][v];
            bottleneck = Some(bottleneck.map_or(residual, |b| partial_min(b, residual)));
            nodes.push(u);
            v = u;
        }
        nodes.reverse();
        AugmentingPath::new(nodes, bottleneck.unwrap_or_else(C::zero))
    }
}

fn augment<C: Capacity>(graph: &mut [Vec<C>], path: &AugmentingPath<C>) {
    let flow = path.bottleneck();
    for (u, v) in path.edges() {
        graph[u][v] -= flow;
        graph[v][u] += flow;
    }
}

fn solve<C: Capacity>(
    graph: &mut [Vec<C>],
    source: usize,
    sink: usize,
    mut on_path: impl FnMut(AugmentingPath<C>),
) -> C {
    let mut search = Search::new(graph.len());
    let mut max_flow = C::zero();
    let mut augmentations = 0usize;

    while let Some(path) = search.run(graph, source, sink) {
        log::trace!("augmenting {:?} by {}", path.vertices(), path.bottleneck());
        augment(graph, &path);
        max_flow += path.bottleneck();
        augmentations += 1;
        on_path(path);
    }

    log::debug!("max flow {source} -> {sink} = {max_flow} after {augmentations} augmentations");
    max_flow
}

/// Computes the maximum flow from `source` to `sink` with the Edmonds-Karp algorithm.
///
/// `graph[u][v]` is the capacity of the edge `u -> v`, zero meaning no edge. The matrix is
/// rewritten in place: on return it holds the residual capacities, so keep a copy if the
/// original capacities are still needed.
///
/// Fails without touching `graph` if the matrix is not square, holds a negative or non-finite
/// capacity, could overflow while solving, or if `source`/`sink` are out of range or equal. An
/// unreachable sink is not an error, the flow is zero.
///
/// # Example
///
/// ```
/// let mut graph = vec![
///     vec![0, 16, 13, 0, 0, 0],
///     vec![0, 0, 10, 12, 0, 0],
///     vec![0, 4, 0, 0, 14, 0],
///     vec![0, 0, 9, 0, 0, 20],
///     vec![0, 0, 0, 7, 0, 4],
///     vec![0, 0, 0, 0, 0, 0],
/// ];
/// assert_eq!(resflow::max_flow(&mut graph, 0, 5), Ok(23));
/// assert_eq!(resflow::max_flow(&mut graph, 0, 5), Ok(0));
/// ```
pub fn max_flow<C: Capacity>(
    graph: &mut [Vec<C>],
    source: usize,
    sink: usize,
) -> Result<C, InvalidGraphError> {
    validate(graph, source, sink)?;
    Ok(solve(graph, source, sink, |_| {}))
}

/// Same as [`max_flow`], also returning the augmenting paths in the order they were applied.
pub fn max_flow_with_paths<C: Capacity>(
    graph: &mut [Vec<C>],
    source: usize,
    sink: usize,
) -> Result<(C, Vec<AugmentingPath<C>>), InvalidGraphError> {
    validate(graph, source, sink)?;
    let mut paths = Vec::new();
    let max_flow = solve(graph, source, sink, |path| paths.push(path));
    Ok((max_flow, paths))
}

/// Finds a shortest path of positive residual capacity from `source` to `sink` by breadth-first
/// search, or `None` if the sink cannot be reached.
pub fn find_augmenting_path<C: Capacity>(
    graph: &[Vec<C>],
    source: usize,
    sink: usize,
) -> Result<Option<AugmentingPath<C>>, InvalidGraphError> {
    validate(graph, source, sink)?;
    Ok(Search::new(graph.len()).run(graph, source, sink))
}
