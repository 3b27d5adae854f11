use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use resflow::{
    check_cut, check_flow, find_augmenting_path, max_flow, min_cut, DenseNetwork,
    InvalidGraphError, MaxFlow, SparseNetwork,
};

fn clrs() -> Vec<Vec<i64>> {
    vec![
        vec![0, 16, 13, 0, 0, 0],
        vec![0, 0, 10, 12, 0, 0],
        vec![0, 4, 0, 0, 14, 0],
        vec![0, 0, 9, 0, 0, 20],
        vec![0, 0, 0, 7, 0, 4],
        vec![0, 0, 0, 0, 0, 0],
    ]
}

fn random_graph(rng: &mut StdRng, n: usize) -> Vec<Vec<i64>> {
    let density = rng.gen_range(0.2..0.8);
    (0..n)
        .map(|u| {
            (0..n)
                .map(|v| {
                    if u != v && rng.gen_bool(density) {
                        rng.gen_range(1..=20)
                    } else {
                        0
                    }
                })
                .collect()
        })
        .collect()
}

/// Smallest cut capacity over every node set containing `source` but not `sink`.
fn brute_force_min_cut(graph: &[Vec<i64>], source: usize, sink: usize) -> i64 {
    let n = graph.len();
    (0u32..1 << n)
        .filter(|&set| set & (1u32 << source) != 0 && set & (1u32 << sink) == 0)
        .map(|set| {
            let inside = |u: usize| set & (1u32 << u) != 0;
            (0..n)
                .filter(|&u| inside(u))
                .flat_map(|u| (0..n).filter(move |&v| !inside(v)).map(move |v| (u, v)))
                .map(|(u, v)| graph[u][v])
                .sum::<i64>()
        })
        .min()
        .unwrap()
}

#[test]
fn test_example_invocation() {
    let mut graph = clrs();
    assert_eq!(max_flow(&mut graph, 0, 5), Ok(23));
}

#[test]
fn test_concrete_scenarios() {
    let mut single = vec![vec![0, 5], vec![0, 0]];
    assert_eq!(max_flow(&mut single, 0, 1), Ok(5));

    let mut disconnected = vec![vec![0, 3, 0], vec![0, 0, 0], vec![0, 0, 0]];
    assert_eq!(max_flow(&mut disconnected, 0, 2), Ok(0));

    assert_eq!(
        max_flow(&mut clrs(), 3, 3),
        Err(InvalidGraphError::SourceIsSink)
    );

    let mut negative = clrs();
    negative[0][1] = -16;
    assert_eq!(
        max_flow(&mut negative, 0, 5),
        Err(InvalidGraphError::NegativeCapacity { from: 0, to: 1 })
    );

    // a 3-node graph asked for sink 100
    let mut short = vec![vec![0, 1, 2], vec![0, 2, 1], vec![0, 1, 0]];
    assert_eq!(
        max_flow(&mut short, 0, 100),
        Err(InvalidGraphError::NodeOutOfRange {
            node: 100,
            node_count: 3
        })
    );

    let mut ragged = vec![vec![0, 1], vec![0, 2, 1]];
    assert!(matches!(
        max_flow(&mut ragged, 0, 1),
        Err(InvalidGraphError::NotSquare { row: 1, .. })
    ));

    let mut nan = vec![vec![0.0, f64::NAN], vec![0.0, 0.0]];
    assert_eq!(
        max_flow(&mut nan, 0, 1),
        Err(InvalidGraphError::NonFiniteCapacity { from: 0, to: 1 })
    );
}

#[test]
fn test_resolving_residual_returns_zero() {
    let mut graph = clrs();
    assert_eq!(max_flow(&mut graph, 0, 5), Ok(23));
    assert_eq!(find_augmenting_path(&graph, 0, 5), Ok(None));
    let residual = graph.clone();
    assert_eq!(max_flow(&mut graph, 0, 5), Ok(0));
    assert_eq!(graph, residual);
}

#[test]
fn test_random_graph_properties() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let n = rng.gen_range(2..=9);
        let capacities = random_graph(&mut rng, n);
        let source = rng.gen_range(0..n);
        let sink = (source + rng.gen_range(1..n)) % n;

        let mut residual = capacities.clone();
        let value = max_flow(&mut residual, source, sink).unwrap();

        assert!(value >= 0);
        assert!(value <= capacities[source].iter().sum::<i64>());
        assert!(value <= capacities.iter().map(|row| row[sink]).sum::<i64>());
        assert!(residual.iter().flatten().all(|&c| c >= 0));
        assert_eq!(value, brute_force_min_cut(&capacities, source, sink));

        let cut = min_cut(&capacities, &residual, source).unwrap();
        assert_eq!(check_cut(&cut, value), Ok(()));
        assert!(cut.contains(source) && !cut.contains(sink));

        assert_eq!(max_flow(&mut residual, source, sink), Ok(0));
    }
}

#[test]
fn test_random_flows_are_conserved() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let n = rng.gen_range(2..=12);
        let capacities = random_graph(&mut rng, n);
        let (source, sink) = (0, n - 1);

        let mut network = DenseNetwork::new(capacities).unwrap();
        let value = network.max_flow(source, sink).unwrap();
        assert_eq!(
            check_flow(&network.edge_flows(), n, source, sink, value),
            Ok(())
        );
        assert_eq!(check_cut(&network.min_cut(source).unwrap(), value), Ok(()));
    }
}

#[test]
fn test_dense_and_sparse_agree() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let n = rng.gen_range(2..=15);
        let capacities = random_graph(&mut rng, n);
        let (source, sink) = (rng.gen_range(0..n), rng.gen_range(0..n));

        let mut dense = DenseNetwork::new(capacities.clone()).unwrap();
        let mut sparse = SparseNetwork::from_matrix(&capacities).unwrap();
        let dense_value = dense.max_flow(source, sink);
        assert_eq!(sparse.max_flow(source, sink), dense_value);
        let Ok(value) = dense_value else { continue };

        assert_eq!(
            check_flow(&sparse.edge_flows(), n, source, sink, value),
            Ok(())
        );
        let dense_cut = dense.min_cut(source).unwrap();
        let sparse_cut = sparse.min_cut(source).unwrap();
        assert_eq!(dense_cut.source_side(), sparse_cut.source_side());
        assert_eq!(sparse_cut.capacity(), value);
    }
}

#[test]
fn test_float_capacities_scale() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..50 {
        let n = rng.gen_range(2..=8);
        let capacities = random_graph(&mut rng, n);
        let mut halved: Vec<Vec<f64>> = capacities
            .iter()
            .map(|row| row.iter().map(|&c| c as f64 * 0.5).collect())
            .collect();

        let value = max_flow(&mut capacities.clone(), 0, n - 1).unwrap();
        assert_eq!(max_flow(&mut halved, 0, n - 1), Ok(value as f64 * 0.5));
    }
}

#[test]
fn test_single_precision_flows_check() {
    let mut rng = StdRng::seed_from_u64(0xf32);
    for _ in 0..200 {
        let n = rng.gen_range(2..=12);
        let tenths: Vec<Vec<f32>> = random_graph(&mut rng, n)
            .iter()
            .map(|row| row.iter().map(|&c| c as f32 * 0.1).collect())
            .collect();

        let mut network = DenseNetwork::new(tenths).unwrap();
        let value = network.max_flow(0, n - 1).unwrap();
        assert_eq!(check_flow(&network.edge_flows(), n, 0, n - 1, value), Ok(()));
        assert_eq!(check_cut(&network.min_cut(0).unwrap(), value), Ok(()));
    }
}

#[test]
fn test_overflowing_capacities_are_rejected() {
    let mut graph = vec![vec![0, u64::MAX, 0], vec![1, 0, u64::MAX], vec![0, 0, 0]];
    let before = graph.clone();
    assert!(matches!(
        max_flow(&mut graph, 0, 2),
        Err(InvalidGraphError::CapacityOverflow(_))
    ));
    assert_eq!(graph, before);

    let mut graph = vec![vec![0, u64::MAX, 0], vec![0, 0, u64::MAX], vec![0, 0, 0]];
    assert_eq!(max_flow(&mut graph, 0, 2), Ok(u64::MAX));
}
