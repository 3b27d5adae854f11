use alloc::string::String;

use displaydoc::Display;

/// Structural problems with a capacity graph or its terminals.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum InvalidGraphError {
    /// Capacity matrix is not square: row {row} has {len} entries, expected {expected}
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// Negative capacity on edge {from} -> {to}
    NegativeCapacity { from: usize, to: usize },
    /// Non-finite capacity on edge {from} -> {to}
    NonFiniteCapacity { from: usize, to: usize },
    /// Node {node} is out of range for a graph with {node_count} nodes
    NodeOutOfRange { node: usize, node_count: usize },
    /// Source and sink must be distinct nodes
    SourceIsSink,
    /// Invalid edge where both endpoints are node {node}
    SelfLoop { node: usize },
    /// Capacities too large to be represented while solving: {0}
    CapacityOverflow(String),
}

impl core::error::Error for InvalidGraphError {}

/// A computed flow that does not satisfy the max-flow constraints.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum CheckError {
    /// Flow {flow} on edge {from} -> {to} exceeds its capacity {capacity}
    CapacityExceeded {
        from: usize,
        to: usize,
        flow: String,
        capacity: String,
    },
    /// Flow references node {node} outside a graph with {node_count} nodes
    UnknownNode { node: usize, node_count: usize },
    /// Negative flow on edge {from} -> {to}
    NegativeFlow { from: usize, to: usize },
    /// Flow is not conserved at node {node}: inflow {inflow}, outflow {outflow}
    ConservationViolated {
        node: usize,
        inflow: String,
        outflow: String,
    },
    /// Flow value {value} does not match the net flow {net} at node {node}
    ValueMismatch {
        node: usize,
        value: String,
        net: String,
    },
    /// Flow value {value} does not match the minimum cut capacity {cut}
    CutMismatch { value: String, cut: String },
}

impl core::error::Error for CheckError {}
