use alloc::format;
use alloc::string::ToString;
use alloc::vec;

use num_traits::Zero;

use crate::algo::min_cut::MinCut;
use crate::capacity::Capacity;
use crate::error::CheckError;
use crate::flow::EdgeFlow;

/// Verifies that `flows` is a feasible flow of the given `value` from `source` to `sink`:
/// every edge carries between zero and its capacity, flow is conserved at every other node, the
/// source emits `value` net and the sink absorbs it.
///
/// Integer capacities compare exactly, floats within a small relative tolerance.
pub fn check_flow<F>(
    flows: &[F],
    node_count: usize,
    source: usize,
    sink: usize,
    value: F::Capacity,
) -> Result<(), CheckError>
where
    F: EdgeFlow,
    F::Capacity: Capacity,
{
    let zero: F::Capacity = Zero::zero();
    let mut inflow = vec![zero; node_count];
    let mut outflow = vec![zero; node_count];

    for f in flows {
        let (from, to, flow, capacity) = (f.from(), f.to(), f.flow(), f.capacity());
        for node in [from, to] {
            if node >= node_count {
                return Err(CheckError::UnknownNode { node, node_count });
            }
        }
        if flow < zero {
            return Err(CheckError::NegativeFlow { from, to });
        }
        if flow > capacity && !flow.within_tolerance(capacity) {
            return Err(CheckError::CapacityExceeded {
                from,
                to,
                flow: flow.to_string(),
                capacity: capacity.to_string(),
            });
        }
        outflow[from] += flow;
        inflow[to] += flow;
    }

    for node in (0..node_count).filter(|&n| n != source && n != sink) {
        if !inflow[node].within_tolerance(outflow[node]) {
            return Err(CheckError::ConservationViolated {
                node,
                inflow: inflow[node].to_string(),
                outflow: outflow[node].to_string(),
            });
        }
    }

    // compared as sums so that unsigned capacities never underflow
    for (node, emitted, absorbed) in [
        (source, outflow.get(source), inflow.get(source)),
        (sink, inflow.get(sink), outflow.get(sink)),
    ] {
        let (Some(&emitted), Some(&absorbed)) = (emitted, absorbed) else {
            return Err(CheckError::UnknownNode { node, node_count });
        };
        if !emitted.within_tolerance(value + absorbed) {
            return Err(CheckError::ValueMismatch {
                node,
                value: value.to_string(),
                net: format!("{emitted} - {absorbed}"),
            });
        }
    }

    log::debug!("flow of {value} checked over {} edges", flows.len());
    Ok(())
}

/// Verifies that a cut's capacity matches the flow value, which certifies the flow as maximum.
pub fn check_cut<C: Capacity>(cut: &MinCut<C>, value: C) -> Result<(), CheckError> {
    if cut.capacity().within_tolerance(value) {
        Ok(())
    } else {
        Err(CheckError::CutMismatch {
            value: value.to_string(),
            cut: cut.capacity().to_string(),
        })
    }
}
