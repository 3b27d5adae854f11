use serde::{Deserialize, Serialize};

use crate::capacity::Capacity;
use crate::error::InvalidGraphError;

/// A directed, capacitated edge of a flow network.
pub trait CapacityEdge {
    type Capacity;

    fn from(&self) -> usize;
    fn to(&self) -> usize;
    fn capacity(&self) -> Self::Capacity;
}

#[derive(Clone, Debug, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(
    try_from = "RawEdge<C>",
    bound(deserialize = "C: Capacity + Deserialize<'de>")
)]
pub struct SimpleEdge<C> {
    from: usize,
    to: usize,
    capacity: C,
}

impl<C: Capacity> SimpleEdge<C> {
    pub fn new(from: usize, to: usize, capacity: C) -> Result<Self, InvalidGraphError> {
        if from == to {
            Err(InvalidGraphError::SelfLoop { node: from })
        } else if !capacity.is_finite() {
            Err(InvalidGraphError::NonFiniteCapacity { from, to })
        } else if capacity < C::zero() {
            Err(InvalidGraphError::NegativeCapacity { from, to })
        } else {
            Ok(Self { from, to, capacity })
        }
    }
}

impl<C: Copy> CapacityEdge for SimpleEdge<C> {
    type Capacity = C;

    fn from(&self) -> usize {
        self.from
    }

    fn to(&self) -> usize {
        self.to
    }

    fn capacity(&self) -> Self::Capacity {
        self.capacity
    }
}

/// The unvalidated CSV form of an edge.
#[derive(Clone, Debug, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct RawEdge<C> {
    pub from: usize,
    pub to: usize,
    pub capacity: C,
}

impl<C: Capacity> TryFrom<RawEdge<C>> for SimpleEdge<C> {
    type Error = InvalidGraphError;

    fn try_from(e: RawEdge<C>) -> Result<Self, Self::Error> {
        Self::new(e.from, e.to, e.capacity)
    }
}

impl<C> From<SimpleEdge<C>> for RawEdge<C> {
    fn from(e: SimpleEdge<C>) -> Self {
        Self {
            from: e.from,
            to: e.to,
            capacity: e.capacity,
        }
    }
}
