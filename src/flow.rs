use serde::{Deserialize, Serialize};

/// An edge of the original network annotated with the flow routed through it.
pub trait EdgeFlow {
    type Capacity;

    fn new(from: usize, to: usize, capacity: Self::Capacity, flow: Self::Capacity) -> Self;
    fn from(&self) -> usize;
    fn to(&self) -> usize;
    fn capacity(&self) -> Self::Capacity;
    fn flow(&self) -> Self::Capacity;
}

#[derive(Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct SimpleEdgeFlow<C> {
    from: usize,
    to: usize,
    capacity: C,
    flow: C,
}

impl<C: Copy> EdgeFlow for SimpleEdgeFlow<C> {
    type Capacity = C;

    fn new(from: usize, to: usize, capacity: C, flow: C) -> Self {
        Self {
            from,
            to,
            capacity,
            flow,
        }
    }

    fn from(&self) -> usize {
        self.from
    }

    fn to(&self) -> usize {
        self.to
    }

    fn capacity(&self) -> C {
        self.capacity
    }

    fn flow(&self) -> C {
        self.flow
    }
}
