use std::cmp::Ordering;

/// Sentinel value meaning "unreachable" in distance fields.
pub const UNREACHABLE: i32 = i32::MAX;

/// Priority-queue entry: a flat state index and its tentative cost.
///
/// Ordered so that `BinaryHeap` (a max-heap) pops the smallest cost first,
/// and among equal costs the smallest index.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) cost: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
