use std::collections::BinaryHeap;

/// Sentinel cost for cells no route has reached yet.
pub const UNREACHABLE: u32 = u32::MAX;

// ---------------------------------------------------------------------------
// Priority-queue entry
// ---------------------------------------------------------------------------

/// Entry in a best-first open list.
///
/// Ordered by `priority`, then by insertion `seq`. Cells themselves are
/// never compared, so equal priorities pop in insertion order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct QueueEntry {
    pub(crate) priority: u32,
    pub(crate) seq: u64,
    pub(crate) idx: usize,
    /// Cost the entry was pushed with; stale once the cell is relaxed again.
    pub(crate) cost: u32,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest priority, then
        // oldest entry, first.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PriorityFrontier
// ---------------------------------------------------------------------------

/// Open list, membership mirror and cost map shared by A* and Dijkstra.
///
/// Relaxing a cell that is already queued pushes a second entry; the older
/// one is skipped when popped (lazy deletion).
pub(crate) struct PriorityFrontier {
    heap: BinaryHeap<QueueEntry>,
    seq: u64,
    member: Vec<bool>,
    closed: Vec<bool>,
    cost: Vec<u32>,
}

impl PriorityFrontier {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
            member: vec![false; len],
            closed: vec![false; len],
            cost: vec![UNREACHABLE; len],
        }
    }

    /// Best known cost of cell `idx`.
    #[inline]
    pub(crate) fn cost(&self, idx: usize) -> u32 {
        self.cost[idx]
    }

    /// Record `cost` for `idx` and queue it under `priority`. Returns `true`
    /// if the cell was neither queued nor expanded before.
    pub(crate) fn push(&mut self, idx: usize, cost: u32, priority: u32) -> bool {
        self.cost[idx] = cost;
        self.heap.push(QueueEntry {
            priority,
            seq: self.seq,
            idx,
            cost,
        });
        self.seq += 1;
        let fresh = !self.member[idx] && !self.closed[idx];
        self.member[idx] = true;
        fresh
    }

    /// Pop the live entry with the smallest priority, skipping stale ones.
    pub(crate) fn pop(&mut self) -> Option<usize> {
        while let Some(entry) = self.heap.pop() {
            let i = entry.idx;
            if self.closed[i] || entry.cost != self.cost[i] {
                continue;
            }
            self.member[i] = false;
            self.closed[i] = true;
            return Some(i);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_priority_first() {
        let mut f = PriorityFrontier::new(4);
        f.push(0, 5, 5);
        f.push(1, 2, 2);
        f.push(2, 9, 9);
        assert_eq!(f.pop(), Some(1));
        assert_eq!(f.pop(), Some(0));
        assert_eq!(f.pop(), Some(2));
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut f = PriorityFrontier::new(4);
        for i in [3, 1, 2, 0] {
            f.push(i, 1, 7);
        }
        let order: Vec<_> = std::iter::from_fn(|| f.pop()).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }

    #[test]
    fn relaxed_entries_supersede_stale_ones() {
        let mut f = PriorityFrontier::new(3);
        assert!(f.push(0, 6, 6));
        assert!(f.push(1, 4, 4));
        // Cheaper route to 0: not fresh, old entry becomes stale.
        assert!(!f.push(0, 2, 2));
        assert_eq!(f.cost(0), 2);
        assert_eq!(f.pop(), Some(0));
        assert_eq!(f.pop(), Some(1));
        // The stale (cost 6) entry for 0 is skipped.
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn expanded_cells_are_not_fresh() {
        let mut f = PriorityFrontier::new(2);
        f.push(0, 0, 0);
        assert_eq!(f.pop(), Some(0));
        assert!(!f.push(0, 0, 0));
        assert_eq!(f.pop(), None);
    }
}
