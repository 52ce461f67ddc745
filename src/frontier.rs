use crate::grid::CellId;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// A cell waiting in the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    priority: u32,
    sequence: u64,
    cell: CellId,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .priority
            .cmp(&self.priority)
            // Equal priorities: earliest insertion wins
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Priority queue of cells awaiting expansion, paired with a pending set.
///
/// The heap cannot answer "is this cell already queued?" cheaply, so the
/// set shadows it. Both are updated together on every push and pop.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    pending: HashSet<CellId>,
    next_sequence: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `cell` with `priority`. Does nothing and returns false if the
    /// cell is already pending; its original entry keeps its place.
    pub fn push(&mut self, cell: CellId, priority: u32) -> bool {
        if !self.pending.insert(cell) {
            return false;
        }
        self.heap.push(FrontierEntry {
            priority,
            sequence: self.next_sequence,
            cell,
        });
        self.next_sequence += 1;
        true
    }

    /// Remove the lowest-priority cell (ties: first inserted)
    pub fn pop(&mut self) -> Option<CellId> {
        let entry = self.heap.pop()?;
        self.pending.remove(&entry.cell);
        Some(entry.cell)
    }

    pub fn contains(&self, cell: &CellId) -> bool {
        self.pending.contains(cell)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
