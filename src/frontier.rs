use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// An entry scheduled on a priority frontier. Entries refer to nodes by
/// their index in the run's discovery map rather than by coordinate.
///
/// The heap orders by smallest `priority` first; equal priorities pop in
/// insertion order via the monotonically increasing `seq`, which makes
/// equal-score expansion deterministic.
#[derive(Debug)]
pub(crate) struct OpenEntry {
    pub priority: i32,
    pub seq: u64,
    pub index: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: invert the priority comparison, then
        // favour the earlier-inserted entry on ties.
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            ord => ord,
        }
    }
}

/// Ordered multiset of discovered-but-unexpanded nodes. The variant fixes
/// the extraction discipline: FIFO for breadth-first, LIFO for depth-first
/// and a min-priority heap for the scored strategies.
#[derive(Debug)]
pub(crate) enum Frontier {
    Queue(VecDeque<usize>),
    Stack(Vec<usize>),
    Heap { heap: BinaryHeap<OpenEntry>, next_seq: u64 },
}

impl Frontier {
    pub fn fifo() -> Frontier {
        Frontier::Queue(VecDeque::new())
    }

    pub fn lifo() -> Frontier {
        Frontier::Stack(Vec::new())
    }

    pub fn priority() -> Frontier {
        Frontier::Heap {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Schedules the node at `index`. `priority` is ignored by the
    /// unscored disciplines.
    pub fn push(&mut self, index: usize, priority: i32) {
        match self {
            Frontier::Queue(queue) => queue.push_back(index),
            Frontier::Stack(stack) => stack.push(index),
            Frontier::Heap { heap, next_seq } => {
                heap.push(OpenEntry {
                    priority,
                    seq: *next_seq,
                    index,
                });
                *next_seq += 1;
            }
        }
    }

    /// Extracts the best node per the discipline, or [None] when exhausted.
    /// Exhaustion is detected by this returning [None]; the engine keeps no
    /// separate emptiness query.
    pub fn pop(&mut self) -> Option<usize> {
        match self {
            Frontier::Queue(queue) => queue.pop_front(),
            Frontier::Stack(stack) => stack.pop(),
            Frontier::Heap { heap, .. } => heap.pop().map(|entry| entry.index),
        }
    }
}
