//! Candidate edges ranked by collapse cost
//!
//! Each unordered pair from the adjacency index enters the queue exactly
//! once, canonicalized to `(min, max)`. Equal costs resolve by insertion
//! order, which follows adjacency edge order and is therefore deterministic
//! for a given mesh. The queue is immutable once built and rebuilt wholesale
//! after every collapse.

use priority_queue::PriorityQueue;
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::adjacency::AdjacencyIndex;

/// A candidate collapse: canonical pair, cost, and insertion rank
#[derive(Debug, Clone)]
pub struct PairCandidate {
    pub v1: usize,
    pub v2: usize,
    pub cost: f64,
    seq: usize,
}

impl PartialEq for PairCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal && self.seq == other.seq
    }
}
impl Eq for PairCandidate {}

impl PartialOrd for PairCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PairCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-queue: smallest cost wins, earliest insertion breaks ties
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// All candidate edges of the current mesh, ranked ascending by cost
pub struct PairQueue {
    queue: PriorityQueue<(usize, usize), PairCandidate>,
}

impl PairQueue {
    /// Rank every adjacency edge with the supplied cost function.
    ///
    /// `cost` receives canonical `(v1, v2)` with `v1 < v2`.
    pub fn build<F>(adjacency: &AdjacencyIndex, mut cost: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut queue = PriorityQueue::new();
        let mut seen_edges: HashSet<(usize, usize)> = HashSet::new();
        let mut seq = 0usize;

        for &(a, b) in adjacency.edges() {
            let key = (a.min(b), a.max(b));
            if !seen_edges.insert(key) {
                continue;
            }
            let c = cost(key.0, key.1);
            queue.push(
                key,
                PairCandidate {
                    v1: key.0,
                    v2: key.1,
                    cost: c,
                    seq,
                },
            );
            seq += 1;
        }

        Self { queue }
    }

    /// Cheapest candidate, if any
    pub fn peek_min(&self) -> Option<(usize, usize, f64)> {
        self.queue.peek().map(|(_, c)| (c.v1, c.v2, c.cost))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Snapshot of all candidates in rank order, for diagnostics and tests
    pub fn ranked_pairs(&self) -> Vec<(usize, usize, f64)> {
        let mut entries: Vec<&PairCandidate> = self.queue.iter().map(|(_, c)| c).collect();
        entries.sort_by(|x, y| x.cost.total_cmp(&y.cost).then_with(|| x.seq.cmp(&y.seq)));
        entries.iter().map(|c| (c.v1, c.v2, c.cost)).collect()
    }
}
