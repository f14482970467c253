//! The ordered open/closed problem sets driving the dynamic program.

use std::collections::{BTreeSet, BinaryHeap};

use crate::dynamic::DynamicProblem;
use crate::fundament::Fundament;
use crate::signature::Signature;

/// Best-first expansion of [`DynamicProblem`]s, deduplicated by
/// dominance: pushing a problem whose signature is dominated by one
/// already seen is a no-op.
#[derive(Default)]
pub struct ProblemQueue {
    open: BinaryHeap<DynamicProblem>,
    /// Signatures of every problem ever pushed, ordered so that entries
    /// sharing a (depth, head) pair sit contiguously and sorted further
    /// by blocked-cell count then raw mask — see [`Signature::order_key`].
    closed: BTreeSet<Signature>,
}

impl ProblemQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics if the queue is empty; callers must check [`Self::is_empty`] first.
    #[must_use]
    pub fn top(&self) -> &DynamicProblem {
        self.open.peek().expect("ProblemQueue::top called on an empty queue")
    }

    /// Push `problem` unless a previously pushed, equally-or-more
    /// general problem (same depth and head, a subset of blocked cells)
    /// has already been seen.
    pub fn push(&mut self, problem: DynamicProblem) {
        let signature = problem.signature();

        let mut lower = signature;
        lower.fundament = Fundament::from_mask(0);
        let mut upper = signature;
        upper.fundament = Fundament::from_mask(u32::MAX);

        let dominated = self
            .closed
            .range(lower..=upper)
            .any(|seen| seen.dominates(&signature));
        if dominated {
            return;
        }

        self.open.push(problem);
        self.closed.insert(signature);
    }

    pub fn pop(&mut self) {
        self.open.pop();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Disk, DiskGraph, EmbedOrder};
    use std::rc::Rc;

    fn root(constructive: bool) -> DynamicProblem {
        let graph = Rc::new(DiskGraph::new(vec![Disk::new(0, -1, 0), Disk::new(1, 0, 0)]));
        DynamicProblem::root(graph, EmbedOrder::DepthFirst, constructive)
    }

    #[test]
    fn fresh_queue_is_empty() {
        let q = ProblemQueue::new();
        assert!(q.is_empty());
    }

    #[test]
    fn push_pop_roundtrip() {
        let mut q = ProblemQueue::new();
        q.push(root(true));
        assert!(!q.is_empty());
        let depth = q.top().depth();
        assert_eq!(depth, 0);
        q.pop();
        assert!(q.is_empty());
    }

    #[test]
    fn pushing_an_equal_signature_twice_only_keeps_one() {
        let mut q = ProblemQueue::new();
        q.push(root(true));
        q.push(root(true));
        q.pop();
        assert!(q.is_empty());
    }
}
