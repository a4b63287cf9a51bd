//! Tests for frontier ordering, tie-breaking and width capping

#[cfg(test)]
mod tests {
    use bricktile::algorithm::arena::{NodeArena, NodeId};
    use bricktile::algorithm::frontier::{Frontier, FrontierEntry, priority};
    use bricktile::spatial::Mask;

    fn handles(count: usize) -> Vec<NodeId> {
        let mut arena = NodeArena::new();
        (0..count).map(|_| arena.push_root(Mask::empty())).collect()
    }

    // Tests the bound formula
    // Verified by dropping the per-cell factor
    #[test]
    fn test_priority() {
        assert_eq!(priority(100, 4, 35), 240);
        assert_eq!(priority(0, 4096, 10), 40960);
        assert_eq!(priority(u32::MAX, 4096, u32::MAX), u64::from(u32::MAX) * 4097);
    }

    // Tests that the smallest bound pops first
    // Verified by using a max-heap without Reverse
    #[test]
    fn test_pop_smallest_bound() {
        let ids = handles(3);
        let mut frontier = Frontier::new();
        for (&node, bound) in ids.iter().zip([30, 10, 20]) {
            frontier.push(FrontierEntry { bound, node });
        }

        let order: Vec<u64> = std::iter::from_fn(|| frontier.pop())
            .map(|entry| entry.bound)
            .collect();
        assert_eq!(order, vec![10, 20, 30]);
        assert!(frontier.is_empty());
    }

    // Tests that equal bounds pop in creation order
    // Verified by ordering entries by node before bound
    #[test]
    fn test_ties_break_by_creation() {
        let ids = handles(4);
        let mut frontier = Frontier::new();
        for &node in ids.iter().rev() {
            frontier.push(FrontierEntry { bound: 7, node });
        }

        let popped: Vec<NodeId> = std::iter::from_fn(|| frontier.pop())
            .map(|entry| entry.node)
            .collect();
        assert_eq!(popped, ids);
    }

    // Tests that capping keeps the best entries and reports the rest
    // Verified by splitting off the front of the sorted entries
    #[test]
    fn test_prune_to() {
        let ids = handles(5);
        let mut frontier = Frontier::new();
        for (&node, bound) in ids.iter().zip([50, 10, 40, 20, 30]) {
            frontier.push(FrontierEntry { bound, node });
        }
        assert_eq!(frontier.peak_len(), 5);

        let mut dropped = frontier.prune_to(2);
        dropped.sort();
        assert_eq!(dropped, vec![ids[0], ids[2], ids[4]]);
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.peak_len(), 5);
        assert_eq!(frontier.pop().map(|entry| entry.node), Some(ids[1]));
        assert_eq!(frontier.pop().map(|entry| entry.node), Some(ids[3]));

        assert!(frontier.prune_to(3).is_empty());
    }
}
