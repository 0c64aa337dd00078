use std::collections::HashMap;

/// Cycling state for groups of entries that share a match key.
///
/// The key is the normalized `(question, tag)` pair; the value is the next
/// index to serve. Counters live for the session only and are never
/// persisted, so a restart simply starts each group from the front again.
///
/// The read-increment-write in [`next`](Self::next) is not atomic; callers
/// that share one instance across threads must add their own locking.
#[derive(Debug, Default)]
pub struct RoundRobin {
    counters: HashMap<(String, String), usize>,
}

impl RoundRobin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve the next index for a group and advance the counter.
    ///
    /// The group size is recomputed by the caller on every selection, so a
    /// stale counter is always reduced modulo the current size and can never
    /// index out of range. Call exactly once per successful match.
    pub fn next(&mut self, question: &str, tag: &str, group_size: usize) -> usize {
        if group_size == 0 {
            return 0;
        }
        let counter = self
            .counters
            .entry((question.to_string(), tag.to_string()))
            .or_insert(0);
        let served = *counter % group_size;
        *counter = (served + 1) % group_size;
        served
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cycles_through_group_in_order() {
        let mut rr = RoundRobin::new();
        let served: Vec<usize> = (0..7).map(|_| rr.next("salam", "auto", 3)).collect();
        assert_eq!(served, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn keys_cycle_independently() {
        let mut rr = RoundRobin::new();
        assert_eq!(rr.next("a", "x", 2), 0);
        assert_eq!(rr.next("b", "x", 2), 0);
        assert_eq!(rr.next("a", "x", 2), 1);
        assert_eq!(rr.next("a", "y", 2), 0);
        assert_eq!(rr.next("b", "x", 2), 1);
    }

    #[test]
    fn shrunken_group_still_yields_valid_index() {
        let mut rr = RoundRobin::new();
        for _ in 0..5 {
            rr.next("q", "t", 6);
        }
        // Counter now points past the end of a smaller group.
        let idx = rr.next("q", "t", 2);
        assert!(idx < 2);
    }

    #[test]
    fn zero_sized_group_is_a_noop() {
        let mut rr = RoundRobin::new();
        assert_eq!(rr.next("q", "t", 0), 0);
        assert!(rr.is_empty());
    }
}
