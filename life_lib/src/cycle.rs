//! Detection of grids that repeat, such as still lifes & oscillators.

use std::collections::VecDeque;

/// Remembers the fingerprints of recent generations & reports when one repeats.
///
/// See [`Grid::fingerprint`](crate::Grid::fingerprint).
#[derive(Debug)]
pub struct CycleDetector {
    history: VecDeque<u64>,
    capacity: usize,
    reported: bool,
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl CycleDetector {
    /// The amount of generations remembered by default.
    pub const DEFAULT_CAPACITY: usize = 10;

    /// Creates a detector that remembers the given amount of generations.
    /// It will always remember at least one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            reported: false,
        }
    }

    /// Records the fingerprint of the newest generation.
    ///
    /// Returns the period of the cycle the first time a fingerprint matches one in the history.
    /// A still life has a period of 1.
    /// Later repeats return [`None`] until [`CycleDetector::clear`] is called.
    pub fn observe(&mut self, fingerprint: u64) -> Option<usize> {
        let period = self
            .history
            .iter()
            .rev()
            .position(|previous| *previous == fingerprint)
            .map(|distance| distance + 1);

        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(fingerprint);

        match period {
            Some(period) if !self.reported => {
                self.reported = true;
                Some(period)
            }
            _ => None,
        }
    }

    /// Forgets all recorded generations.
    pub fn clear(&mut self) {
        self.history.clear();
        self.reported = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_life_has_period_one() {
        let mut detector = CycleDetector::default();

        assert_eq!(detector.observe(7), None);
        assert_eq!(detector.observe(7), Some(1));
    }

    #[test]
    fn oscillator_period() {
        let mut detector = CycleDetector::default();

        assert_eq!(detector.observe(1), None);
        assert_eq!(detector.observe(2), None);
        assert_eq!(detector.observe(1), Some(2));
        // Only reported once.
        assert_eq!(detector.observe(2), None);
    }

    #[test]
    /// Fingerprints older than the capacity are forgotten.
    fn forgets_old_generations() {
        let mut detector = CycleDetector::new(2);

        detector.observe(1);
        detector.observe(2);
        detector.observe(3);
        assert_eq!(detector.observe(1), None);
    }

    #[test]
    fn clear_allows_new_report() {
        let mut detector = CycleDetector::default();
        detector.observe(5);
        assert_eq!(detector.observe(5), Some(1));

        detector.clear();
        assert_eq!(detector.observe(5), None);
        assert_eq!(detector.observe(5), Some(1));
    }
}
