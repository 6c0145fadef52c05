//! Progress reporting. Purely observational.

use indicatif::ProgressBar;

/// Receives one tick per processed translation unit.
pub trait Progress {
    fn start(&mut self, _total: usize) {}
    fn advance(&mut self) {}
    fn finish(&mut self) {}
}

/// Discards progress.
#[derive(Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}

impl Progress for ProgressBar {
    fn start(&mut self, total: usize) {
        self.set_length(total as u64);
        self.set_position(0);
    }

    fn advance(&mut self) {
        self.inc(1);
    }

    fn finish(&mut self) {
        ProgressBar::finish(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_counts_ticks() {
        let mut bar = ProgressBar::hidden();
        Progress::start(&mut bar, 3);
        Progress::advance(&mut bar);
        Progress::advance(&mut bar);
        assert_eq!(bar.length(), Some(3));
        assert_eq!(bar.position(), 2);
    }
}
