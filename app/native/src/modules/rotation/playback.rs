//! Playback position and countdown for a rotation.
//!
//! Every operation on an empty image set is a no-op, so a playback over zero
//! images is inert rather than an error.

use std::path::Path;

use super::image_set::ImageSet;

/// Default number of seconds between automatic advances (30 minutes).
pub const DEFAULT_INTERVAL_SECS: u64 = 1800;

/// Tracks which image is current and how long until the next automatic change.
///
/// Invariants:
/// - `current_index < images.len()` whenever the set is non-empty (0 otherwise).
/// - `remaining_secs` is always within `0..=interval_secs`.
#[derive(Debug, Clone)]
pub struct Playback {
    images: ImageSet,
    current_index: usize,
    interval_secs: u64,
    remaining_secs: u64,
}

impl Playback {
    /// Creates a playback positioned on the first image with a full countdown.
    ///
    /// An interval of 0 is raised to 1 second so the countdown can always reach zero.
    #[must_use]
    pub fn new(images: ImageSet, interval_secs: u64) -> Self {
        let interval_secs = interval_secs.max(1);
        Self {
            images,
            current_index: 0,
            interval_secs,
            remaining_secs: interval_secs,
        }
    }

    /// Moves forward one image, wrapping to the start, and resets the countdown.
    pub fn advance(&mut self) {
        if self.images.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.images.len();
        self.reset_countdown();
    }

    /// Moves back one image, wrapping to the end, and resets the countdown.
    pub fn retreat(&mut self) {
        if self.images.is_empty() {
            return;
        }
        let len = self.images.len();
        self.current_index = (self.current_index + len - 1) % len;
        self.reset_countdown();
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns `true` when the countdown hit zero and the playback advanced,
    /// meaning the new current image should be applied.
    pub fn tick_countdown(&mut self) -> bool {
        if self.images.is_empty() {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.advance();
            return true;
        }
        false
    }

    fn reset_countdown(&mut self) { self.remaining_secs = self.interval_secs; }

    /// The image currently on display, if the set is non-empty.
    #[must_use]
    pub fn current(&self) -> Option<&Path> { self.images.get(self.current_index) }

    /// Zero-based index of the current image.
    #[must_use]
    pub const fn current_index(&self) -> usize { self.current_index }

    /// Number of images in the rotation.
    #[must_use]
    pub fn total(&self) -> usize { self.images.len() }

    /// Seconds until the next automatic advance.
    #[must_use]
    pub const fn remaining_secs(&self) -> u64 { self.remaining_secs }

    /// Seconds between automatic advances.
    #[must_use]
    pub const fn interval_secs(&self) -> u64 { self.interval_secs }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn playback(count: usize, interval: u64) -> Playback {
        let paths = (0..count).map(|i| PathBuf::from(format!("/art/{i:03}.jpg"))).collect();
        Playback::new(ImageSet::from_paths(paths), interval)
    }

    #[test]
    fn test_new_starts_at_first_image_with_full_countdown() {
        let p = playback(3, 1800);
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.remaining_secs(), 1800);
        assert_eq!(p.interval_secs(), 1800);
        assert_eq!(p.current(), Some(Path::new("/art/000.jpg")));
    }

    #[test]
    fn test_zero_interval_is_raised_to_one_second() {
        let p = playback(2, 0);
        assert_eq!(p.interval_secs(), 1);
        assert_eq!(p.remaining_secs(), 1);
    }

    #[test]
    fn test_advance_cycles_through_every_image() {
        for n in 1..=7 {
            let mut p = playback(n, 60);
            let mut seen = Vec::new();
            for _ in 0..n {
                p.advance();
                seen.push(p.current_index());
            }
            // Back at zero after exactly n advances, having visited every index once
            assert_eq!(p.current_index(), 0);
            let mut sorted = seen.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_retreat_from_zero_wraps_to_last() {
        for n in 1..=5 {
            let mut p = playback(n, 60);
            p.retreat();
            assert_eq!(p.current_index(), n - 1);
        }
    }

    #[test]
    fn test_advance_and_retreat_reset_countdown() {
        let mut p = playback(3, 10);
        p.tick_countdown();
        p.tick_countdown();
        assert_eq!(p.remaining_secs(), 8);

        p.advance();
        assert_eq!(p.remaining_secs(), 10);

        p.tick_countdown();
        p.retreat();
        assert_eq!(p.remaining_secs(), 10);
        assert_eq!(p.current_index(), 0);
    }

    #[test]
    fn test_tick_countdown_advances_when_reaching_zero() {
        let mut p = playback(3, 3);
        assert!(!p.tick_countdown());
        assert!(!p.tick_countdown());
        assert!(p.tick_countdown());
        assert_eq!(p.current_index(), 1);
        assert_eq!(p.remaining_secs(), 3);
    }

    #[test]
    fn test_full_interval_of_ticks_advances_exactly_once() {
        let mut p = playback(4, 1800);
        let advances = (0..1800).filter(|_| p.tick_countdown()).count();
        assert_eq!(advances, 1);
        assert_eq!(p.current_index(), 1);
        assert_eq!(p.remaining_secs(), 1800);
    }

    #[test]
    fn test_remaining_stays_within_bounds() {
        let mut p = playback(2, 5);
        for _ in 0..23 {
            p.tick_countdown();
            assert!(p.remaining_secs() <= p.interval_secs());
            assert!(p.remaining_secs() > 0);
        }
    }

    #[test]
    fn test_empty_playback_is_inert() {
        let mut p = playback(0, 30);
        p.advance();
        p.retreat();
        assert!(!p.tick_countdown());
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.remaining_secs(), 30);
        assert!(p.current().is_none());
        assert_eq!(p.total(), 0);
    }

    #[test]
    fn test_single_image_wraps_onto_itself() {
        let mut p = playback(1, 2);
        p.advance();
        assert_eq!(p.current_index(), 0);
        p.retreat();
        assert_eq!(p.current_index(), 0);
        assert!(!p.tick_countdown());
        assert!(p.tick_countdown());
        assert_eq!(p.current_index(), 0);
    }
}
