//! Overlay navigation state machine.
//!
//! All viewer state lives in one explicit `Navigator` instance: the ordered
//! image sequence, and whether the overlay is closed or open at some index.
//! Every input modality (pointer, keyboard, swipe) funnels into the same
//! handful of operations here, so behavior is identical regardless of how a
//! navigation was triggered.

use std::path::{Path, PathBuf};

use crate::loader;

/// One gallery image: its file path plus the human-readable caption shown
/// under the overlay image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub path: PathBuf,
    pub caption: String,
}

/// Immutable ordered list of gallery images, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageSequence {
    entries: Vec<GalleryEntry>,
}

impl ImageSequence {
    pub fn new(entries: Vec<GalleryEntry>) -> Self {
        Self { entries }
    }

    /// Builds a sequence from image paths, deriving captions from the
    /// final path component (percent-decoded).
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        let entries = paths
            .into_iter()
            .map(|path| {
                let caption = loader::display_name(&path);
                GalleryEntry { path, caption }
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GalleryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GalleryEntry> {
        self.entries.iter()
    }
}

/// The overlay is either closed, or open showing exactly one index.
///
/// Navigation calls while `Closed` are ignored rather than being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    Closed,
    Open { index: usize },
}

/// Owns the image sequence and the overlay state; the only place either is
/// mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    sequence: ImageSequence,
    state: ViewerState,
}

/// Normalize any integer into `[0, len)` with true modulo, so indices below
/// zero wrap to the end and indices past the end wrap to the start.
fn wrap_index(i: i64, len: usize) -> usize {
    debug_assert!(len > 0);
    i.rem_euclid(len as i64) as usize
}

impl Navigator {
    pub fn new(sequence: ImageSequence) -> Self {
        Self {
            sequence,
            state: ViewerState::Closed,
        }
    }

    pub fn sequence(&self) -> &ImageSequence {
        &self.sequence
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open { .. })
    }

    /// Index currently shown, if the overlay is open.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            ViewerState::Open { index } => Some(index),
            ViewerState::Closed => None,
        }
    }

    pub fn current_entry(&self) -> Option<&GalleryEntry> {
        self.sequence.get(self.current_index()?)
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_entry().map(|e| e.path.as_path())
    }

    /// Opens the overlay at `index` (wrapped into range). Returns `false`
    /// and stays closed when the sequence is empty; an empty gallery is
    /// inert.
    pub fn open(&mut self, index: usize) -> bool {
        if self.sequence.is_empty() {
            return false;
        }
        self.state = ViewerState::Open { index: 0 };
        self.set_image(index as i64);
        true
    }

    /// Closes the overlay. A no-op when already closed (or never opened).
    pub fn close(&mut self) {
        self.state = ViewerState::Closed;
    }

    /// Selects image `i`, wrapping any out-of-range value. Ignored while
    /// closed.
    fn set_image(&mut self, i: i64) {
        if !self.is_open() || self.sequence.is_empty() {
            return;
        }
        self.state = ViewerState::Open {
            index: wrap_index(i, self.sequence.len()),
        };
    }

    pub fn next(&mut self) {
        if let ViewerState::Open { index } = self.state {
            self.set_image(index as i64 + 1);
        }
    }

    pub fn prev(&mut self) {
        if let ViewerState::Open { index } = self.state {
            self.set_image(index as i64 - 1);
        }
    }

    /// Absolute jump to the first image (Home). Deliberately does not go
    /// through the relative wraparound path.
    pub fn jump_first(&mut self) {
        if self.is_open() && !self.sequence.is_empty() {
            self.state = ViewerState::Open { index: 0 };
        }
    }

    /// Absolute jump to the last image (End).
    pub fn jump_last(&mut self) {
        if self.is_open() && !self.sequence.is_empty() {
            self.state = ViewerState::Open {
                index: self.sequence.len() - 1,
            };
        }
    }

    /// `"position / total"` text for the overlay counter.
    pub fn counter_text(&self) -> Option<String> {
        let index = self.current_index()?;
        Some(format!("{} / {}", index + 1, self.sequence.len()))
    }

    pub fn caption(&self) -> Option<&str> {
        self.current_entry().map(|e| e.caption.as_str())
    }

    /// Wrapped neighbor indices `(next, previous)` of the current image,
    /// the targets of speculative prefetch.
    pub fn neighbor_indices(&self) -> Option<(usize, usize)> {
        let index = self.current_index()? as i64;
        let len = self.sequence.len();
        Some((wrap_index(index + 1, len), wrap_index(index - 1, len)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(n: usize) -> ImageSequence {
        ImageSequence::new(
            (0..n)
                .map(|i| GalleryEntry {
                    path: PathBuf::from(format!("img_{i:03}.jpg")),
                    caption: format!("img_{i:03}.jpg"),
                })
                .collect(),
        )
    }

    #[test]
    fn starts_closed() {
        let nav = Navigator::new(sequence(3));
        assert_eq!(nav.state(), ViewerState::Closed);
        assert_eq!(nav.current_index(), None);
        assert_eq!(nav.counter_text(), None);
    }

    #[test]
    fn open_sets_index_and_counter() {
        let mut nav = Navigator::new(sequence(3));
        assert!(nav.open(0));
        assert_eq!(nav.current_index(), Some(0));
        assert_eq!(nav.counter_text().as_deref(), Some("1 / 3"));
    }

    #[test]
    fn open_wraps_out_of_range_index() {
        let mut nav = Navigator::new(sequence(3));
        nav.open(7);
        assert_eq!(nav.current_index(), Some(1));
    }

    #[test]
    fn open_on_empty_sequence_is_inert() {
        let mut nav = Navigator::new(ImageSequence::default());
        assert!(!nav.open(0));
        assert_eq!(nav.state(), ViewerState::Closed);
    }

    #[test]
    fn close_before_open_is_a_no_op() {
        let mut nav = Navigator::new(sequence(3));
        nav.close();
        assert_eq!(nav.state(), ViewerState::Closed);
    }

    #[test]
    fn wraparound_is_total_modulo() {
        // ((i mod N) + N) mod N for any integer, including large negatives.
        for i in [-1_000_003_i64, -4, -1, 0, 1, 2, 3, 7, 1_000_000_000] {
            let expected = ((i % 3) + 3) % 3;
            assert_eq!(wrap_index(i, 3) as i64, expected, "i = {i}");
        }
    }

    #[test]
    fn next_then_prev_restores_index() {
        for start in 0..3 {
            let mut nav = Navigator::new(sequence(3));
            nav.open(start);
            nav.next();
            nav.prev();
            assert_eq!(nav.current_index(), Some(start));

            nav.prev();
            nav.next();
            assert_eq!(nav.current_index(), Some(start));
        }
    }

    #[test]
    fn next_wraps_past_the_end() {
        let mut nav = Navigator::new(sequence(3));
        nav.open(0);
        assert_eq!(nav.counter_text().as_deref(), Some("1 / 3"));
        nav.next();
        assert_eq!(nav.counter_text().as_deref(), Some("2 / 3"));
        nav.next();
        assert_eq!(nav.counter_text().as_deref(), Some("3 / 3"));
        nav.next();
        assert_eq!(nav.counter_text().as_deref(), Some("1 / 3"));
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        let mut nav = Navigator::new(sequence(3));
        nav.open(0);
        nav.prev();
        assert_eq!(nav.current_index(), Some(2));
        assert_eq!(nav.counter_text().as_deref(), Some("3 / 3"));
    }

    #[test]
    fn navigation_while_closed_is_ignored() {
        let mut nav = Navigator::new(sequence(3));
        nav.next();
        nav.prev();
        nav.jump_first();
        nav.jump_last();
        assert_eq!(nav.state(), ViewerState::Closed);
    }

    #[test]
    fn home_and_end_jump_absolutely() {
        let mut nav = Navigator::new(sequence(5));
        nav.open(2);
        nav.jump_first();
        assert_eq!(nav.current_index(), Some(0));
        nav.jump_last();
        assert_eq!(nav.current_index(), Some(4));
    }

    #[test]
    fn reopen_after_close_reuses_sequence() {
        let mut nav = Navigator::new(sequence(3));
        nav.open(1);
        nav.close();
        assert!(!nav.is_open());
        nav.open(2);
        assert_eq!(nav.current_index(), Some(2));
    }

    #[test]
    fn neighbors_wrap_at_both_ends() {
        let mut nav = Navigator::new(sequence(3));
        nav.open(0);
        assert_eq!(nav.neighbor_indices(), Some((1, 2)));
        nav.jump_last();
        assert_eq!(nav.neighbor_indices(), Some((0, 1)));
    }

    #[test]
    fn single_image_neighbors_are_itself() {
        let mut nav = Navigator::new(sequence(1));
        nav.open(0);
        assert_eq!(nav.neighbor_indices(), Some((0, 0)));
        nav.next();
        assert_eq!(nav.current_index(), Some(0));
        assert_eq!(nav.counter_text().as_deref(), Some("1 / 1"));
    }
}
