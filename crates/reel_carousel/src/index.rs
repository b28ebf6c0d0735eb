//! Slide index state
//!
//! The single source of truth for which slide is showing.

use crate::error::{CarouselError, Result};
use serde::Serialize;

/// Who asked for an index change
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// A swipe, arrow press or indicator tap
    Manual,
    /// An autoplay tick
    Auto,
}

/// Wrap any integer onto `[0, len)`
///
/// `-1` maps to the last slide and `len` maps to the first. Returns `None`
/// for an empty collection.
pub fn wrap_index(target: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as i64;
    Some(target.rem_euclid(len) as usize)
}

/// Current index plus slide count
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideIndex {
    current: usize,
    len: usize,
}

// Never empty, so there is no `is_empty` to pair with `len`
#[allow(clippy::len_without_is_empty)]
impl SlideIndex {
    /// Start at the first slide of a non-empty collection
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(CarouselError::EmptyCollection);
        }
        Ok(Self { current: 0, len })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Move to `target` wrapped onto the collection, returning the new index
    pub fn set(&mut self, target: i64) -> usize {
        if let Some(current) = wrap_index(target, self.len) {
            self.current = current;
        }
        self.current
    }

    /// Adopt a new slide count, wrapping the current index onto it
    pub fn resize(&mut self, len: usize) -> Result<()> {
        if len == 0 {
            return Err(CarouselError::EmptyCollection);
        }
        self.len = len;
        self.current %= len;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_index_bounds() {
        for len in 1..=7usize {
            for target in -20i64..=20 {
                let wrapped = wrap_index(target, len).unwrap();
                assert!(wrapped < len, "wrap({}, {}) = {}", target, len, wrapped);
            }
            assert_eq!(wrap_index(len as i64, len), Some(0));
            assert_eq!(wrap_index(-1, len), Some(len - 1));
        }
    }

    #[test]
    fn test_wrap_index_empty() {
        assert_eq!(wrap_index(0, 0), None);
        assert_eq!(wrap_index(-1, 0), None);
    }

    #[test]
    fn test_wrap_index_extremes() {
        assert_eq!(wrap_index(i64::MIN, 3), Some((i64::MIN).rem_euclid(3) as usize));
        assert!(wrap_index(i64::MAX, 5).unwrap() < 5);
    }

    #[test]
    fn test_slide_index_rejects_empty() {
        assert_eq!(SlideIndex::new(0), Err(CarouselError::EmptyCollection));
    }

    #[test]
    fn test_set_wraps_both_ways() {
        let mut index = SlideIndex::new(3).unwrap();
        assert_eq!(index.set(3), 0);
        assert_eq!(index.set(-1), 2);
        assert_eq!(index.set(4), 1);
        assert_eq!(index.current(), 1);
    }

    #[test]
    fn test_set_agrees_with_wrap_index() {
        let mut index = SlideIndex::new(7).unwrap();
        for target in [i64::MIN, -15, -7, -1, 0, 6, 7, 22, i64::MAX] {
            assert_eq!(Some(index.set(target)), wrap_index(target, 7));
        }
    }

    #[test]
    fn test_resize_wraps_current() {
        let mut index = SlideIndex::new(5).unwrap();
        index.set(4);
        index.resize(3).unwrap();
        assert_eq!(index.current(), 1);
        assert_eq!(index.len(), 3);

        assert_eq!(index.resize(0), Err(CarouselError::EmptyCollection));
        assert_eq!(index.len(), 3);
    }
}
