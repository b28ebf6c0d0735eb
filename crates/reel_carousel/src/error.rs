//! Carousel error types

use thiserror::Error;

/// Reasons a navigation request could not be applied
///
/// Neither case is fatal. An empty collection suppresses navigation until
/// images arrive; an unmeasured viewport resolves on the next layout pass.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselError {
    /// The slide collection has no images
    #[error("carousel has no slides")]
    EmptyCollection,

    /// Layout has not reported a usable viewport width yet
    #[error("carousel viewport has not been measured")]
    UnmeasuredViewport,

    /// The carousel has been unmounted
    #[error("carousel is unmounted")]
    Unmounted,
}

/// Result type for carousel operations
pub type Result<T> = std::result::Result<T, CarouselError>;
