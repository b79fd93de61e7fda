use crate::math::{distance, Point2};
use crate::topology::Wall;

/// Returns `true` if clicking `candidate` closes the drawn outline.
///
/// Only the start of the very first wall can close a loop, and only once at
/// least two walls exist.
#[must_use]
pub fn is_closing_shape(candidate: &Point2, walls: &[Wall], threshold: f64) -> bool {
    match walls {
        [first, _, ..] => distance(candidate, &first.start) < threshold,
        _ => false,
    }
}
