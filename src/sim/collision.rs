//! Collision detection for axis-aligned boxes
//!
//! Everything in the game collides as a rectangle. Edges are closed on both
//! ends: two boxes that share an edge count as touching.

use super::rect::Rect;

/// Check whether two rectangles overlap on both axes
///
/// Symmetric and reflexive: `overlaps(a, b) == overlaps(b, a)` and every
/// rectangle overlaps itself.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x <= b.right() && b.x <= a.right() && a.y <= b.bottom() && b.y <= a.bottom()
}

/// Return the id of the first candidate (in iteration order) hit by `shot`
pub fn first_hit<I>(shot: &Rect, candidates: I) -> Option<u32>
where
    I: IntoIterator<Item = (u32, Rect)>,
{
    candidates
        .into_iter()
        .find(|(_, rect)| overlaps(shot, rect))
        .map(|(id, _)| id)
}
