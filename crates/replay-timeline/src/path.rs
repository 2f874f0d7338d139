//! Replay path geometry.

use replay_core::Point;

/// An ordered sequence of ≥ 1 waypoints.  A *segment* is the straight
/// line between two consecutive waypoints.
///
/// `Path` is immutable after construction; the advancer and seeker only
/// ever read waypoints and measure segments.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Wrap a waypoint list.  Emptiness is rejected by the store's
    /// validator, not here — tests build degenerate paths on purpose.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All waypoints, in order.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Waypoint at `idx`, or `None` past the end.
    #[inline]
    pub fn point(&self, idx: usize) -> Option<Point> {
        self.points.get(idx).copied()
    }

    /// The first waypoint.
    ///
    /// # Panics
    /// Panics on an empty path; validated paths always have ≥ 1 point.
    #[inline]
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// The final waypoint.
    ///
    /// # Panics
    /// Panics on an empty path; validated paths always have ≥ 1 point.
    #[inline]
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Number of segments (`len - 1`, or 0 for a single-point path).
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Length of the segment starting at waypoint `idx`, or `None` when
    /// `idx` has no successor.
    pub fn segment_length(&self, idx: usize) -> Option<f64> {
        let from = self.points.get(idx)?;
        let to = self.points.get(idx + 1)?;
        Some(from.distance(*to))
    }

    /// Sum of all segment lengths.
    pub fn total_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }
}

impl From<Vec<Point>> for Path {
    fn from(points: Vec<Point>) -> Self {
        Path::new(points)
    }
}
