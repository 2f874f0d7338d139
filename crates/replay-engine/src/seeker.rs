//! The absolute resolver: position at an arbitrary instant, statelessly.

use replay_core::{Point, SimTime};
use replay_timeline::Timeline;

/// Position of `timeline`'s entity at absolute time `at`, assuming the
/// entire path is traversed at constant speed starting at creation time.
///
/// Walks segments in order, subtracting each segment's traversal time
/// (`length / speed`) from the elapsed budget until the remainder falls
/// inside a segment, then interpolates within it.  Before creation the
/// result clamps to the first waypoint; past the total traversal time it
/// clamps to the last.  Zero-length segments are skipped.
///
/// # Divergence from the advancer
///
/// `seek` is event-blind: WAIT and queued-delay events that the advancer
/// respects do not exist here, so for any timeline containing them the
/// two resolvers disagree on position after the first pause.  Both models
/// are kept deliberately (tick playback vs. scrubbing); the divergence is
/// pinned by a regression test rather than silently reconciled.
///
/// No mutation anywhere — identical arguments always return identical
/// coordinates.
pub fn seek(timeline: &Timeline, at: SimTime) -> Point {
    let points = timeline.path.points();
    if points.len() < 2 {
        return timeline.path.start();
    }

    let mut remaining_ms = at.since(timeline.create_time) as f64;
    for pair in points.windows(2) {
        let segment_length = pair[0].distance(pair[1]);
        if segment_length <= f64::EPSILON {
            continue;
        }
        let segment_ms = segment_length / timeline.speed;
        if remaining_ms < segment_ms {
            return pair[0].lerp(pair[1], remaining_ms / segment_ms);
        }
        remaining_ms -= segment_ms;
    }

    timeline.path.end()
}
