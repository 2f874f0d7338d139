//! Engine error type.

use replay_core::EntityId;
use thiserror::Error;

/// Errors produced by `replay-engine`.
///
/// Per-tick faults are *not* returned from the tick loop — they are
/// isolated to the affected entity and surfaced through the notification
/// channel, so a single corrupted timeline never halts the batch.
/// `ReplayError` backs fault details and the fallible lookup API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("entity {0} is not part of the loaded batch")]
    UnknownEntity(EntityId),

    #[error("cursor for entity {entity} references waypoint {index} but the path has {len} points")]
    PathIndexOutOfRange { entity: EntityId, index: usize, len: usize },
}

pub type ReplayResult<T> = Result<T, ReplayError>;
