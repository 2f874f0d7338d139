//! Strongly typed, zero-cost entity identifier.
//!
//! External run data names entities with arbitrary strings ("trike_0",
//! "passenger_12").  The loader interns those strings once and hands out
//! dense `EntityId` handles; everything after load indexes `Vec`s with
//! `id.index()` instead of hashing strings.  The inner integer is `pub` to
//! allow direct SoA indexing, but callers should prefer `.index()`.

use std::fmt;

/// Index of an entity within a loaded run batch.  Max ~4.3 billion entities.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
    pub const INVALID: EntityId = EntityId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for EntityId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<EntityId> for usize {
    #[inline(always)]
    fn from(id: EntityId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for EntityId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<EntityId, Self::Error> {
        u32::try_from(n).map(EntityId)
    }
}
