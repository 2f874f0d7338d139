//! `replay-timeline` — immutable per-entity timeline data and its loader.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`event`]    | `Event` tagged variants, `TimedEvent`                     |
//! | [`path`]     | `Path` — ordered waypoints + segment geometry             |
//! | [`timeline`] | `Timeline` — one entity's immutable replay record         |
//! | [`store`]    | `TimelineStore` — interned, validated batch               |
//! | [`loader`]   | JSON wire records → validated store                       |
//! | [`terminal`] | Display-only terminal overlay records                     |
//! | [`error`]    | `TimelineError`, `TimelineResult<T>`                      |
//!
//! # Load pipeline
//!
//! ```text
//! JSON document ──parse──▶ wire records ──intern ids──▶ Timeline values
//!                                             │
//!                               validate every invariant
//!                                             │
//!                 first violation: Err(Malformed), whole batch rejected
//!                           all pass: TimelineStore (read-only)
//! ```
//!
//! After construction the store never mutates path or event content; the
//! only mutable replay state lives in `replay-engine` cursors.

pub mod error;
pub mod event;
pub mod loader;
pub mod path;
pub mod store;
pub mod terminal;
pub mod timeline;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TimelineError, TimelineResult};
pub use event::{Event, TimedEvent};
pub use loader::{run_from_reader, run_from_str, terminals_from_reader, terminals_from_str};
pub use path::Path;
pub use store::{TimelineStore, TimelineStoreBuilder};
pub use terminal::Terminal;
pub use timeline::Timeline;
