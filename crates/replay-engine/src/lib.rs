//! `replay-engine` — projects loaded timelines into positions and statuses.
//!
//! # Two time-access models
//!
//! | Resolver     | Access pattern        | State        | Event-aware |
//! |--------------|-----------------------|--------------|-------------|
//! | [`advancer`] | forward, tick-by-tick | per-entity [`Cursor`] | yes |
//! | [`seeker`]   | arbitrary absolute time | none       | no          |
//!
//! The two deliberately coexist and can disagree for timelines containing
//! WAIT or queued-delay events; see [`seeker::seek`] for the documented
//! divergence.
//!
//! # Tick loop
//!
//! ```text
//! for each tick:
//!   ① Read the clock once — the value is passed into every resolver call.
//!   ② Advance every live cursor (parallel with the `parallel` feature).
//!   ③ Apply phase (sequential, ascending EntityId): vehicle LOAD /
//!      DROP-OFF / ENQUEUE / RESET notifications project onto the
//!      referenced passenger's status.
//!   ④ Deliver all notifications to the sink, then advance the clock.
//! ```
//!
//! Per-entity faults never abort the batch: a failed cursor stops
//! receiving ticks and the failure travels down the same notification
//! channel as ordinary events, tagged [`Severity::Error`].

pub mod advancer;
pub mod cursor;
pub mod error;
pub mod notify;
pub mod project;
pub mod replay;
pub mod seeker;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cursor::{Cursor, Phase};
pub use error::{ReplayError, ReplayResult};
pub use notify::{NoopSink, NoteBody, Notification, ReplaySink, Severity};
pub use replay::Replay;
