//! Plain data row types written by log backends.

/// One notification, flattened for row-oriented storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLogRow {
    /// Clock reading of the tick that produced the notification.
    pub time_ms: u64,
    /// External name of the entity the notification belongs to.
    pub entity: String,
    /// `info` / `warning` / `error`.
    pub severity: String,
    /// Wire-style notification kind (`LOAD`, `VEHICLE_STATUS`, `FAULT`, …).
    pub kind: String,
    /// External name of the referenced peer; empty for peerless kinds.
    pub peer: String,
    /// Kind-specific detail: a status name, a location, a skipped event
    /// kind, or a fault description.
    pub detail: String,
}

/// Summary statistics for one replay tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    /// Zero-based tick counter.
    pub tick: u64,
    /// Clock reading at the start of the tick.
    pub time_ms: u64,
    /// Notifications delivered during the tick.
    pub notifications: u64,
    /// Entities still wanting ticks when the tick ended.
    pub live_entities: u64,
}
