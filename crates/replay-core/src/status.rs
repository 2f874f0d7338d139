//! Entity kinds and discrete replay statuses.
//!
//! The kind is an explicit tag assigned once at load time; nothing in the
//! engine ever infers it from an identifier string.

use std::fmt;

// ── EntityKind ───────────────────────────────────────────────────────────────

/// What a timeline describes: a passenger-carrying vehicle or a passenger.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntityKind {
    Vehicle,
    Passenger,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Vehicle => write!(f, "vehicle"),
            EntityKind::Passenger => write!(f, "passenger"),
        }
    }
}

// ── PassengerStatus ──────────────────────────────────────────────────────────

/// Discrete passenger state, advanced only along
/// WAITING → ENQUEUED → ONBOARD → COMPLETED (forward jumps allowed) with
/// ENQUEUED/ONBOARD → WAITING via a reset.  COMPLETED is absorbing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PassengerStatus {
    #[default]
    Waiting,
    Enqueued,
    Onboard,
    Completed,
}

impl PassengerStatus {
    /// Position along the forward chain, used to check ordering.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            PassengerStatus::Waiting => 0,
            PassengerStatus::Enqueued => 1,
            PassengerStatus::Onboard => 2,
            PassengerStatus::Completed => 3,
        }
    }
}

impl fmt::Display for PassengerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PassengerStatus::Waiting => "WAITING",
            PassengerStatus::Enqueued => "ENQUEUED",
            PassengerStatus::Onboard => "ONBOARD",
            PassengerStatus::Completed => "COMPLETED",
        };
        f.write_str(s)
    }
}

// ── VehicleStatus ────────────────────────────────────────────────────────────

/// Discrete vehicle state.
///
/// `Idle`, `AtTerminal`, and `Roaming` are opaque pass-through values set
/// by the external scheduling context (carried on the loaded record); the
/// engine never computes them.  `Enqueuing`, `Serving`, and `Returning`
/// are derived during replay from the vehicle's own ENQUEUE / LOAD /
/// DROP-OFF events.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum VehicleStatus {
    #[default]
    Idle,
    AtTerminal,
    Roaming,
    Returning,
    Serving,
    Enqueuing,
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VehicleStatus::Idle => "IDLE",
            VehicleStatus::AtTerminal => "AT_TERMINAL",
            VehicleStatus::Roaming => "ROAMING",
            VehicleStatus::Returning => "RETURNING",
            VehicleStatus::Serving => "SERVING",
            VehicleStatus::Enqueuing => "ENQUEUING",
        };
        f.write_str(s)
    }
}

// ── Status ───────────────────────────────────────────────────────────────────

/// The status of any entity, tagged by kind.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Passenger(PassengerStatus),
    Vehicle(VehicleStatus),
}

impl Status {
    /// The passenger status, if this is a passenger.
    pub fn passenger(self) -> Option<PassengerStatus> {
        match self {
            Status::Passenger(s) => Some(s),
            Status::Vehicle(_) => None,
        }
    }

    /// The vehicle status, if this is a vehicle.
    pub fn vehicle(self) -> Option<VehicleStatus> {
        match self {
            Status::Vehicle(s) => Some(s),
            Status::Passenger(_) => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Passenger(s) => s.fmt(f),
            Status::Vehicle(s) => s.fmt(f),
        }
    }
}
