//! Pure status projection: `(status, event) → status`.
//!
//! No side effects; callers persist the returned value.  The same tables
//! serve the advancer (an entity's own events) and the orchestrator's
//! cross-entity apply phase (a vehicle's LOAD-family events reaching the
//! referenced passenger).

use replay_core::{PassengerStatus, Status, VehicleStatus};
use replay_timeline::Event;

/// Project one event onto a status, dispatching on the entity side.
pub fn project(status: Status, event: &Event) -> Status {
    match status {
        Status::Passenger(p) => Status::Passenger(project_passenger(p, event)),
        Status::Vehicle(v) => Status::Vehicle(project_vehicle(v, event)),
    }
}

/// Passenger table: APPEAR→WAITING, ENQUEUE→ENQUEUED, LOAD→ONBOARD,
/// DROP-OFF→COMPLETED, RESET→WAITING.  COMPLETED is absorbing; every
/// other event leaves the status untouched.
pub fn project_passenger(current: PassengerStatus, event: &Event) -> PassengerStatus {
    if current == PassengerStatus::Completed {
        return PassengerStatus::Completed;
    }
    match event {
        Event::Appear { .. } => PassengerStatus::Waiting,
        Event::Enqueue { .. } => PassengerStatus::Enqueued,
        Event::Load { .. } => PassengerStatus::Onboard,
        Event::DropOff { .. } => PassengerStatus::Completed,
        Event::Reset { .. } => PassengerStatus::Waiting,
        _ => current,
    }
}

/// Vehicle table: ENQUEUE→ENQUEUING, LOAD→SERVING, DROP-OFF→RETURNING.
///
/// Anything else passes the current value through — IDLE, AT_TERMINAL,
/// and ROAMING come from the external scheduling context and are never
/// computed here.
pub fn project_vehicle(current: VehicleStatus, event: &Event) -> VehicleStatus {
    match event {
        Event::Enqueue { .. } => VehicleStatus::Enqueuing,
        Event::Load { .. } => VehicleStatus::Serving,
        Event::DropOff { .. } => VehicleStatus::Returning,
        _ => current,
    }
}
