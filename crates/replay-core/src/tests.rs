//! Unit tests for replay-core primitives.

#[cfg(test)]
mod ids {
    use crate::EntityId;

    #[test]
    fn index_roundtrip() {
        let id = EntityId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(EntityId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(EntityId::INVALID.0, u32::MAX);
        assert_eq!(EntityId::default(), EntityId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(EntityId(7).to_string(), "EntityId(7)");
    }
}

#[cfg(test)]
mod point {
    use crate::Point;

    #[test]
    fn pythagorean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, -2.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!((mid.x - 5.0).abs() < 1e-12);
        assert!((mid.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_clamps_out_of_range_t() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(2.0, 2.0);
        assert_eq!(a.lerp(b, -0.5), a);
        assert_eq!(a.lerp(b, 1.5), b);
    }
}

#[cfg(test)]
mod time {
    use crate::{PlaybackClock, SimTime};

    #[test]
    fn sim_time_arithmetic() {
        let t = SimTime(1_000);
        assert_eq!(t + 500, SimTime(1_500));
        assert_eq!(t.offset(250), SimTime(1_250));
        assert_eq!(SimTime(1_500) - SimTime(1_000), 500u64);
        assert_eq!(SimTime(100).since(SimTime(400)), 0); // saturates
    }

    #[test]
    fn clock_advances_by_fixed_tick() {
        let mut clock = PlaybackClock::new(250);
        assert_eq!(clock.now(), SimTime::ZERO);
        clock.advance();
        clock.advance();
        assert_eq!(clock.now(), SimTime(500));
        assert_eq!(clock.ticks_elapsed(), 2);
    }

    #[test]
    fn clock_reset_returns_to_zero() {
        let mut clock = PlaybackClock::new(1_000);
        clock.advance();
        clock.reset();
        assert_eq!(clock.now(), SimTime::ZERO);
        assert_eq!(clock.tick_ms, 1_000);
    }
}

#[cfg(test)]
mod status {
    use crate::{PassengerStatus, Status, VehicleStatus};

    #[test]
    fn passenger_rank_is_forward_ordered() {
        assert!(PassengerStatus::Waiting.rank() < PassengerStatus::Enqueued.rank());
        assert!(PassengerStatus::Enqueued.rank() < PassengerStatus::Onboard.rank());
        assert!(PassengerStatus::Onboard.rank() < PassengerStatus::Completed.rank());
    }

    #[test]
    fn status_accessors() {
        let p = Status::Passenger(PassengerStatus::Onboard);
        assert_eq!(p.passenger(), Some(PassengerStatus::Onboard));
        assert_eq!(p.vehicle(), None);

        let v = Status::Vehicle(VehicleStatus::Serving);
        assert_eq!(v.vehicle(), Some(VehicleStatus::Serving));
        assert_eq!(v.passenger(), None);
    }

    #[test]
    fn display_matches_wire_names() {
        assert_eq!(VehicleStatus::AtTerminal.to_string(), "AT_TERMINAL");
        assert_eq!(PassengerStatus::Onboard.to_string(), "ONBOARD");
    }
}
