//! Booking lifecycle guards
//!
//! Aggregate: Pending -> Confirmed -> CheckedIn -> CheckedOut, with
//! Cancelled reachable from Pending and Confirmed only. Per-room:
//! Pending -> CheckedIn -> CheckedOut, Cancelled alongside the booking.
//! The aggregate check-in/check-out states are derived from the rooms.

use shared::models::{Booking, BookingStatus, RoomBookingStatus};
use shared::{BookingError, BookingResult};

/// Guard an aggregate transition
pub fn ensure_booking_transition(from: BookingStatus, to: BookingStatus) -> BookingResult<()> {
    let allowed = matches!(
        (from, to),
        (BookingStatus::Pending, BookingStatus::Confirmed)
            | (BookingStatus::Pending, BookingStatus::Cancelled)
            | (BookingStatus::Confirmed, BookingStatus::CheckedIn)
            | (BookingStatus::Confirmed, BookingStatus::Cancelled)
            | (BookingStatus::CheckedIn, BookingStatus::CheckedOut)
    );
    if allowed {
        Ok(())
    } else {
        Err(BookingError::invalid_transition(format!(
            "booking cannot move from {:?} to {:?}",
            from, to
        )))
    }
}

/// Guard a per-room transition
pub fn ensure_room_transition(
    from: RoomBookingStatus,
    to: RoomBookingStatus,
) -> BookingResult<()> {
    let allowed = matches!(
        (from, to),
        (RoomBookingStatus::Pending, RoomBookingStatus::CheckedIn)
            | (RoomBookingStatus::Pending, RoomBookingStatus::Cancelled)
            | (RoomBookingStatus::CheckedIn, RoomBookingStatus::CheckedOut)
    );
    if allowed {
        Ok(())
    } else {
        Err(BookingError::invalid_transition(format!(
            "room cannot move from {:?} to {:?}",
            from, to
        )))
    }
}

/// Derive the aggregate status from room sub-states.
///
/// CheckedIn once at least one room is in; CheckedOut only when every
/// non-cancelled room is out. Pending/Confirmed/Cancelled are not derived,
/// they are set by their commands.
pub fn derive_booking_status(booking: &Booking) -> BookingStatus {
    let mut any = false;
    let mut any_in = false;
    let mut all_out = true;
    for room in booking.active_rooms() {
        any = true;
        match room.status {
            RoomBookingStatus::CheckedIn => {
                any_in = true;
                all_out = false;
            }
            RoomBookingStatus::CheckedOut => {}
            _ => all_out = false,
        }
    }
    if any && all_out {
        BookingStatus::CheckedOut
    } else if any_in {
        BookingStatus::CheckedIn
    } else {
        booking.status
    }
}

/// Whether the booking still holds rooms (drives the active index)
pub fn is_active(status: BookingStatus) -> bool {
    matches!(
        status,
        BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::CheckedIn
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::{BookingRoom, BookingRoomType, Guest};

    #[test]
    fn aggregate_transitions_follow_the_state_machine() {
        assert!(ensure_booking_transition(BookingStatus::Pending, BookingStatus::Confirmed).is_ok());
        assert!(
            ensure_booking_transition(BookingStatus::Confirmed, BookingStatus::Cancelled).is_ok()
        );
        assert!(
            ensure_booking_transition(BookingStatus::CheckedIn, BookingStatus::Cancelled).is_err()
        );
        assert!(
            ensure_booking_transition(BookingStatus::CheckedOut, BookingStatus::CheckedIn).is_err()
        );
        assert!(
            ensure_booking_transition(BookingStatus::Pending, BookingStatus::CheckedIn).is_err()
        );
    }

    #[test]
    fn room_transitions_follow_the_state_machine() {
        assert!(
            ensure_room_transition(RoomBookingStatus::Pending, RoomBookingStatus::CheckedIn)
                .is_ok()
        );
        assert!(
            ensure_room_transition(RoomBookingStatus::CheckedIn, RoomBookingStatus::CheckedOut)
                .is_ok()
        );
        assert!(
            ensure_room_transition(RoomBookingStatus::CheckedOut, RoomBookingStatus::CheckedIn)
                .is_err()
        );
        assert!(
            ensure_room_transition(RoomBookingStatus::CheckedIn, RoomBookingStatus::Cancelled)
                .is_err()
        );
    }

    fn booking_with_rooms(statuses: &[RoomBookingStatus]) -> Booking {
        let start = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
        let mut booking = Booking::new(
            "b-1".to_string(),
            "RES202601150001".to_string(),
            1,
            Guest { name: "Ada".to_string(), ..Default::default() },
            0,
        );
        booking.status = BookingStatus::Confirmed;
        booking.lines.push(BookingRoomType {
            id: "line-1".to_string(),
            room_type_id: 10,
            room_type_name: "Double".to_string(),
            total_rooms: statuses.len() as u32,
            start_date: start,
            end_date: end,
            nightly_price: 100.0,
            rooms: statuses
                .iter()
                .enumerate()
                .map(|(i, status)| BookingRoom {
                    id: format!("br-{}", i),
                    room_id: 100 + i as i64,
                    room_number: format!("10{}", i),
                    start_date: start,
                    end_date: end,
                    status: *status,
                    actual_check_in_at: None,
                    actual_check_out_at: None,
                })
                .collect(),
        });
        booking
    }

    #[test]
    fn one_room_in_makes_the_booking_checked_in() {
        let booking =
            booking_with_rooms(&[RoomBookingStatus::CheckedIn, RoomBookingStatus::Pending]);
        assert_eq!(derive_booking_status(&booking), BookingStatus::CheckedIn);
    }

    #[test]
    fn all_rooms_out_makes_the_booking_checked_out() {
        let booking = booking_with_rooms(&[
            RoomBookingStatus::CheckedOut,
            RoomBookingStatus::CheckedOut,
            RoomBookingStatus::Cancelled,
        ]);
        assert_eq!(derive_booking_status(&booking), BookingStatus::CheckedOut);
    }

    #[test]
    fn pending_rooms_leave_the_aggregate_status_alone() {
        let booking =
            booking_with_rooms(&[RoomBookingStatus::Pending, RoomBookingStatus::Pending]);
        assert_eq!(derive_booking_status(&booking), BookingStatus::Confirmed);
    }
}
