//! Room allocation
//!
//! All-or-nothing selection of free physical rooms for a date window.
//! The overlap check scans the active-booking index inside the command's
//! write transaction; redb's single-writer model makes check plus insert
//! atomic, so two commands can never be granted the same room for
//! overlapping nights.

use chrono::NaiveDate;
use shared::models::{Room, RoomBookingStatus, RoomStatus};
use shared::{BookingError, BookingResult};

use super::traits::CommandContext;

/// Half-open interval overlap: `[a_start, a_end)` vs `[b_start, b_end)`
pub fn overlaps(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_start < b_end && b_start < a_end
}

/// Whether any non-cancelled allocation of `room_id` overlaps the window.
/// `exclude_booking_room` skips the allocation being moved or extended.
pub fn room_conflicts(
    ctx: &CommandContext<'_>,
    room_id: i64,
    start: NaiveDate,
    end: NaiveDate,
    exclude_booking_room: Option<&str>,
) -> BookingResult<bool> {
    for booking in ctx.active_bookings()? {
        for alloc in booking.rooms() {
            if alloc.room_id != room_id || alloc.status == RoomBookingStatus::Cancelled {
                continue;
            }
            if exclude_booking_room == Some(alloc.id.as_str()) {
                continue;
            }
            if overlaps(start, end, alloc.start_date, alloc.end_date) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Select `count` free rooms of a room type for `[start, end)`.
///
/// Candidates are walked in room-number order (id breaks ties) so the same
/// inputs always produce the same assignment. Out-of-service rooms and ids
/// in `claimed` (rooms taken by an earlier line of the same command) are
/// skipped. Fewer free rooms than requested fails the whole allocation.
pub fn allocate(
    ctx: &CommandContext<'_>,
    room_type_id: i64,
    count: u32,
    start: NaiveDate,
    end: NaiveDate,
    claimed: &[i64],
) -> BookingResult<Vec<Room>> {
    let mut candidates = ctx.rooms_of_type(room_type_id)?;
    candidates.sort_by(|a, b| a.number.cmp(&b.number).then(a.id.cmp(&b.id)));

    let mut selected = Vec::new();
    for room in candidates {
        if selected.len() == count as usize {
            break;
        }
        if room.status == RoomStatus::OutOfService || claimed.contains(&room.id) {
            continue;
        }
        if !room_conflicts(ctx, room.id, start, end, None)? {
            selected.push(room);
        }
    }

    if selected.len() < count as usize {
        return Err(BookingError::insufficient_availability(format!(
            "requested {} rooms of type {} for {}..{}, only {} free",
            count,
            room_type_id,
            start,
            end,
            selected.len()
        )));
    }
    Ok(selected)
}
