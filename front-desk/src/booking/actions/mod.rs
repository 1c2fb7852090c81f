//! Booking command handlers, one module per command

pub mod cancel_booking;
pub mod change_room;
pub mod check_in;
pub mod check_out;
pub mod confirm_booking;
pub mod create_booking;
pub mod extend_stay;
pub mod record_minibar;

pub use cancel_booking::CancelBookingAction;
pub use change_room::ChangeRoomAction;
pub use check_in::CheckInAction;
pub use check_out::CheckOutAction;
pub use confirm_booking::ConfirmBookingAction;
pub use create_booking::CreateBookingAction;
pub use extend_stay::ExtendStayAction;
pub use record_minibar::RecordMinibarAction;
