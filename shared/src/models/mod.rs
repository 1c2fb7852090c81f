//! Domain models for the front-desk engine

pub mod booking;
pub mod guest;
pub mod invoice;
pub mod minibar;
pub mod promotion;
pub mod property;
pub mod room;
pub mod room_type;
pub mod surcharge;

pub use booking::{Booking, BookingRoom, BookingRoomType, BookingStatus, RoomBookingStatus};
pub use guest::Guest;
pub use invoice::{ChargeSource, Invoice, InvoiceLine};
pub use minibar::{MinibarEntry, MinibarItem};
pub use promotion::{Promotion, PromotionScope};
pub use property::Property;
pub use room::{Room, RoomStatus};
pub use room_type::{DateRangePrice, PricingRuleSet, RoomType};
pub use surcharge::{StayContext, SurchargeKind, SurchargeRule};
