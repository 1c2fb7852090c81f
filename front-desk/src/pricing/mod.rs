//! Pricing components
//!
//! - **rates**: nightly rate resolution from the layered rule set
//! - **surcharges**: additive checkout adjustments
//! - **discounts**: promotion code validation and discount lines

pub mod discounts;
pub mod rates;
pub mod surcharges;

pub use discounts::validate_and_apply;
pub use rates::{quote_stay, resolve_nightly_rate};
pub use surcharges::apply_surcharges;
