//! Booking workflow: admission (`create`) and status transitions (`lifecycle`).
//!
//! Each operation runs in one database transaction. Capacity rows are taken
//! before the booking row and the eco-points balance row last, in both
//! operations.

pub mod create;
pub mod lifecycle;

pub use create::{create_booking, CreateBookingRequest};
pub use lifecycle::transition_booking;
