//! Domain rules for the ecotour marketplace.
//!
//! This crate has no IO of its own: it defines identifiers, the error
//! vocabulary, the booking state machine, pricing and eco-points arithmetic,
//! and the traits the API layer implements for external collaborators.

pub mod audit;
pub mod booking;
pub mod catalog;
pub mod eco_points;
pub mod error;
pub mod identity;
pub mod pagination;
pub mod retry;
pub mod roles;
pub mod storage;
pub mod types;
