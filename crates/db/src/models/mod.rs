//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod analytics;
pub mod audit;
pub mod booking;
pub mod cms;
pub mod eco_points;
pub mod experience;
pub mod identity;
pub mod marketplace;
pub mod media;
pub mod profile;
pub mod provider;
pub mod review;
pub mod slot;
