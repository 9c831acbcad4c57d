pub mod admin;
pub mod analytics;
pub mod audit;
pub mod auth;
pub mod booking;
pub mod content;
pub mod eco_points;
pub mod experience;
pub mod marketplace;
pub mod media;
pub mod provider;
