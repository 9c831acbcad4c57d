//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Read-only
//! listings take `&PgPool`. Methods that run inside a caller's transaction
//! accept any [`sqlx::PgExecutor`] (`&pool` or `&mut *tx`), and multi-statement
//! methods take `&mut PgConnection` so they always share the caller's
//! transaction.

pub mod analytics_repo;
pub mod audit_repo;
pub mod booking_repo;
pub mod cms_repo;
pub mod eco_points_config_repo;
pub mod eco_points_repo;
pub mod experience_repo;
pub mod identity_repo;
pub mod marketplace_repo;
pub mod media_repo;
pub mod profile_repo;
pub mod provider_repo;
pub mod review_repo;
pub mod slot_repo;

pub use analytics_repo::AnalyticsRepo;
pub use audit_repo::AdminAuditRepo;
pub use booking_repo::BookingRepo;
pub use cms_repo::CmsTextRepo;
pub use eco_points_config_repo::EcoPointsConfigRepo;
pub use eco_points_repo::EcoPointsRepo;
pub use experience_repo::ExperienceRepo;
pub use identity_repo::IdentityRepo;
pub use marketplace_repo::MarketplaceRepo;
pub use media_repo::MediaRepo;
pub use profile_repo::ProfileRepo;
pub use provider_repo::ProviderRepo;
pub use review_repo::ReviewRepo;
pub use slot_repo::SlotRepo;
