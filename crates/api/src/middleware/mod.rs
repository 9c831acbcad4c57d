//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Admin gate backed by the stored profile.
//! - [`rbac::RequireProvider`] -- Requires an active provider-role profile.

pub mod auth;
pub mod rbac;
