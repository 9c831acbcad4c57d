//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- HS256 access-token generation and validation.
//! - [`identity`] -- PostgreSQL-backed [`IdentityProvider`](ecotour_core::identity::IdentityProvider).
//! - [`accounts`] -- Identity + profile creation with compensation.

pub mod accounts;
pub mod identity;
pub mod jwt;
pub mod password;
