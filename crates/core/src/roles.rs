//! Well-known role names.
//!
//! These must match the `CHECK` constraint on `profiles.role` in
//! `20260301000002_create_identities_and_profiles.sql`.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PROVIDER: &str = "provider";
pub const ROLE_USER: &str = "user";

/// Accepted on input as an alias of [`ROLE_USER`].
pub const ROLE_TOURIST_ALIAS: &str = "tourist";

/// All role values that may be stored.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_PROVIDER, ROLE_USER];

/// Normalize a client-supplied role name to its stored form.
///
/// `tourist` maps to `user`; anything outside [`VALID_ROLES`] is rejected.
pub fn normalize_role(role: &str) -> Result<&'static str, CoreError> {
    let lowered = role.trim().to_lowercase();
    match lowered.as_str() {
        ROLE_ADMIN => Ok(ROLE_ADMIN),
        ROLE_PROVIDER => Ok(ROLE_PROVIDER),
        ROLE_USER | ROLE_TOURIST_ALIAS => Ok(ROLE_USER),
        _ => Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_normalize_to_themselves() {
        assert_eq!(normalize_role("admin").unwrap(), ROLE_ADMIN);
        assert_eq!(normalize_role("provider").unwrap(), ROLE_PROVIDER);
        assert_eq!(normalize_role("user").unwrap(), ROLE_USER);
    }

    #[test]
    fn tourist_is_an_alias_for_user() {
        assert_eq!(normalize_role("tourist").unwrap(), ROLE_USER);
        assert_eq!(normalize_role("  Tourist ").unwrap(), ROLE_USER);
    }

    #[test]
    fn unknown_role_rejected() {
        let err = normalize_role("superuser").unwrap_err();
        assert!(err.to_string().contains("Invalid role"));
    }
}
