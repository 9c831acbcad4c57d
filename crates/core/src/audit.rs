//! Admin audit vocabulary and metadata redaction.
//!
//! Every admin-gated mutation records one `admin_audit` row naming the actor,
//! an action verb from [`actions`], an object type from [`objects`], the
//! object id, and a metadata snapshot passed through
//! [`redact_sensitive_fields`].

/// Action verbs recorded in `admin_audit.action`.
pub mod actions {
    pub const CREATE: &str = "CREATE";
    pub const UPDATE: &str = "UPDATE";
    pub const DELETE: &str = "DELETE";
    pub const UPLOAD: &str = "UPLOAD";
    pub const STATUS_CHANGE: &str = "STATUS_CHANGE";
    pub const ROLE_CHANGE: &str = "ROLE_CHANGE";
    pub const ACTIVATE: &str = "ACTIVATE";
    pub const DEACTIVATE: &str = "DEACTIVATE";
    pub const VERIFY: &str = "VERIFY";
    pub const REJECT: &str = "REJECT";
    pub const CONFIG_CHANGE: &str = "CONFIG_CHANGE";
    pub const RECONCILE: &str = "RECONCILE";
}

/// Object types recorded in `admin_audit.object_type`.
pub mod objects {
    pub const ADMIN_USER: &str = "admin_user";
    pub const PROFILE: &str = "profile";
    pub const BOOKING: &str = "booking";
    pub const EXPERIENCE: &str = "experience";
    pub const EXPERIENCE_SLOT: &str = "experience_slot";
    pub const MARKETPLACE_ITEM: &str = "marketplace_item";
    pub const PROVIDER: &str = "provider";
    pub const CMS_TEXT: &str = "cms_text";
    pub const MEDIA: &str = "media";
    pub const ECO_POINTS_CONFIG: &str = "eco_points_config";
    pub const ECO_POINTS_BALANCE: &str = "eco_points_balance";
}

/// Keys whose values never reach the audit table.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "authorization",
    "credential",
    "api_key",
];

/// Replace the value of any key containing a [`SENSITIVE_FIELDS`] entry with
/// `"[REDACTED]"`, recursing into nested objects and arrays.
pub fn redact_sensitive_fields(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut redacted = serde_json::Map::new();
            for (key, val) in map {
                let lower_key = key.to_lowercase();
                if SENSITIVE_FIELDS.iter().any(|f| lower_key.contains(f)) {
                    redacted.insert(
                        key.clone(),
                        serde_json::Value::String("[REDACTED]".to_string()),
                    );
                } else {
                    redacted.insert(key.clone(), redact_sensitive_fields(val));
                }
            }
            serde_json::Value::Object(redacted)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(redact_sensitive_fields).collect())
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_password_and_keeps_the_rest() {
        let value = json!({ "email": "a@b.c", "password": "hunter22", "full_name": "A" });
        let out = redact_sensitive_fields(&value);
        assert_eq!(out["password"], "[REDACTED]");
        assert_eq!(out["email"], "a@b.c");
        assert_eq!(out["full_name"], "A");
    }

    #[test]
    fn redaction_is_recursive_and_case_insensitive() {
        let value = json!({ "nested": [{ "Access_Token": "x", "ok": 1 }] });
        let out = redact_sensitive_fields(&value);
        assert_eq!(out["nested"][0]["Access_Token"], "[REDACTED]");
        assert_eq!(out["nested"][0]["ok"], 1);
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(redact_sensitive_fields(&json!(5)), json!(5));
        assert_eq!(redact_sensitive_fields(&json!(null)), json!(null));
    }
}
