//! Object storage contract and upload path rules.
//!
//! The API layer owns the concrete backend; this module fixes the interface
//! every backend honours and the naming scheme for uploaded objects.

use async_trait::async_trait;

use crate::error::CoreError;

/// Bucket used when an upload does not name one.
pub const DEFAULT_BUCKET: &str = "public-media";

/// Prefix under which all admin uploads are stored.
pub const UPLOAD_PREFIX: &str = "uploads";

/// Extensions accepted by the media upload endpoint. Formats that can carry
/// script (svg, html) are excluded because media is served from the API origin.
pub const ALLOWED_MEDIA_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "webp", "gif", "mp4", "webm", "pdf"];

/// A durable object store that hands back public URLs.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` at `bucket/path` and return its public URL.
    ///
    /// Must not overwrite an existing object.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<String, CoreError>;

    /// Remove an object. Missing objects are not an error.
    async fn delete(&self, bucket: &str, path: &str) -> Result<(), CoreError>;
}

/// Bucket names are lowercase ASCII letters, digits, and dashes.
pub fn validate_bucket(bucket: &str) -> Result<(), CoreError> {
    let valid = !bucket.is_empty()
        && bucket.len() <= 63
        && bucket
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !bucket.starts_with('-');
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid bucket name '{bucket}'"
        )))
    }
}

/// Lowercased extension of an uploaded file name, validated against
/// [`ALLOWED_MEDIA_EXTENSIONS`].
pub fn media_extension(file_name: &str) -> Result<String, CoreError> {
    let ext = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_lowercase(),
        _ => {
            return Err(CoreError::Validation(format!(
                "File '{file_name}' has no extension"
            )))
        }
    };
    if ALLOWED_MEDIA_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported file type '.{ext}'. Supported: {}",
            ALLOWED_MEDIA_EXTENSIONS.join(", ")
        )))
    }
}

/// Object path for an upload: `uploads/<unix_millis>-<uuid>.<ext>`.
pub fn upload_path(timestamp_millis: i64, unique: uuid::Uuid, ext: &str) -> String {
    format!("{UPLOAD_PREFIX}/{timestamp_millis}-{unique}.{ext}")
}

/// Reject paths that could escape the bucket directory.
pub fn validate_object_path(path: &str) -> Result<(), CoreError> {
    if path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
    {
        return Err(CoreError::Validation(format!(
            "Invalid object path '{path}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_names() {
        assert!(validate_bucket(DEFAULT_BUCKET).is_ok());
        assert!(validate_bucket("site-images2").is_ok());
        assert!(validate_bucket("").is_err());
        assert!(validate_bucket("Public").is_err());
        assert!(validate_bucket("../etc").is_err());
        assert!(validate_bucket("-lead").is_err());
    }

    #[test]
    fn extensions() {
        assert_eq!(media_extension("Hero.JPG").unwrap(), "jpg");
        assert_eq!(media_extension("a.b.png").unwrap(), "png");
        assert!(media_extension("script.sh").is_err());
        assert!(media_extension("logo.svg").is_err());
        assert!(media_extension("page.HTML").is_err());
        assert!(media_extension("noext").is_err());
        assert!(media_extension(".png").is_err());
    }

    #[test]
    fn upload_path_shape() {
        let id = uuid::Uuid::nil();
        let path = upload_path(1_700_000_000_000, id, "png");
        assert_eq!(
            path,
            "uploads/1700000000000-00000000-0000-0000-0000-000000000000.png"
        );
        assert!(validate_object_path(&path).is_ok());
    }

    #[test]
    fn object_path_traversal_rejected() {
        assert!(validate_object_path("uploads/../../etc/passwd").is_err());
        assert!(validate_object_path("/abs").is_err());
        assert!(validate_object_path("a//b").is_err());
    }
}
