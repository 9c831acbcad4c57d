//! Local filesystem implementation of [`ObjectStorage`].
//!
//! Objects live at `<root>/<bucket>/<path>` and are served back by the
//! `/media` static route, so the public URL is `<public_url>/<bucket>/<path>`.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use ecotour_core::error::CoreError;
use ecotour_core::storage::{validate_bucket, validate_object_path, ObjectStorage};
use tokio::io::AsyncWriteExt;

pub struct LocalObjectStorage {
    root: PathBuf,
    public_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_url: &str) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    fn public_url_for(&self, bucket: &str, path: &str) -> String {
        format!("{}/{bucket}/{path}", self.public_url)
    }
}

fn io_error(action: &str, err: std::io::Error) -> CoreError {
    CoreError::ExternalService(format!("Object storage {action} failed: {err}"))
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        _content_type: Option<&str>,
    ) -> Result<String, CoreError> {
        validate_bucket(bucket)?;
        validate_object_path(path)?;

        let target = self.root.join(bucket).join(path);
        if tokio::fs::try_exists(&target)
            .await
            .map_err(|e| io_error("lookup", e))?
        {
            return Err(CoreError::Conflict(format!(
                "Object {bucket}/{path} already exists"
            )));
        }
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error("mkdir", e))?;
        }

        // Stage then rename: the final name only ever holds complete objects.
        let staging = target.with_extension(format!("{}.partial", uuid::Uuid::new_v4()));
        let mut file = tokio::fs::File::create(&staging)
            .await
            .map_err(|e| io_error("create", e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| io_error("write", e))?;
        file.sync_all().await.map_err(|e| io_error("sync", e))?;
        drop(file);
        tokio::fs::rename(&staging, &target)
            .await
            .map_err(|e| io_error("rename", e))?;

        Ok(self.public_url_for(bucket, path))
    }

    async fn delete(&self, bucket: &str, path: &str) -> Result<(), CoreError> {
        validate_bucket(bucket)?;
        validate_object_path(path)?;

        match tokio::fs::remove_file(self.root.join(bucket).join(path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("delete", e)),
        }
    }
}
