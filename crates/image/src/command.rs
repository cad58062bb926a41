use std::sync::Arc;

use bytes::Bytes;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;

use crate::{Image, ImageError, ObjectStore, Result, repository};

/// Fallback name when the upload carries neither a name field nor a file name
pub const DEFAULT_FILENAME: &str = "upload";

pub fn is_allowed_mime_type(mime_type: &str) -> bool {
    extension_for(mime_type).is_some()
}

/// File extension for an accepted MIME type (`image/jpeg` → `jpg`).
/// Anything outside jpeg, png, gif, webp and avif is refused.
pub fn extension_for(mime_type: &str) -> Option<&'static str> {
    match mime_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/avif" => Some("avif"),
        _ => None,
    }
}

/// `<YYYY>/<MM>/<id>.<ext>`, month zero padded.
pub fn storage_key(at: OffsetDateTime, id: &str, extension: &str) -> String {
    format!(
        "{:04}/{:02}/{id}.{extension}",
        at.year(),
        u8::from(at.month())
    )
}

pub fn new_id() -> String {
    Ulid::new().to_string().to_lowercase()
}

fn unix_millis(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}

pub struct UploadInput {
    /// Explicit display name, preferred over the file name
    pub filename: Option<String>,
    /// Name of the uploaded file as sent by the client
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Bytes,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Clone)]
pub struct Command {
    pub pool: SqlitePool,
    pub store: Arc<dyn ObjectStore>,
}

impl Command {
    pub fn new(pool: SqlitePool, store: Arc<dyn ObjectStore>) -> Self {
        Self { pool, store }
    }

    /// Stores the bytes, then records the metadata row.
    pub async fn upload(&self, input: UploadInput) -> Result<Image> {
        self.upload_at(input, OffsetDateTime::now_utc()).await
    }

    pub async fn upload_at(&self, input: UploadInput, now: OffsetDateTime) -> Result<Image> {
        let Some(extension) = extension_for(&input.content_type) else {
            return Err(ImageError::UnsupportedType(input.content_type));
        };

        let id = new_id();
        let key = storage_key(now, &id, extension);
        let image = Image {
            id,
            filename: input
                .filename
                .or(input.file_name)
                .unwrap_or_else(|| DEFAULT_FILENAME.to_owned()),
            storage_key: key.to_owned(),
            mime_type: input.content_type.to_owned(),
            size_bytes: input.data.len() as i64,
            width: input.width,
            height: input.height,
            uploaded_at: unix_millis(now),
        };

        self.store
            .put(&key, input.data, &input.content_type)
            .await?;

        if let Err(e) = repository::insert(&self.pool, &image).await {
            if let Err(cleanup) = self.store.delete(&key).await {
                tracing::error!(key = %key, error = %cleanup, "Failed to remove orphaned object");
            }

            return Err(e.into());
        }

        tracing::info!(id = %image.id, key = %key, size = image.size_bytes, "Image uploaded");

        Ok(image)
    }

    pub async fn list(&self, page: u32, page_size: u32) -> Result<Vec<Image>> {
        Ok(repository::list(&self.pool, page, page_size).await?)
    }

    pub async fn find(&self, id: &str) -> Result<Option<Image>> {
        Ok(repository::find(&self.pool, id).await?)
    }

    /// Removes the object first, then the row.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let Some(image) = repository::find(&self.pool, id).await? else {
            return Err(ImageError::NotFound);
        };

        self.store.delete(&image.storage_key).await?;
        repository::delete(&self.pool, id).await?;

        tracing::info!(id, key = %image.storage_key, "Image deleted");

        Ok(())
    }
}
