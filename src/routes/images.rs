use axum::{
    Json,
    extract::{Multipart, Path, Query, State, multipart::MultipartRejection},
};
use bytes::Bytes;
use mediavault_image::{Image, ImageError, UploadInput};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{error::AppError, routes::AppState};

const INVALID_FORM: AppError = AppError::BadRequest("Invalid form data");

/// Image row as exposed over the API
#[derive(Debug, Serialize)]
pub struct ImageView {
    pub id: String,
    pub url: String,
    pub filename: String,
    pub storage_key: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub uploaded_at: String,
}

impl ImageView {
    pub fn new(state: &AppState, image: Image) -> Self {
        Self {
            url: state.object_url(&image.storage_key),
            uploaded_at: rfc3339_millis(image.uploaded_at),
            id: image.id,
            filename: image.filename,
            storage_key: image.storage_key,
            mime_type: image.mime_type,
            size_bytes: image.size_bytes,
            width: image.width,
            height: image.height,
        }
    }
}

fn rfc3339_millis(millis: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .ok()
        .and_then(|at| at.format(&Rfc3339).ok())
        .unwrap_or_default()
}

/// `page` is kept as text so garbage falls back to the first page
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<String>,
}

pub fn parse_page(page: Option<&str>) -> u32 {
    page.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// GET /api/images?page=N
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, AppError> {
    let page = parse_page(query.page.as_deref());

    let images = state
        .images
        .list(page, state.config.images.page_size)
        .await
        .map_err(|e| AppError::internal("Failed to fetch images", e))?;

    let images: Vec<ImageView> = images
        .into_iter()
        .map(|image| ImageView::new(&state, image))
        .collect();

    Ok(Json(json!({ "images": images, "page": page })))
}

/// Optional integer form field; anything unparsable is treated as absent
fn parse_dimension(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// POST /api/images/upload (multipart: file, filename, width, height)
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageView>, AppError> {
    let mut multipart = multipart.map_err(|_| INVALID_FORM)?;

    let mut file: Option<(Option<String>, String, Bytes)> = None;
    let mut filename = None;
    let mut width = None;
    let mut height = None;

    while let Some(field) = multipart.next_field().await.map_err(|_| INVALID_FORM)? {
        let name = field.name().unwrap_or_default().to_owned();

        match name.as_str() {
            "file" => {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .map(str::to_owned);
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let data = field.bytes().await.map_err(|_| INVALID_FORM)?;

                if !data.is_empty() {
                    file = Some((file_name, content_type, data));
                }
            }
            "filename" => {
                let value = field.text().await.map_err(|_| INVALID_FORM)?;
                filename = Some(value).filter(|v| !v.trim().is_empty());
            }
            "width" => width = parse_dimension(&field.text().await.map_err(|_| INVALID_FORM)?),
            "height" => height = parse_dimension(&field.text().await.map_err(|_| INVALID_FORM)?),
            _ => {}
        }
    }

    let Some((file_name, content_type, data)) = file else {
        return Err(AppError::BadRequest("No file provided"));
    };

    let image = state
        .images
        .upload(UploadInput {
            filename,
            file_name,
            content_type,
            data,
            width,
            height,
        })
        .await
        .map_err(|e| match e {
            ImageError::UnsupportedType(_) => AppError::BadRequest("Unsupported file type"),
            e => AppError::internal("Upload failed", e),
        })?;

    Ok(Json(ImageView::new(&state, image)))
}

/// DELETE /api/images/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    match state.images.delete(&id).await {
        Ok(()) => Ok(Json(json!({ "ok": true }))),
        Err(ImageError::NotFound) => Err(AppError::NotFound),
        Err(e) => Err(AppError::internal("Delete failed", e)),
    }
}
