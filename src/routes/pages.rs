use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    error::AppError,
    routes::{AppState, images::ImageView},
    template::render_template,
};

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate;

#[derive(Template)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate {
    pub images: Vec<ImageView>,
    pub page_size: u32,
}

/// GET /login
pub async fn login() -> impl IntoResponse {
    render_template(LoginTemplate)
}

/// GET / - first page of the gallery
pub async fn gallery(State(state): State<AppState>) -> Result<Response, AppError> {
    let page_size = state.config.images.page_size;
    let images = state
        .images
        .list(1, page_size)
        .await
        .map_err(|e| AppError::internal("Failed to fetch images", e))?
        .into_iter()
        .map(|image| ImageView::new(&state, image))
        .collect();

    Ok(render_template(GalleryTemplate { images, page_size }))
}
