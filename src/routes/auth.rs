use axum::{Json, body::Bytes, extract::State};
use axum_extra::extract::CookieJar;
use serde_json::{Value, json};

use crate::{error::AppError, routes::AppState};

/// POST /api/auth/login - exchange the shared password for a session cookie
///
/// The body is parsed by hand so malformed JSON and a wrong password stay
/// distinguishable (400 vs 401).
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let input: Value = serde_json::from_slice(&body).map_err(|_| AppError::InvalidJson)?;
    let password = input.get("password").and_then(Value::as_str);

    let cookie = state.issuer.login_cookie(password)?;

    tracing::info!("Session issued");

    Ok((jar.add(cookie), Json(json!({ "ok": true }))))
}

/// POST /api/auth/logout - always succeeds
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    (jar.add(state.issuer.logout()), Json(json!({ "ok": true })))
}
