use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use mediavault_auth::{Decision, Session};
use serde_json::json;

use crate::routes::AppState;

/// Session state of the current request, inserted by [`auth_middleware`]
#[derive(Clone, Copy, Debug)]
pub struct Auth {
    pub session: Session,
}

impl Auth {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

/// Joins every `Cookie` header into one `; ` separated value
fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join("; "))
    }
}

/// Authentication middleware guarding every route
///
/// Public paths pass through untouched. Otherwise the `auth_token` cookie
/// must carry a valid signature:
/// - API paths answer 401 `{"error":"Unauthorized"}`
/// - anything else is redirected to the login page
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let cookies = cookie_header(req.headers());
    let path = req.uri().path();

    match state.gate.decide(path, cookies.as_deref()) {
        Decision::Admit(session) => {
            tracing::debug!(path, authenticated = session.is_authenticated(), "Request admitted");
            req.extensions_mut().insert(Auth { session });
            next.run(req).await
        }
        Decision::DenyUnauthorized => {
            tracing::debug!(path, "Missing or invalid session, refusing API request");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response()
        }
        Decision::RedirectToLogin => {
            tracing::debug!(path, "Missing or invalid session, redirecting to login");
            Redirect::to(state.gate.login_location()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_header_joins_multiple_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("auth_token=abc"));

        assert_eq!(
            cookie_header(&headers).as_deref(),
            Some("theme=dark; auth_token=abc")
        );
    }

    #[test]
    fn test_cookie_header_absent() {
        assert_eq!(cookie_header(&HeaderMap::new()), None);
    }
}
