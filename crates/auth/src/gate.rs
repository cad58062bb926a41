//! Per-request admission policy.

use crate::{cookie, token::TokenCodec};

/// Whether the current request carried a valid session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Session {
    Unauthenticated,
    Authenticated,
}

impl Session {
    pub fn is_authenticated(self) -> bool {
        matches!(self, Session::Authenticated)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Let the request through with the given session state
    Admit(Session),
    /// API caller without a valid session, answer 401 JSON
    DenyUnauthorized,
    /// Browser navigation without a valid session, redirect to login
    RedirectToLogin,
}

pub const DEFAULT_PUBLIC_PATHS: [&str; 2] = ["/login", "/api/auth/login"];
pub const DEFAULT_API_PREFIX: &str = "/api/";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Stateless request gate.
///
/// Built once from configuration and shared read-only by every request.
/// An empty secret leaves the gate without a codec, in which case no
/// protected path is ever admitted.
#[derive(Clone, Debug)]
pub struct AuthGate {
    codec: Option<TokenCodec>,
    public_paths: Vec<String>,
    api_prefix: String,
    login_path: String,
}

impl AuthGate {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        let codec = (!secret.is_empty()).then(|| TokenCodec::new(secret));

        Self {
            codec,
            public_paths: DEFAULT_PUBLIC_PATHS.iter().map(|p| p.to_string()).collect(),
            api_prefix: DEFAULT_API_PREFIX.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
        }
    }

    pub fn public_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn login_location(&self) -> &str {
        &self.login_path
    }

    /// `path` equals a public path or lies below it (`/login` matches
    /// `/login/x` but not `/loginx`).
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|public| {
            path == public
                || path
                    .strip_prefix(public.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    pub fn is_api(&self, path: &str) -> bool {
        path.starts_with(&self.api_prefix)
    }

    /// Session state carried by `cookie_header`, ignoring the path.
    pub fn session(&self, cookie_header: Option<&str>) -> Session {
        let verified = match (&self.codec, cookie::extract(cookie_header)) {
            (Some(codec), Some(token)) => codec.verify(token).is_some(),
            _ => false,
        };

        if verified {
            Session::Authenticated
        } else {
            Session::Unauthenticated
        }
    }

    pub fn decide(&self, path: &str, cookie_header: Option<&str>) -> Decision {
        if self.is_public(path) {
            return Decision::Admit(Session::Unauthenticated);
        }

        match self.session(cookie_header) {
            Session::Authenticated => Decision::Admit(Session::Authenticated),
            Session::Unauthenticated if self.is_api(path) => Decision::DenyUnauthorized,
            Session::Unauthenticated => Decision::RedirectToLogin,
        }
    }
}
