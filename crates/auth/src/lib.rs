//! Shared-password authentication with stateless signed cookies.
//!
//! [`TokenCodec`] signs and verifies tokens, [`cookie`] moves them in and
//! out of HTTP headers, [`SessionIssuer`] trades the password for a token
//! and [`AuthGate`] decides, per request, whether to admit, deny or
//! redirect.

pub mod cookie;
mod gate;
mod session;
pub mod token;

pub use cookie::AUTH_COOKIE_NAME;
pub use gate::*;
pub use session::*;
pub use token::TokenCodec;
