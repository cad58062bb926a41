//! Image collaborators of the media service: metadata rows in SQLite and
//! object bytes in a pluggable store.

mod command;
mod error;
mod repository;
mod store;

pub use command::*;
pub use error::*;
pub use repository::Image;
pub use store::*;
