#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Unsupported file type")]
    UnsupportedType(String),

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, ImageError>;
