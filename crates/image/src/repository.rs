use mediavault_db::table::Images;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

/// Metadata row of an uploaded image
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Image {
    pub id: String,
    pub filename: String,
    pub storage_key: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub width: Option<i64>,
    pub height: Option<i64>,
    /// Unix timestamp in milliseconds
    pub uploaded_at: i64,
}

const COLUMNS: [Images; 8] = [
    Images::Id,
    Images::Filename,
    Images::StorageKey,
    Images::MimeType,
    Images::SizeBytes,
    Images::Width,
    Images::Height,
    Images::UploadedAt,
];

pub(crate) async fn insert(pool: &SqlitePool, image: &Image) -> sqlx::Result<()> {
    let statement = Query::insert()
        .into_table(Images::Table)
        .columns(COLUMNS)
        .values_panic([
            image.id.to_owned().into(),
            image.filename.to_owned().into(),
            image.storage_key.to_owned().into(),
            image.mime_type.to_owned().into(),
            image.size_bytes.into(),
            image.width.into(),
            image.height.into(),
            image.uploaded_at.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

/// Newest first. `page` starts at 1.
pub(crate) async fn list(pool: &SqlitePool, page: u32, page_size: u32) -> sqlx::Result<Vec<Image>> {
    let offset = u64::from(Ord::max(page, 1) - 1) * u64::from(page_size);

    let statement = Query::select()
        .columns(COLUMNS)
        .from(Images::Table)
        .order_by(Images::UploadedAt, Order::Desc)
        .order_by(Images::Id, Order::Desc)
        .limit(u64::from(page_size))
        .offset(offset)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_as_with::<_, Image, _>(&sql, values)
        .fetch_all(pool)
        .await
}

pub(crate) async fn find(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<Image>> {
    let statement = Query::select()
        .columns(COLUMNS)
        .from(Images::Table)
        .and_where(Expr::col(Images::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_as_with::<_, Image, _>(&sql, values)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn delete(pool: &SqlitePool, id: &str) -> sqlx::Result<()> {
    let statement = Query::delete()
        .from_table(Images::Table)
        .and_where(Expr::col(Images::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}
