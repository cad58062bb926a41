use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use sqlx_migrator::{Migrate, Plan};

async fn memory_pool() -> anyhow::Result<SqlitePool> {
    Ok(SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?)
}

#[tokio::test]
async fn test_migrator_creates_images_table() -> anyhow::Result<()> {
    let pool = memory_pool().await?;
    let mut conn = pool.acquire().await?;
    mediavault_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let columns: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info('images')")
        .fetch_all(&pool)
        .await?;
    let columns: Vec<String> = columns.into_iter().map(|c| c.0).collect();

    assert_eq!(
        columns,
        vec![
            "id",
            "filename",
            "storage_key",
            "mime_type",
            "size_bytes",
            "width",
            "height",
            "uploaded_at"
        ]
    );

    let index: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'index' AND name = ?1")
            .bind("idx_images_uploaded_at")
            .fetch_optional(&pool)
            .await?;
    assert!(index.is_some());

    Ok(())
}

#[tokio::test]
async fn test_migrator_is_idempotent() -> anyhow::Result<()> {
    let pool = memory_pool().await?;
    let mut conn = pool.acquire().await?;

    mediavault_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    mediavault_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(())
}
