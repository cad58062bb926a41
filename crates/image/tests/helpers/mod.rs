use std::{path::PathBuf, str::FromStr, sync::Arc};

use bytes::Bytes;
use mediavault_image::{Command, LocalStore, UploadInput};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_command(path: PathBuf, media_root: PathBuf) -> anyhow::Result<Command> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    mediavault_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    Ok(Command::new(pool, Arc::new(LocalStore::new(media_root))))
}

#[allow(dead_code)]
pub fn png_input(filename: Option<&str>) -> UploadInput {
    UploadInput {
        filename: filename.map(str::to_owned),
        file_name: Some("photo.png".to_owned()),
        content_type: "image/png".to_owned(),
        data: Bytes::from_static(b"\x89PNG\r\n\x1a\nfake"),
        width: Some(640),
        height: Some(480),
    }
}
