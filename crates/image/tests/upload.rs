use bytes::Bytes;
use mediavault_image::{ImageError, UploadInput};
use temp_dir::TempDir;
use time::OffsetDateTime;

mod helpers;

#[tokio::test]
async fn test_upload_stores_object_and_row() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_command(dir.child("db.sqlite3"), dir.child("media")).await?;
    let now = OffsetDateTime::from_unix_timestamp(1_718_000_000)?; // 2024-06-10

    let image = cmd
        .upload_at(helpers::png_input(Some("holiday")), now)
        .await?;

    assert_eq!(image.filename, "holiday");
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.size_bytes, 12);
    assert_eq!(image.width, Some(640));
    assert_eq!(image.height, Some(480));
    assert_eq!(image.uploaded_at, 1_718_000_000_000);
    assert_eq!(image.storage_key, format!("2024/06/{}.png", image.id));

    let stored = std::fs::read(dir.child("media").join(&image.storage_key))?;
    assert_eq!(stored, b"\x89PNG\r\n\x1a\nfake");

    assert_eq!(cmd.find(&image.id).await?, Some(image));

    Ok(())
}

#[tokio::test]
async fn test_upload_filename_fallbacks() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_command(dir.child("db.sqlite3"), dir.child("media")).await?;

    let image = cmd.upload(helpers::png_input(None)).await?;
    assert_eq!(image.filename, "photo.png");

    let image = cmd
        .upload(UploadInput {
            filename: None,
            file_name: None,
            content_type: "image/jpeg".to_owned(),
            data: Bytes::from_static(b"jpeg"),
            width: None,
            height: None,
        })
        .await?;
    assert_eq!(image.filename, "upload");
    assert!(image.storage_key.ends_with(".jpg"));
    assert_eq!(image.width, None);

    Ok(())
}

#[tokio::test]
async fn test_upload_rejects_unsupported_type() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_command(dir.child("db.sqlite3"), dir.child("media")).await?;

    let mut input = helpers::png_input(None);
    input.content_type = "image/svg+xml".to_owned();

    let err = cmd.upload(input).await.unwrap_err();
    assert!(matches!(err, ImageError::UnsupportedType(_)));
    assert_eq!(err.to_string(), "Unsupported file type");
    assert!(cmd.list(1, 20).await?.is_empty());
    assert!(!dir.child("media").exists());

    Ok(())
}

#[tokio::test]
async fn test_list_is_paginated_newest_first() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_command(dir.child("db.sqlite3"), dir.child("media")).await?;

    let mut ids = vec![];
    for i in 0..5 {
        let at = OffsetDateTime::from_unix_timestamp(1_700_000_000 + i)?;
        ids.push(cmd.upload_at(helpers::png_input(None), at).await?.id);
    }
    ids.reverse();

    let first: Vec<String> = cmd.list(1, 2).await?.into_iter().map(|i| i.id).collect();
    let second: Vec<String> = cmd.list(2, 2).await?.into_iter().map(|i| i.id).collect();
    let third: Vec<String> = cmd.list(3, 2).await?.into_iter().map(|i| i.id).collect();

    assert_eq!(first, ids[0..2].to_vec());
    assert_eq!(second, ids[2..4].to_vec());
    assert_eq!(third, ids[4..5].to_vec());
    assert!(cmd.list(4, 2).await?.is_empty());

    // page 0 is treated as the first page
    let zero: Vec<String> = cmd.list(0, 2).await?.into_iter().map(|i| i.id).collect();
    assert_eq!(zero, first);

    Ok(())
}

#[tokio::test]
async fn test_delete_removes_object_then_row() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_command(dir.child("db.sqlite3"), dir.child("media")).await?;

    let image = cmd.upload(helpers::png_input(None)).await?;
    let path = dir.child("media").join(&image.storage_key);
    assert!(path.exists());

    cmd.delete(&image.id).await?;

    assert!(!path.exists());
    assert_eq!(cmd.find(&image.id).await?, None);

    Ok(())
}

#[tokio::test]
async fn test_delete_unknown_is_not_found() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_command(dir.child("db.sqlite3"), dir.child("media")).await?;

    let err = cmd.delete("missing").await.unwrap_err();
    assert!(matches!(err, ImageError::NotFound));

    Ok(())
}

#[tokio::test]
async fn test_delete_tolerates_missing_object() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_command(dir.child("db.sqlite3"), dir.child("media")).await?;

    let image = cmd.upload(helpers::png_input(None)).await?;
    std::fs::remove_file(dir.child("media").join(&image.storage_key))?;

    cmd.delete(&image.id).await?;
    assert_eq!(cmd.find(&image.id).await?, None);

    Ok(())
}
