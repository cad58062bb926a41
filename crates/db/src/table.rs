use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Images {
    Table,
    Id,
    Filename,
    StorageKey,
    MimeType,
    SizeBytes,
    Width,
    Height,
    UploadedAt,
}
