mod images;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "mediavault",
    "m0001",
    vec_box![],
    vec_box![images::CreateTable, images::CreateIdx1]
);
