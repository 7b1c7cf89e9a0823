mod faction;
mod hero;
mod suggestion;
mod user;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "codex",
    "m0001",
    vec_box![],
    vec_box![
        faction::CreateTable,
        hero::CreateTable,
        hero::CreateIdx1,
        user::CreateTable,
        user::CreateUk1,
        user::CreateUk2,
        suggestion::CreateTable,
        suggestion::CreateIdx1
    ]
);
