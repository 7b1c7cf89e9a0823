use std::{path::PathBuf, str::FromStr};

use codex_catalog::{Command, FactionInput, HeroInput};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    codex_db::migrate(&pool).await?;

    Ok(pool)
}

pub async fn create_faction(cmd: &Command, name: impl Into<String>) -> anyhow::Result<i64> {
    let id = cmd
        .create_faction(FactionInput { name: name.into() }, None)
        .await?;

    Ok(id)
}

pub async fn create_hero(
    cmd: &Command,
    name: impl Into<String>,
    faction_id: Option<i64>,
) -> anyhow::Result<i64> {
    let id = cmd
        .create_hero(
            HeroInput {
                name: name.into(),
                description: Some("a hero".to_owned()),
                faction_id,
            },
            None,
        )
        .await?;

    Ok(id)
}
