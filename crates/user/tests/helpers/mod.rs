use std::{path::PathBuf, str::FromStr};

use codex_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    codex_db::migrate(&pool).await?;

    Ok(pool)
}

#[allow(dead_code)]
pub async fn create_user(
    cmd: &codex_user::Command,
    name: impl Into<String>,
) -> anyhow::Result<i64> {
    let name = name.into();
    let id = cmd
        .register(RegisterInput {
            email: format!("{name}@codex.localhost"),
            username: name,
            password: "my_password".to_owned(),
        })
        .await?;

    Ok(id)
}
