use std::{path::PathBuf, str::FromStr};

use codex_suggestion::SubmitInput;
use codex_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    codex_db::migrate(&pool).await?;

    Ok(pool)
}

pub async fn create_user(pool: &SqlitePool, name: impl Into<String>) -> anyhow::Result<i64> {
    let name = name.into();
    let id = codex_user::Command(pool.clone())
        .register(RegisterInput {
            email: format!("{name}@codex.localhost"),
            username: name,
            password: "my_password".to_owned(),
        })
        .await?;

    Ok(id)
}

#[allow(dead_code)]
pub async fn create_submit_all(
    cmd: &codex_suggestion::Command,
    user_id: i64,
    titles: impl IntoIterator<Item = impl Into<String>>,
) -> anyhow::Result<Vec<i64>> {
    let mut ids = vec![];
    for title in titles.into_iter() {
        let id = cmd
            .submit(SubmitInput {
                user_id,
                title: title.into(),
                content: "my suggestion".to_owned(),
            })
            .await?;
        ids.push(id);
    }

    Ok(ids)
}
