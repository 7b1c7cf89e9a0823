use std::str::FromStr;

use codex_db::table::Suggestion;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use validator::Validate;

use crate::Status;

#[derive(Validate)]
pub struct SubmitInput {
    pub user_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

#[derive(Clone)]
pub struct Command(pub SqlitePool);

impl Command {
    #[tracing::instrument(skip_all, fields(user = input.user_id))]
    pub async fn submit(&self, input: SubmitInput) -> codex_shared::Result<i64> {
        input.validate()?;

        let statement = Query::insert()
            .into_table(Suggestion::Table)
            .columns([
                Suggestion::Title,
                Suggestion::Content,
                Suggestion::UserId,
                Suggestion::Status,
                Suggestion::CreatedAt,
            ])
            .values_panic([
                input.title.into(),
                input.content.into(),
                input.user_id.into(),
                Status::New.to_string().into(),
                codex_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(result.last_insert_rowid())
    }

    /// Unknown status values leave the suggestion untouched.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, id: i64, status: &str) -> codex_shared::Result<()> {
        self.ensure_exists(id).await?;

        let Ok(status) = Status::from_str(status) else {
            tracing::warn!(suggestion = id, status, "ignoring unknown suggestion status");
            return Ok(());
        };

        let statement = Query::update()
            .table(Suggestion::Table)
            .values([(Suggestion::Status, status.to_string().into())])
            .and_where(Expr::col(Suggestion::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> codex_shared::Result<()> {
        let statement = Query::delete()
            .from_table(Suggestion::Table)
            .and_where(Expr::col(Suggestion::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        if result.rows_affected() == 0 {
            return Err(codex_shared::Error::NotFound("suggestion"));
        }

        Ok(())
    }

    async fn ensure_exists(&self, id: i64) -> codex_shared::Result<()> {
        let statement = Query::select()
            .column(Suggestion::Id)
            .from(Suggestion::Table)
            .and_where(Expr::col(Suggestion::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
            .ok_or(codex_shared::Error::NotFound("suggestion"))?;

        Ok(())
    }
}
