use codex_db::table::User;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(Debug, Default, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: i64,
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl Query {
    pub async fn find(&self, id: i64) -> anyhow::Result<Option<UserRow>> {
        let statement = sea_query::Query::select()
            .columns([User::Id, User::Username, User::Email, User::CreatedAt])
            .from(User::Table)
            .and_where(Expr::col(User::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    pub async fn find_by_username(
        &self,
        username: impl Into<String>,
    ) -> anyhow::Result<Option<UserRow>> {
        let statement = sea_query::Query::select()
            .columns([User::Id, User::Username, User::Email, User::CreatedAt])
            .from(User::Table)
            .and_where(Expr::col(User::Username).eq(username.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    pub async fn count(&self) -> anyhow::Result<i64> {
        let (count,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM "user""#)
            .fetch_one(&self.0)
            .await?;

        Ok(count)
    }
}
