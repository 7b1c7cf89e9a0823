use codex_db::table::{Suggestion, User};
use sea_query::{Expr, ExprTrait, JoinType, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

use crate::Status;

#[derive(Debug, Default, FromRow)]
pub struct AdminView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub status: sqlx::types::Text<Status>,
    pub created_at: i64,
}

impl AdminView {
    pub fn is_new(&self) -> bool {
        self.status.0 == Status::New
    }

    pub fn is_read(&self) -> bool {
        self.status.0 == Status::Read
    }

    pub fn is_responded(&self) -> bool {
        self.status.0 == Status::Responded
    }

    pub fn author(&self) -> &str {
        self.username.as_deref().unwrap_or("anonymous")
    }

    pub fn created_at(&self) -> String {
        codex_shared::format_timestamp(self.created_at)
    }
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl Query {
    /// Most recent first, with the author's username when the user still exists.
    pub async fn list_admin(&self) -> anyhow::Result<Vec<AdminView>> {
        let statement = sea_query::Query::select()
            .columns([
                (Suggestion::Table, Suggestion::Id),
                (Suggestion::Table, Suggestion::Title),
                (Suggestion::Table, Suggestion::Content),
                (Suggestion::Table, Suggestion::UserId),
                (Suggestion::Table, Suggestion::Status),
                (Suggestion::Table, Suggestion::CreatedAt),
            ])
            .column((User::Table, User::Username))
            .from(Suggestion::Table)
            .join(
                JoinType::LeftJoin,
                User::Table,
                Expr::col((Suggestion::Table, Suggestion::UserId)).equals((User::Table, User::Id)),
            )
            .order_by_expr(
                Expr::col((Suggestion::Table, Suggestion::CreatedAt)),
                Order::Desc,
            )
            .order_by_expr(Expr::col((Suggestion::Table, Suggestion::Id)), Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, AdminView, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find(&self, id: i64) -> anyhow::Result<Option<AdminView>> {
        let statement = sea_query::Query::select()
            .columns([
                (Suggestion::Table, Suggestion::Id),
                (Suggestion::Table, Suggestion::Title),
                (Suggestion::Table, Suggestion::Content),
                (Suggestion::Table, Suggestion::UserId),
                (Suggestion::Table, Suggestion::Status),
                (Suggestion::Table, Suggestion::CreatedAt),
            ])
            .column((User::Table, User::Username))
            .from(Suggestion::Table)
            .join(
                JoinType::LeftJoin,
                User::Table,
                Expr::col((Suggestion::Table, Suggestion::UserId)).equals((User::Table, User::Id)),
            )
            .and_where(Expr::col((Suggestion::Table, Suggestion::Id)).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, AdminView, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}
