use codex_db::table::User;
use sea_query::{Cond, Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use validator::Validate;

use crate::password::{hash_password, verify_password};

const ALREADY_EXISTS: &str = "A user with this username or email already exists";
const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(email, length(max = 320))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(FromRow)]
struct Credentials {
    id: i64,
    password_hash: String,
}

#[derive(Clone)]
pub struct Command(pub SqlitePool);

impl Command {
    #[tracing::instrument(skip_all, fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> codex_shared::Result<i64> {
        input.validate()?;

        let statement = Query::select()
            .column(User::Id)
            .from(User::Table)
            .cond_where(
                Cond::any()
                    .add(Expr::col(User::Username).eq(&input.username))
                    .add(Expr::col(User::Email).eq(&input.email)),
            )
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let existing = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        if existing.is_some() {
            return Err(codex_shared::Error::User(ALREADY_EXISTS.to_owned()));
        }

        let password_hash = hash_password(&input.password)?;
        let statement = Query::insert()
            .into_table(User::Table)
            .columns([
                User::Username,
                User::Email,
                User::PasswordHash,
                User::CreatedAt,
            ])
            .values_panic([
                input.username.into(),
                input.email.into(),
                password_hash.into(),
                codex_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = match sqlx::query_with(&sql, values).execute(&self.0).await {
            Ok(result) => result,
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                return Err(codex_shared::Error::User(ALREADY_EXISTS.to_owned()));
            }
            Err(err) => return Err(err.into()),
        };

        let id = result.last_insert_rowid();
        tracing::info!(user = id, "user registered");

        Ok(id)
    }

    #[tracing::instrument(skip_all, fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> codex_shared::Result<i64> {
        let statement = Query::select()
            .columns([User::Id, User::PasswordHash])
            .from(User::Table)
            .and_where(Expr::col(User::Username).eq(&input.username))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let credentials = sqlx::query_as_with::<_, Credentials, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        match credentials {
            Some(credentials) if verify_password(&input.password, &credentials.password_hash) => {
                Ok(credentials.id)
            }
            _ => Err(codex_shared::Error::User(INVALID_CREDENTIALS.to_owned())),
        }
    }
}
