use codex_db::table::{Faction, Hero};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use validator::Validate;

#[derive(Validate)]
pub struct FactionInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Validate)]
pub struct HeroInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub faction_id: Option<i64>,
}

impl HeroInput {
    fn description(&self) -> Option<String> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_owned)
    }
}

#[derive(Clone)]
pub struct Command(pub SqlitePool);

impl Command {
    #[tracing::instrument(skip_all, fields(name = %input.name))]
    pub async fn create_faction(
        &self,
        input: FactionInput,
        image: Option<String>,
    ) -> codex_shared::Result<i64> {
        input.validate()?;

        let statement = Query::insert()
            .into_table(Faction::Table)
            .columns([Faction::Name, Faction::Image])
            .values_panic([input.name.into(), image.into()])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(result.last_insert_rowid())
    }

    /// `image` replaces the stored one only when present.
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update_faction(
        &self,
        id: i64,
        input: FactionInput,
        image: Option<String>,
    ) -> codex_shared::Result<()> {
        input.validate()?;

        let mut statement = Query::update()
            .table(Faction::Table)
            .values([(Faction::Name, input.name.into())])
            .and_where(Expr::col(Faction::Id).eq(id))
            .to_owned();

        if let Some(image) = image {
            statement.value(Faction::Image, image);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        if result.rows_affected() == 0 {
            return Err(codex_shared::Error::NotFound("faction"));
        }

        Ok(())
    }

    /// Removes the faction together with every hero that belongs to it.
    #[tracing::instrument(skip(self))]
    pub async fn delete_faction(&self, id: i64) -> codex_shared::Result<()> {
        let mut tx = self.0.begin().await?;

        let statement = Query::delete()
            .from_table(Hero::Table)
            .and_where(Expr::col(Hero::FactionId).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let heroes = sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = Query::delete()
            .from_table(Faction::Table)
            .and_where(Expr::col(Faction::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(codex_shared::Error::NotFound("faction"));
        }

        tx.commit().await?;

        tracing::info!(
            faction = id,
            heroes = heroes.rows_affected(),
            "faction deleted"
        );

        Ok(())
    }

    #[tracing::instrument(skip_all, fields(name = %input.name))]
    pub async fn create_hero(
        &self,
        input: HeroInput,
        image: Option<String>,
    ) -> codex_shared::Result<i64> {
        input.validate()?;
        self.ensure_faction(input.faction_id).await?;

        let description = input.description();
        let statement = Query::insert()
            .into_table(Hero::Table)
            .columns([
                Hero::Name,
                Hero::Description,
                Hero::Image,
                Hero::FactionId,
            ])
            .values_panic([
                input.name.into(),
                description.into(),
                image.into(),
                input.faction_id.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(result.last_insert_rowid())
    }

    /// `image` replaces the stored one only when present, `faction_id` is always overwritten.
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update_hero(
        &self,
        id: i64,
        input: HeroInput,
        image: Option<String>,
    ) -> codex_shared::Result<()> {
        input.validate()?;
        self.ensure_faction(input.faction_id).await?;

        let description = input.description();
        let mut statement = Query::update()
            .table(Hero::Table)
            .values([
                (Hero::Name, input.name.into()),
                (Hero::Description, description.into()),
                (Hero::FactionId, input.faction_id.into()),
            ])
            .and_where(Expr::col(Hero::Id).eq(id))
            .to_owned();

        if let Some(image) = image {
            statement.value(Hero::Image, image);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        if result.rows_affected() == 0 {
            return Err(codex_shared::Error::NotFound("hero"));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_hero(&self, id: i64) -> codex_shared::Result<()> {
        let statement = Query::delete()
            .from_table(Hero::Table)
            .and_where(Expr::col(Hero::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        if result.rows_affected() == 0 {
            return Err(codex_shared::Error::NotFound("hero"));
        }

        Ok(())
    }

    async fn ensure_faction(&self, faction_id: Option<i64>) -> codex_shared::Result<()> {
        let Some(faction_id) = faction_id else {
            return Ok(());
        };

        let statement = Query::select()
            .column(Faction::Id)
            .from(Faction::Table)
            .and_where(Expr::col(Faction::Id).eq(faction_id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
            .ok_or(codex_shared::Error::NotFound("faction"))?;

        Ok(())
    }
}
