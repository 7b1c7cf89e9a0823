use std::collections::HashMap;

use codex_db::table::{Faction, Hero};
use sea_query::{Expr, ExprTrait, Order, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, Default, Clone, FromRow)]
pub struct FactionRow {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Default, Clone, FromRow)]
pub struct HeroRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub faction_id: Option<i64>,
}

/// Hero listed on the admin dashboard with the name of its faction.
#[derive(Debug, Clone)]
pub struct HeroListView {
    pub hero: HeroRow,
    pub faction_name: Option<String>,
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn list_factions(&self) -> anyhow::Result<Vec<FactionRow>> {
        let statement = SeaQuery::select()
            .columns([Faction::Id, Faction::Name, Faction::Image])
            .from(Faction::Table)
            .order_by(Faction::Name, Order::Asc)
            .order_by(Faction::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with(&sql, values).fetch_all(&self.0).await?)
    }

    pub async fn find_faction(&self, id: i64) -> anyhow::Result<Option<FactionRow>> {
        let statement = SeaQuery::select()
            .columns([Faction::Id, Faction::Name, Faction::Image])
            .from(Faction::Table)
            .and_where(Expr::col(Faction::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    pub async fn find_hero(&self, id: i64) -> anyhow::Result<Option<HeroRow>> {
        let statement = Self::hero_select()
            .and_where(Expr::col(Hero::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    pub async fn list_heroes_by_faction(&self, faction_id: i64) -> anyhow::Result<Vec<HeroRow>> {
        let statement = Self::hero_select()
            .and_where(Expr::col(Hero::FactionId).eq(faction_id))
            .order_by(Hero::Name, Order::Asc)
            .order_by(Hero::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with(&sql, values).fetch_all(&self.0).await?)
    }

    pub async fn list_heroes(&self) -> anyhow::Result<Vec<HeroRow>> {
        let statement = Self::hero_select().order_by(Hero::Id, Order::Asc).to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with(&sql, values).fetch_all(&self.0).await?)
    }

    /// Heroes grouped by faction name, unaffiliated ones last, then by name ignoring case.
    pub async fn list_heroes_with_faction(&self) -> anyhow::Result<Vec<HeroListView>> {
        let factions = self
            .list_factions()
            .await?
            .into_iter()
            .map(|f| (f.id, f.name))
            .collect::<HashMap<_, _>>();

        let mut heroes = self
            .list_heroes()
            .await?
            .into_iter()
            .map(|hero| HeroListView {
                faction_name: hero.faction_id.and_then(|id| factions.get(&id).cloned()),
                hero,
            })
            .collect::<Vec<_>>();

        heroes.sort_by_cached_key(|v| {
            (
                v.faction_name.is_none(),
                v.faction_name.clone(),
                v.hero.name.to_lowercase(),
            )
        });

        Ok(heroes)
    }

    fn hero_select() -> sea_query::SelectStatement {
        SeaQuery::select()
            .columns([
                Hero::Id,
                Hero::Name,
                Hero::Description,
                Hero::Image,
                Hero::FactionId,
            ])
            .from(Hero::Table)
            .to_owned()
    }
}
