use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Faction;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Faction::Table)
        .col(
            ColumnDef::new(Faction::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Faction::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(ColumnDef::new(Faction::Image).string().string_len(255))
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Faction::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
