use sea_orm_migration::prelude::*;

/// Creates the `games` table. A game is identified by its name and developer.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Games {
    Table,
    GameId,
    GameName,
    Developer,
    ImageUrl,
    WikiUrl,
    IsActive,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::GameId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::GameName).string_len(200).not_null())
                    .col(ColumnDef::new(Games::Developer).string_len(200).null())
                    .col(ColumnDef::new(Games::ImageUrl).string_len(500).null())
                    .col(ColumnDef::new(Games::WikiUrl).string_len(500).null())
                    .col(
                        ColumnDef::new(Games::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_name_developer")
                    .table(Games::Table)
                    .col(Games::GameName)
                    .col(Games::Developer)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}
