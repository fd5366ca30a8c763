use sea_orm_migration::prelude::*;

/// Creates the `games_words` link table. The unique index on (`game_id`, `word_id`)
/// is what rejects duplicate links under concurrent creation.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum GamesWords {
    Table,
    GameWordId,
    GameId,
    WordId,
}

#[derive(DeriveIden)]
enum Games {
    Table,
    GameId,
}

#[derive(DeriveIden)]
enum Words {
    Table,
    WordId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GamesWords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GamesWords::GameWordId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GamesWords::GameId).integer().not_null())
                    .col(ColumnDef::new(GamesWords::WordId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_words_game_id")
                            .from(GamesWords::Table, GamesWords::GameId)
                            .to(Games::Table, Games::GameId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_words_word_id")
                            .from(GamesWords::Table, GamesWords::WordId)
                            .to(Words::Table, Words::WordId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_words_pair")
                    .table(GamesWords::Table)
                    .col(GamesWords::GameId)
                    .col(GamesWords::WordId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Reverse lookup for games-per-word previews
        manager
            .create_index(
                Index::create()
                    .name("idx_games_words_word_id")
                    .table(GamesWords::Table)
                    .col(GamesWords::WordId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GamesWords::Table).to_owned())
            .await
    }
}
