use sea_orm_migration::prelude::*;

/// Creates the attribution table recording which user created each game/word link.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum GamesWordsLinkAuthors {
    Table,
    GameWordId,
    UserId,
}

#[derive(DeriveIden)]
enum GamesWords {
    Table,
    GameWordId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GamesWordsLinkAuthors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GamesWordsLinkAuthors::GameWordId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GamesWordsLinkAuthors::UserId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(GamesWordsLinkAuthors::GameWordId)
                            .col(GamesWordsLinkAuthors::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_link_authors_game_word_id")
                            .from(
                                GamesWordsLinkAuthors::Table,
                                GamesWordsLinkAuthors::GameWordId,
                            )
                            .to(GamesWords::Table, GamesWords::GameWordId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_link_authors_user_id")
                            .from(GamesWordsLinkAuthors::Table, GamesWordsLinkAuthors::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_link_authors_user_id")
                    .table(GamesWordsLinkAuthors::Table)
                    .col(GamesWordsLinkAuthors::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GamesWordsLinkAuthors::Table).to_owned())
            .await
    }
}
