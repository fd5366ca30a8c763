use sea_orm_migration::prelude::*;

/// Creates the `words` table holding community-submitted definitions.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Words {
    Table,
    WordId,
    Word,
    Definition,
    Example,
    AuthorId,
    Published,
    IsActive,
    Upvotes,
    Downvotes,
    SubmitDatetime,
    GameId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum Games {
    Table,
    GameId,
}

#[async_trait::async_trait]
#[allow(clippy::too_many_lines)]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Words::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Words::WordId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Words::Word).string_len(50).not_null())
                    .col(ColumnDef::new(Words::Definition).text().not_null())
                    .col(ColumnDef::new(Words::Example).text().not_null())
                    .col(ColumnDef::new(Words::AuthorId).integer().not_null())
                    .col(
                        ColumnDef::new(Words::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Words::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Words::Upvotes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Words::Downvotes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Words::SubmitDatetime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Words::GameId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_words_author_id")
                            .from(Words::Table, Words::AuthorId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_words_game_id")
                            .from(Words::Table, Words::GameId)
                            .to(Games::Table, Games::GameId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_words_author_id")
                    .table(Words::Table)
                    .col(Words::AuthorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Words::Table).to_owned())
            .await
    }
}
