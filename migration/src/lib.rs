pub use sea_orm_migration::prelude::*;

mod m20261018_000001_create_users_table;
mod m20261018_000002_create_games_table;
mod m20261018_000003_create_words_table;
mod m20261018_000004_create_games_words_table;
mod m20261018_000005_create_games_words_link_authors_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_create_users_table::Migration),
            Box::new(m20261018_000002_create_games_table::Migration),
            Box::new(m20261018_000003_create_words_table::Migration),
            Box::new(m20261018_000004_create_games_words_table::Migration),
            Box::new(m20261018_000005_create_games_words_link_authors_table::Migration),
        ]
    }
}
