use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "words")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub word_id: i32,
    pub word: String,
    #[sea_orm(column_type = "Text")]
    pub definition: String,
    #[sea_orm(column_type = "Text")]
    pub example: String,
    pub author_id: i32,
    pub published: bool,
    pub is_active: bool,
    pub upvotes: i32,
    pub downvotes: i32,
    pub submit_datetime: DateTimeWithTimeZone,
    pub game_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::UserId"
    )]
    Author,
    #[sea_orm(has_many = "super::game_word::Entity")]
    GameWords,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::game_word::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameWords.def()
    }
}

impl Related<super::game::Entity> for Entity {
    fn to() -> RelationDef {
        super::game_word::Relation::Game.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::game_word::Relation::Word.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
