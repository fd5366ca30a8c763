use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub game_id: i32,
    pub game_name: String,
    pub developer: Option<String>,
    pub image_url: Option<String>,
    pub wiki_url: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_word::Entity")]
    GameWords,
}

impl Related<super::game_word::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameWords.def()
    }
}

impl Related<super::word::Entity> for Entity {
    fn to() -> RelationDef {
        super::game_word::Relation::Word.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::game_word::Relation::Game.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
