use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::word::Entity")]
    Words,
    #[sea_orm(has_many = "super::game_word_author::Entity")]
    LinkAttributions,
}

impl Related<super::word::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Words.def()
    }
}

impl Related<super::game_word_author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LinkAttributions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
