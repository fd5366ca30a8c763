use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType,
    ModelTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;

use crate::entities::{game, game_word, game_word_author, word};
use crate::error::AppError;

/// One of the caller's links with both endpoints summarized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct MyLinkRow {
    pub game_word_id: i32,
    pub game_id: i32,
    pub game_name: String,
    pub word_id: i32,
    pub word: String,
}

pub struct LinkRepository;

impl LinkRepository {
    #[must_use]
    pub fn duplicate_message(game_id: i32, word_id: i32) -> String {
        format!("Word {word_id} is already linked to game {game_id}.")
    }

    /// The link between `game_id` and `word_id`, if any.
    pub async fn find<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
        word_id: i32,
    ) -> Result<Option<game_word::Model>, AppError> {
        Ok(game_word::Entity::find()
            .filter(game_word::Column::GameId.eq(game_id))
            .filter(game_word::Column::WordId.eq(word_id))
            .one(db)
            .await?)
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        game_word_id: i32,
    ) -> Result<Option<game_word::Model>, AppError> {
        Ok(game_word::Entity::find_by_id(game_word_id).one(db).await?)
    }

    /// Who created the link, if recorded.
    pub async fn find_attribution<C: ConnectionTrait>(
        db: &C,
        link: &game_word::Model,
    ) -> Result<Option<game_word_author::Model>, AppError> {
        Ok(link
            .find_related(game_word_author::Entity)
            .one(db)
            .await?)
    }

    /// Insert a link and its attribution. Call inside a transaction.
    ///
    /// A unique violation on the pair maps to `Conflict`.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
        word_id: i32,
        user_id: i32,
    ) -> Result<game_word::Model, AppError> {
        let link = game_word::ActiveModel {
            game_id: Set(game_id),
            word_id: Set(word_id),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| AppError::from_insert(e, || Self::duplicate_message(game_id, word_id)))?;

        game_word_author::ActiveModel {
            game_word_id: Set(link.game_word_id),
            user_id: Set(user_id),
        }
        .insert(db)
        .await?;

        Ok(link)
    }

    /// Delete a link's attributions, then the link. Call inside a transaction.
    pub async fn delete<C: ConnectionTrait>(
        db: &C,
        link: game_word::Model,
    ) -> Result<(), AppError> {
        game_word_author::Entity::delete_many()
            .filter(game_word_author::Column::GameWordId.eq(link.game_word_id))
            .exec(db)
            .await?;
        link.delete(db).await?;
        Ok(())
    }

    /// Links attributed to `user_id` whose game and word are both active.
    pub async fn list_by_attribution<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Vec<MyLinkRow>, AppError> {
        Ok(game_word::Entity::find()
            .select_only()
            .column(game_word::Column::GameWordId)
            .column(game_word::Column::GameId)
            .column(game::Column::GameName)
            .column(game_word::Column::WordId)
            .column(word::Column::Word)
            .join(JoinType::InnerJoin, game_word::Relation::Attributions.def())
            .join(JoinType::InnerJoin, game_word::Relation::Game.def())
            .join(JoinType::InnerJoin, game_word::Relation::Word.def())
            .filter(game_word_author::Column::UserId.eq(user_id))
            .filter(game::Column::IsActive.eq(true))
            .filter(word::Column::IsActive.eq(true))
            .order_by_asc(game_word::Column::GameWordId)
            .into_model::<MyLinkRow>()
            .all(db)
            .await?)
    }
}
