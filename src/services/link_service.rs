use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::auth::Caller;
use crate::dto::{LinkResponse, WordResponse};
use crate::error::AppError;
use crate::repository::{GameRepository, LinkRepository, MyLinkRow, WordRepository};

pub struct LinkService;

impl LinkService {
    /// Link an active word to an active game, attributed to `caller`.
    pub async fn create_link(
        db: &DatabaseConnection,
        game_id: i32,
        word_id: i32,
        caller: &Caller,
    ) -> Result<LinkResponse, AppError> {
        if LinkRepository::find(db, game_id, word_id).await?.is_some() {
            return Err(AppError::Conflict(LinkRepository::duplicate_message(
                game_id, word_id,
            )));
        }

        GameRepository::get(db, game_id).await?;
        let (word, author) = WordRepository::get_with_author(db, word_id).await?;

        let txn = db.begin().await?;
        let link = LinkRepository::create(&txn, game_id, word_id, caller.user_id).await?;
        txn.commit().await?;

        tracing::info!(
            game_id,
            word_id,
            game_word_id = link.game_word_id,
            user_id = caller.user_id,
            "Link created"
        );

        Ok(LinkResponse {
            game_word_id: link.game_word_id,
            game_id: link.game_id,
            word: WordResponse::new(word, author),
        })
    }

    /// Remove a link. Allowed for whoever created it, or an admin.
    pub async fn delete_link(
        db: &DatabaseConnection,
        game_id: i32,
        word_id: i32,
        caller: &Caller,
    ) -> Result<(), AppError> {
        let link = LinkRepository::find(db, game_id, word_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link", format!("{game_id}/{word_id}")))?;

        let owner = LinkRepository::find_attribution(db, &link)
            .await?
            .map(|a| a.user_id);
        if !caller.can_mutate(owner) {
            return Err(AppError::Forbidden(
                "Permission denied to delete game/word link.".to_string(),
            ));
        }

        let game_word_id = link.game_word_id;
        let txn = db.begin().await?;
        LinkRepository::delete(&txn, link).await?;
        txn.commit().await?;

        tracing::info!(game_word_id, user_id = caller.user_id, "Link deleted");
        Ok(())
    }

    /// Links created by `caller` whose game and word are still active.
    pub async fn my_links(
        db: &DatabaseConnection,
        caller: &Caller,
    ) -> Result<Vec<MyLinkRow>, AppError> {
        LinkRepository::list_by_attribution(db, caller.user_id).await
    }
}
