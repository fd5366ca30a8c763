use sea_orm::ConnectionTrait;

use super::search_service::SearchService;
use crate::auth::Caller;
use crate::dto::{GameResponse, GameSummary};
use crate::error::AppError;
use crate::repository::{GameRepository, GameUpdate, NewGame};

pub struct GameService;

impl GameService {
    /// Register a new game. Any authenticated caller may do this.
    pub async fn create_game<C: ConnectionTrait>(
        db: &C,
        caller: &Caller,
        request: NewGame,
    ) -> Result<GameResponse, AppError> {
        let game = GameRepository::create(db, request).await?;

        tracing::info!(game_id = game.game_id, user_id = caller.user_id, "Game created");

        Ok(GameResponse {
            game: GameSummary::from(game),
            words: Vec::new(),
        })
    }

    /// Apply a partial update. Any authenticated caller may edit game details.
    pub async fn update_game<C: ConnectionTrait>(
        db: &C,
        caller: &Caller,
        game_id: i32,
        changes: GameUpdate,
    ) -> Result<GameResponse, AppError> {
        let game = GameRepository::update(db, game_id, changes).await?;
        tracing::info!(game_id, user_id = caller.user_id, "Game updated");

        let mut results = SearchService::attach_word_previews(db, vec![game]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::not_found("Game", game_id))
    }

    /// Soft-delete a game. Games have no owner, so this is admin-only.
    pub async fn delete_game<C: ConnectionTrait>(
        db: &C,
        caller: &Caller,
        game_id: i32,
    ) -> Result<(), AppError> {
        GameRepository::find_any(db, game_id)
            .await?
            .ok_or_else(|| AppError::not_found("Game", game_id))?;

        if !caller.can_mutate(None) {
            return Err(AppError::Forbidden(
                "Permission denied. Admin privilege required.".to_string(),
            ));
        }

        GameRepository::soft_delete(db, game_id).await?;
        tracing::info!(game_id, user_id = caller.user_id, "Game deactivated");
        Ok(())
    }
}
