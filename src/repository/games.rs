use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Deserialize;

use super::Page;
use crate::entities::game;
use crate::error::AppError;

const MAX_GAME_NAME_LEN: usize = 200;

#[derive(Debug, Clone, Deserialize)]
pub struct NewGame {
    pub game_name: String,
    pub developer: Option<String>,
    pub image_url: Option<String>,
    pub wiki_url: Option<String>,
}

/// Partial update of a game. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameUpdate {
    pub game_name: Option<String>,
    pub developer: Option<String>,
    pub image_url: Option<String>,
    pub wiki_url: Option<String>,
}

impl GameUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.game_name.is_none()
            && self.developer.is_none()
            && self.image_url.is_none()
            && self.wiki_url.is_none()
    }
}

pub struct GameRepository;

impl GameRepository {
    pub async fn find_active<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
    ) -> Result<Option<game::Model>, AppError> {
        Ok(game::Entity::find_by_id(game_id)
            .filter(game::Column::IsActive.eq(true))
            .one(db)
            .await?)
    }

    /// Active game by id, or `NotFound`.
    pub async fn get<C: ConnectionTrait>(db: &C, game_id: i32) -> Result<game::Model, AppError> {
        Self::find_active(db, game_id)
            .await?
            .ok_or_else(|| AppError::not_found("Game", game_id))
    }

    /// Game by id regardless of `is_active`. For permission checks only.
    pub async fn find_any<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
    ) -> Result<Option<game::Model>, AppError> {
        Ok(game::Entity::find_by_id(game_id).one(db).await?)
    }

    /// One page of active games matching `condition`, ordered by id.
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        condition: Condition,
        page: Page,
    ) -> Result<Vec<game::Model>, AppError> {
        Ok(game::Entity::find()
            .filter(game::Column::IsActive.eq(true))
            .filter(condition)
            .order_by_asc(game::Column::GameId)
            .offset(page.offset)
            .limit(page.limit)
            .all(db)
            .await?)
    }

    /// The row at `offset` in id order, active or not.
    pub async fn probe<C: ConnectionTrait>(
        db: &C,
        offset: u64,
    ) -> Result<Option<game::Model>, AppError> {
        Ok(game::Entity::find()
            .order_by_asc(game::Column::GameId)
            .offset(offset)
            .one(db)
            .await?)
    }

    /// Live row count, inactive rows included.
    pub async fn count_all<C: ConnectionTrait>(db: &C) -> Result<u64, AppError> {
        Ok(game::Entity::find().count(db).await?)
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        new_game: NewGame,
    ) -> Result<game::Model, AppError> {
        let name = validate_name(&new_game.game_name)?;
        let developer = normalize_optional(new_game.developer);
        Self::ensure_unique(db, &name, developer.as_deref(), None).await?;

        let game = game::ActiveModel {
            game_name: Set(name.clone()),
            developer: Set(developer),
            image_url: Set(normalize_optional(new_game.image_url)),
            wiki_url: Set(normalize_optional(new_game.wiki_url)),
            is_active: Set(true),
            ..Default::default()
        };

        game.insert(db)
            .await
            .map_err(|e| AppError::from_insert(e, || duplicate_message(&name)))
    }

    /// Apply a partial update to an active game.
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
        changes: GameUpdate,
    ) -> Result<game::Model, AppError> {
        let existing = Self::get(db, game_id).await?;
        if changes.is_empty() {
            return Ok(existing);
        }

        let name = match changes.game_name {
            Some(name) => validate_name(&name)?,
            None => existing.game_name.clone(),
        };
        let developer = match changes.developer {
            Some(dev) => normalize_optional(Some(dev)),
            None => existing.developer.clone(),
        };
        if name != existing.game_name || developer != existing.developer {
            Self::ensure_unique(db, &name, developer.as_deref(), Some(game_id)).await?;
        }

        let mut active = existing.into_active_model();
        active.game_name = Set(name.clone());
        active.developer = Set(developer);
        if let Some(url) = changes.image_url {
            active.image_url = Set(normalize_optional(Some(url)));
        }
        if let Some(url) = changes.wiki_url {
            active.wiki_url = Set(normalize_optional(Some(url)));
        }

        active
            .update(db)
            .await
            .map_err(|e| AppError::from_insert(e, || duplicate_message(&name)))
    }

    /// Mark an active game inactive.
    pub async fn soft_delete<C: ConnectionTrait>(db: &C, game_id: i32) -> Result<(), AppError> {
        let existing = Self::get(db, game_id).await?;
        let mut active = existing.into_active_model();
        active.is_active = Set(false);
        active.update(db).await?;
        Ok(())
    }

    /// Reject a (name, developer) pair already taken by another game.
    ///
    /// The unique index is the authoritative guard; this gives a clean error in the common case.
    async fn ensure_unique<C: ConnectionTrait>(
        db: &C,
        name: &str,
        developer: Option<&str>,
        except: Option<i32>,
    ) -> Result<(), AppError> {
        let mut query = game::Entity::find().filter(game::Column::GameName.eq(name));
        query = match developer {
            Some(dev) => query.filter(game::Column::Developer.eq(dev)),
            None => query.filter(game::Column::Developer.is_null()),
        };
        if let Some(game_id) = except {
            query = query.filter(game::Column::GameId.ne(game_id));
        }

        if query.one(db).await?.is_some() {
            return Err(AppError::Conflict(duplicate_message(name)));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("game_name is required".to_string()));
    }
    if trimmed.chars().count() > MAX_GAME_NAME_LEN {
        return Err(AppError::BadRequest(format!(
            "game_name must be at most {MAX_GAME_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Blank optional strings are stored as NULL.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn duplicate_message(name: &str) -> String {
    format!("A game named '{name}' from this developer already exists.")
}
