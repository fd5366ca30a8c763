use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Deserialize;

use super::{GameRepository, Page};
use crate::entities::{user, word};
use crate::error::AppError;

/// Longest display term accepted, in characters.
pub const MAX_WORD_LEN: usize = 50;

/// A word joined with its author (absent only if the author row was purged).
pub type WordWithAuthor = (word::Model, Option<user::Model>);

/// Fields supplied when a word is submitted. The author is always the caller.
#[derive(Debug, Clone)]
pub struct NewWord {
    pub word: String,
    pub definition: String,
    pub example: String,
    pub author_id: i32,
    pub game_id: Option<i32>,
}

/// Partial update of a word. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordUpdate {
    pub word: Option<String>,
    pub definition: Option<String>,
    pub example: Option<String>,
    pub game_id: Option<i32>,
}

impl WordUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.word.is_none()
            && self.definition.is_none()
            && self.example.is_none()
            && self.game_id.is_none()
    }
}

pub struct WordRepository;

impl WordRepository {
    /// Active word by id.
    pub async fn find_active<C: ConnectionTrait>(
        db: &C,
        word_id: i32,
    ) -> Result<Option<word::Model>, AppError> {
        Ok(word::Entity::find_by_id(word_id)
            .filter(word::Column::IsActive.eq(true))
            .one(db)
            .await?)
    }

    /// Active word by id, or `NotFound`.
    pub async fn get<C: ConnectionTrait>(db: &C, word_id: i32) -> Result<word::Model, AppError> {
        Self::find_active(db, word_id)
            .await?
            .ok_or_else(|| AppError::not_found("Word", word_id))
    }

    /// Active word with its author, or `NotFound`.
    pub async fn get_with_author<C: ConnectionTrait>(
        db: &C,
        word_id: i32,
    ) -> Result<WordWithAuthor, AppError> {
        word::Entity::find_by_id(word_id)
            .find_also_related(user::Entity)
            .filter(word::Column::IsActive.eq(true))
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Word", word_id))
    }

    /// Word by id regardless of `is_active`. For permission checks only.
    pub async fn find_any<C: ConnectionTrait>(
        db: &C,
        word_id: i32,
    ) -> Result<Option<word::Model>, AppError> {
        Ok(word::Entity::find_by_id(word_id).one(db).await?)
    }

    /// One page of active words matching `condition`, with authors, ordered by id.
    ///
    /// `condition` may reference `users` columns; the author join is always present.
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        condition: Condition,
        page: Page,
    ) -> Result<Vec<WordWithAuthor>, AppError> {
        Ok(word::Entity::find()
            .find_also_related(user::Entity)
            .filter(word::Column::IsActive.eq(true))
            .filter(condition)
            .order_by_asc(word::Column::WordId)
            .offset(page.offset)
            .limit(page.limit)
            .all(db)
            .await?)
    }

    /// Active words submitted by `author_id`, oldest first.
    pub async fn list_by_author<C: ConnectionTrait>(
        db: &C,
        author_id: i32,
    ) -> Result<Vec<word::Model>, AppError> {
        Ok(word::Entity::find()
            .filter(word::Column::AuthorId.eq(author_id))
            .filter(word::Column::IsActive.eq(true))
            .order_by_asc(word::Column::WordId)
            .all(db)
            .await?)
    }

    /// `limit` contiguous rows starting at `offset` in id order, inactive rows included.
    pub async fn window<C: ConnectionTrait>(
        db: &C,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<WordWithAuthor>, AppError> {
        Ok(word::Entity::find()
            .find_also_related(user::Entity)
            .order_by_asc(word::Column::WordId)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?)
    }

    /// Live row count, inactive rows included.
    pub async fn count_all<C: ConnectionTrait>(db: &C) -> Result<u64, AppError> {
        Ok(word::Entity::find().count(db).await?)
    }

    /// Insert a new, unpublished word with zeroed counters.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        new_word: NewWord,
    ) -> Result<word::Model, AppError> {
        validate_word(&new_word.word)?;
        validate_text("definition", &new_word.definition)?;
        validate_text("example", &new_word.example)?;
        if let Some(game_id) = new_word.game_id {
            GameRepository::get(db, game_id).await?;
        }

        let word = word::ActiveModel {
            word: Set(new_word.word.trim().to_string()),
            definition: Set(new_word.definition),
            example: Set(new_word.example),
            author_id: Set(new_word.author_id),
            published: Set(false),
            is_active: Set(true),
            upvotes: Set(0),
            downvotes: Set(0),
            submit_datetime: Set(Utc::now().fixed_offset()),
            game_id: Set(new_word.game_id),
            ..Default::default()
        };

        Ok(word.insert(db).await?)
    }

    /// Apply a partial update to an active word.
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        word_id: i32,
        changes: WordUpdate,
    ) -> Result<word::Model, AppError> {
        let existing = Self::get(db, word_id).await?;
        if changes.is_empty() {
            return Ok(existing);
        }

        let mut active = existing.into_active_model();
        if let Some(term) = changes.word {
            validate_word(&term)?;
            active.word = Set(term.trim().to_string());
        }
        if let Some(definition) = changes.definition {
            validate_text("definition", &definition)?;
            active.definition = Set(definition);
        }
        if let Some(example) = changes.example {
            validate_text("example", &example)?;
            active.example = Set(example);
        }
        if let Some(game_id) = changes.game_id {
            GameRepository::get(db, game_id).await?;
            active.game_id = Set(Some(game_id));
        }

        Ok(active.update(db).await?)
    }

    /// Mark an active word inactive.
    pub async fn soft_delete<C: ConnectionTrait>(db: &C, word_id: i32) -> Result<(), AppError> {
        let existing = Self::get(db, word_id).await?;
        let mut active = existing.into_active_model();
        active.is_active = Set(false);
        active.update(db).await?;
        Ok(())
    }
}

fn validate_word(term: &str) -> Result<(), AppError> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("word is required".to_string()));
    }
    if trimmed.chars().count() > MAX_WORD_LEN {
        return Err(AppError::BadRequest(format!(
            "word must be at most {MAX_WORD_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_length_is_counted_in_characters() {
        assert!(validate_word(&"é".repeat(MAX_WORD_LEN)).is_ok());
        assert!(validate_word(&"a".repeat(MAX_WORD_LEN + 1)).is_err());
    }

    #[test]
    fn blank_word_is_rejected() {
        assert!(matches!(validate_word("   "), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(WordUpdate::default().is_empty());
        let update = WordUpdate {
            example: Some("GG, no re".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
