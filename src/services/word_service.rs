use sea_orm::ConnectionTrait;

use crate::auth::Caller;
use crate::dto::{CreateWordRequest, WordResponse};
use crate::entities::word;
use crate::error::AppError;
use crate::repository::{NewWord, WordRepository, WordUpdate};

pub struct WordService;

impl WordService {
    /// Submit a new word authored by `caller`.
    pub async fn create_word<C: ConnectionTrait>(
        db: &C,
        caller: &Caller,
        request: CreateWordRequest,
    ) -> Result<WordResponse, AppError> {
        let word = WordRepository::create(
            db,
            NewWord {
                word: request.word,
                definition: request.definition,
                example: request.example,
                author_id: caller.user_id,
                game_id: request.game_id,
            },
        )
        .await?;

        tracing::info!(word_id = word.word_id, author_id = caller.user_id, "Word submitted");

        let mut response = WordResponse::new(word, None);
        response.author_username = Some(caller.username.clone());
        Ok(response)
    }

    /// Apply a partial update. Only the author or an admin may edit.
    pub async fn update_word<C: ConnectionTrait>(
        db: &C,
        caller: &Caller,
        word_id: i32,
        changes: WordUpdate,
    ) -> Result<WordResponse, AppError> {
        Self::authorize(db, caller, word_id).await?;
        WordRepository::update(db, word_id, changes).await?;
        let (word, author) = WordRepository::get_with_author(db, word_id).await?;
        Ok(WordResponse::new(word, author))
    }

    /// Soft-delete a word. Only the author or an admin may delete.
    pub async fn delete_word<C: ConnectionTrait>(
        db: &C,
        caller: &Caller,
        word_id: i32,
    ) -> Result<(), AppError> {
        Self::authorize(db, caller, word_id).await?;
        WordRepository::soft_delete(db, word_id).await?;
        tracing::info!(word_id, user_id = caller.user_id, "Word deactivated");
        Ok(())
    }

    /// The caller's active words.
    pub async fn my_words<C: ConnectionTrait>(
        db: &C,
        caller: &Caller,
    ) -> Result<Vec<WordResponse>, AppError> {
        Ok(WordRepository::list_by_author(db, caller.user_id)
            .await?
            .into_iter()
            .map(|word| {
                let mut response = WordResponse::new(word, None);
                response.author_username = Some(caller.username.clone());
                response
            })
            .collect())
    }

    async fn authorize<C: ConnectionTrait>(
        db: &C,
        caller: &Caller,
        word_id: i32,
    ) -> Result<word::Model, AppError> {
        let word = WordRepository::find_any(db, word_id)
            .await?
            .ok_or_else(|| AppError::not_found("Word", word_id))?;

        if !caller.can_mutate(Some(word.author_id)) {
            return Err(AppError::Forbidden(
                "Permission denied. User does not have permission to alter word.".to_string(),
            ));
        }
        Ok(word)
    }
}
