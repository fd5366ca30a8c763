//! Up/down vote counters.
//!
//! Counters are changed by arithmetic evaluated in the store, never by read-modify-write in
//! the process, so concurrent votes on one word never lose updates.

use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait, UpdateMany,
};

use crate::dto::{VoteRequest, VoteResponse};
use crate::entities::word;
use crate::error::AppError;
use crate::repository::WordRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Increment,
    Decrement,
}

impl VoteAction {
    fn parse(field: &str, raw: &str) -> Result<Self, AppError> {
        match raw {
            "increment" => Ok(Self::Increment),
            "decrement" => Ok(Self::Decrement),
            _ => Err(AppError::BadRequest(format!(
                "'{field}' must be either 'increment' or 'decrement'."
            ))),
        }
    }

    /// `col + 1`, or `CASE WHEN col > 0 THEN col - 1 ELSE 0 END`.
    fn apply_to(self, column: word::Column) -> SimpleExpr {
        match self {
            Self::Increment => Expr::col(column).add(1),
            Self::Decrement => Expr::case(Expr::col(column).gt(0), Expr::col(column).sub(1))
                .finally(0)
                .into(),
        }
    }
}

/// Validated pair of optional actions; at least one is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteActions {
    pub upvote: Option<VoteAction>,
    pub downvote: Option<VoteAction>,
}

impl VoteActions {
    /// Validate raw request actions.
    ///
    /// # Errors
    ///
    /// `BadRequest` when neither action is given, when both are the same string, or when
    /// either is not `increment`/`decrement`.
    pub fn parse(upvote: Option<&str>, downvote: Option<&str>) -> Result<Self, AppError> {
        match (upvote, downvote) {
            (None, None) => {
                return Err(AppError::BadRequest(
                    "At least one of 'upvote_action' or 'downvote_action' is required."
                        .to_string(),
                ));
            }
            (Some(up), Some(down)) if up == down => {
                return Err(AppError::BadRequest(
                    "Cannot have the same action for both upvote and downvote.".to_string(),
                ));
            }
            _ => {}
        }

        Ok(Self {
            upvote: upvote
                .map(|raw| VoteAction::parse("upvote_action", raw))
                .transpose()?,
            downvote: downvote
                .map(|raw| VoteAction::parse("downvote_action", raw))
                .transpose()?,
        })
    }
}

pub struct VoteService;

impl VoteService {
    /// Apply vote actions to an active word and return its new counters.
    ///
    /// A missing or inactive word is `NotFound` before the actions are looked at.
    pub async fn apply_vote(
        db: &DatabaseConnection,
        request: &VoteRequest,
    ) -> Result<VoteResponse, AppError> {
        WordRepository::get(db, request.word_id).await?;

        let actions = VoteActions::parse(
            request.upvote_action.as_deref(),
            request.downvote_action.as_deref(),
        )?;

        let txn = db.begin().await?;

        // The word may have been deleted since the lookup above.
        let result = vote_update(request.word_id, actions).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Word", request.word_id));
        }
        let word = WordRepository::get(&txn, request.word_id).await?;

        txn.commit().await?;

        tracing::debug!(
            word_id = word.word_id,
            upvotes = word.upvotes,
            downvotes = word.downvotes,
            "Vote applied"
        );

        Ok(VoteResponse {
            word_id: word.word_id,
            upvotes: word.upvotes,
            downvotes: word.downvotes,
        })
    }
}

/// One `UPDATE words SET ...` on the active row, with the arithmetic done by the store.
fn vote_update(word_id: i32, actions: VoteActions) -> UpdateMany<word::Entity> {
    let mut update = word::Entity::update_many()
        .filter(word::Column::WordId.eq(word_id))
        .filter(word::Column::IsActive.eq(true));
    if let Some(action) = actions.upvote {
        update = update.col_expr(word::Column::Upvotes, action.apply_to(word::Column::Upvotes));
    }
    if let Some(action) = actions.downvote {
        update = update.col_expr(
            word::Column::Downvotes,
            action.apply_to(word::Column::Downvotes),
        );
    }
    update
}
