//! Random discovery without `ORDER BY RANDOM()`.
//!
//! Totals come from the approximate [`RowCountSource`] when available, so an offset may land
//! past the live end of the table or on an inactive row; both are skipped, never reported.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use sea_orm::ConnectionTrait;

use super::search_service::SearchService;
use crate::dto::{GameResponse, WordResponse};
use crate::error::AppError;
use crate::metadata::RowCountSource;
use crate::repository::{GameRepository, WordRepository};

/// Words returned by one random draw.
pub const RANDOM_WORD_COUNT: usize = 7;
/// Contiguous rows fetched per draw.
pub const RANDOM_WORD_WINDOW: u64 = 30;

pub struct RandomService;

impl RandomService {
    /// Up to seven active words drawn from one random window of the table.
    pub async fn random_words<C: ConnectionTrait>(
        db: &C,
        counts: &dyn RowCountSource,
    ) -> Result<Vec<WordResponse>, AppError> {
        let total = match counts.row_counts().await.word_count {
            Some(total) if total > 0 => total,
            _ => WordRepository::count_all(db).await?,
        };

        let window = total.min(RANDOM_WORD_WINDOW);
        if window == 0 {
            return Err(AppError::not_found("Word", "random"));
        }

        let (start, order) = {
            let mut rng = rand::thread_rng();
            let start = rng.gen_range(0..=total - window);
            let mut order: Vec<usize> = (0..usize::try_from(window).unwrap_or(0)).collect();
            order.shuffle(&mut rng);
            (start, order)
        };

        let mut rows: Vec<Option<_>> = WordRepository::window(db, start, window)
            .await?
            .into_iter()
            .map(Some)
            .collect();

        let picked = pick_active(&mut rows, &order, |(word, _)| word.is_active);
        if picked.is_empty() {
            return Err(AppError::not_found("Word", "random"));
        }

        tracing::debug!(total, start, window, picked = picked.len(), "Drew random words");

        Ok(picked
            .into_iter()
            .map(|(word, author)| WordResponse::new(word, author))
            .collect())
    }

    /// One active game chosen by probing random, untried offsets.
    pub async fn random_game<C: ConnectionTrait>(
        db: &C,
        counts: &dyn RowCountSource,
    ) -> Result<GameResponse, AppError> {
        let total = match counts.row_counts().await.game_count {
            Some(total) if total > 0 => total,
            _ => GameRepository::count_all(db).await?,
        };

        let mut tried = HashSet::new();
        while let Some(offset) = next_untried(&mut tried, total) {
            let Some(game) = GameRepository::probe(db, offset).await? else {
                continue;
            };
            if !game.is_active {
                continue;
            }

            tracing::debug!(total, offset, probes = tried.len(), "Drew random game");
            let mut results = SearchService::attach_word_previews(db, vec![game]).await?;
            if let Some(result) = results.pop() {
                return Ok(result);
            }
        }

        Err(AppError::not_found("Game", "random"))
    }
}

/// Walk `order` over `rows`, taking up to [`RANDOM_WORD_COUNT`] rows that pass `is_active`.
///
/// Indices past the end of `rows` (a short window from a stale count) are skipped.
fn pick_active<T>(
    rows: &mut [Option<T>],
    order: &[usize],
    is_active: impl Fn(&T) -> bool,
) -> Vec<T> {
    let mut picked = Vec::with_capacity(RANDOM_WORD_COUNT);
    for &i in order {
        let Some(slot) = rows.get_mut(i) else {
            continue;
        };
        if !slot.as_ref().is_some_and(|row| is_active(row)) {
            continue;
        }
        if let Some(row) = slot.take() {
            picked.push(row);
        }
        if picked.len() == RANDOM_WORD_COUNT {
            break;
        }
    }
    picked
}

/// A uniformly random offset in `[0, total)` not yet in `tried`, recording it.
fn next_untried(tried: &mut HashSet<u64>, total: u64) -> Option<u64> {
    if u64::try_from(tried.len()).unwrap_or(u64::MAX) >= total {
        return None;
    }
    let mut rng = rand::thread_rng();
    loop {
        let offset = rng.gen_range(0..total);
        if tried.insert(offset) {
            return Some(offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_at_most_seven() {
        let mut rows: Vec<Option<u32>> = (0..30).map(Some).collect();
        let order: Vec<usize> = (0..30).rev().collect();
        let picked = pick_active(&mut rows, &order, |_| true);
        assert_eq!(picked, vec![29, 28, 27, 26, 25, 24, 23]);
    }

    #[test]
    fn skips_inactive_and_out_of_range() {
        let mut rows: Vec<Option<(u32, bool)>> =
            vec![Some((0, true)), Some((1, false)), Some((2, true))];
        let order = vec![5, 1, 2, 0, 9];
        let picked = pick_active(&mut rows, &order, |(_, active)| *active);
        assert_eq!(picked, vec![(2, true), (0, true)]);
    }

    #[test]
    fn untried_offsets_exhaust() {
        let mut tried = HashSet::new();
        let mut seen = Vec::new();
        while let Some(offset) = next_untried(&mut tried, 5) {
            seen.push(offset);
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert_eq!(next_untried(&mut HashSet::new(), 0), None);
    }
}
