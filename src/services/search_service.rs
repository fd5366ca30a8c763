//! Filtered, paginated search with nested previews.
//!
//! Previews are capped per parent with `ROW_NUMBER() OVER (PARTITION BY parent ORDER BY id)`
//! and fetched for a whole page in one statement.

use std::collections::HashMap;

use sea_orm::sea_query::{
    Alias, Expr, Func, Order, OrderedStatement, Query, SelectStatement, SimpleExpr,
    WindowStatement,
};
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, FromQueryResult, Statement};

use crate::dto::{
    GamePreview, GameResponse, GameSummary, GameWordsResponse, SearchQuery, WordPreview,
    WordResponse,
};
use crate::entities::{game, game_word, user, word};
use crate::error::AppError;
use crate::repository::{GameRepository, Page, WordRepository, WordWithAuthor};

/// Most preview rows attached to a single game or word.
pub const PREVIEW_CAP: i32 = 4;

/// `startsWith` value meaning "first character is not an ASCII letter".
pub const NON_ALPHA_PREFIX: &str = "*";

/// Escape character inside `LIKE` patterns; must match the `ESCAPE` clause in [`ilike`].
const LIKE_ESCAPE: char = '!';

#[derive(Debug, FromQueryResult)]
struct WordPreviewRow {
    game_id: i32,
    word_id: i32,
    word: String,
}

#[derive(Debug, FromQueryResult)]
struct GamePreviewRow {
    word_id: i32,
    game_id: i32,
    game_name: String,
}

pub struct SearchService;

impl SearchService {
    /// Active games by name prefix and/or substring, each with up to four preview words.
    pub async fn search_games<C: ConnectionTrait>(
        db: &C,
        query: &SearchQuery,
    ) -> Result<Vec<GameResponse>, AppError> {
        let page = Page::new(query.offset, query.limit);

        let mut condition = Condition::all();
        if let Some(prefix) = non_empty(query.starts_with.as_deref()) {
            condition = condition.add(prefix_match(game::Column::GameName, prefix));
        }
        if let Some(fragment) = non_empty(query.name.as_deref()) {
            condition = condition.add(contains_match(game::Column::GameName, fragment));
        }

        let games = GameRepository::list(db, condition, page).await?;
        Self::attach_word_previews(db, games).await
    }

    /// One active game with its preview words.
    pub async fn game_detail<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
    ) -> Result<GameResponse, AppError> {
        let game = GameRepository::get(db, game_id).await?;
        let mut results = Self::attach_word_previews(db, vec![game]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::not_found("Game", game_id))
    }

    /// Active words linked to an active game, filtered by prefix or substring.
    pub async fn search_game_words<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
        query: &SearchQuery,
    ) -> Result<GameWordsResponse, AppError> {
        let game = GameRepository::get(db, game_id).await?;
        let page = Page::new(query.offset, query.limit);

        let linked = Query::select()
            .column(game_word::Column::WordId)
            .from(game_word::Entity)
            .and_where(Expr::col(game_word::Column::GameId).eq(game_id))
            .to_owned();

        let condition = word_term_condition(query)?
            .add(word::Column::WordId.in_subquery(linked));

        let words = WordRepository::list(db, condition, page)
            .await?
            .into_iter()
            .map(|(word, author)| WordResponse::new(word, author))
            .collect();

        Ok(GameWordsResponse {
            game: GameSummary::from(game),
            words,
        })
    }

    /// Active words by term, author and owning game, each with up to four linked games.
    pub async fn search_words<C: ConnectionTrait>(
        db: &C,
        query: &SearchQuery,
    ) -> Result<Vec<WordResponse>, AppError> {
        let page = Page::new(query.offset, query.limit);

        let mut condition = word_term_condition(query)?;
        if let Some(author) = non_empty(query.author.as_deref()) {
            condition = condition.add(user::Column::Username.eq(author));
        }
        if let Some(game_id) = query.game_id {
            condition = condition.add(word::Column::GameId.eq(game_id));
        }

        let words = WordRepository::list(db, condition, page).await?;
        Self::attach_game_previews(db, words).await
    }

    /// One active word with its author and up to four linked games.
    pub async fn word_detail<C: ConnectionTrait>(
        db: &C,
        word_id: i32,
    ) -> Result<WordResponse, AppError> {
        let row = WordRepository::get_with_author(db, word_id).await?;
        let mut results = Self::attach_game_previews(db, vec![row]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::not_found("Word", word_id))
    }

    /// Wrap each game with its capped preview words, preserving page order.
    pub async fn attach_word_previews<C: ConnectionTrait>(
        db: &C,
        games: Vec<game::Model>,
    ) -> Result<Vec<GameResponse>, AppError> {
        let ids: Vec<i32> = games.iter().map(|g| g.game_id).collect();
        let mut previews = word_previews(db, &ids).await?;

        Ok(games
            .into_iter()
            .map(|game| GameResponse {
                words: previews.remove(&game.game_id).unwrap_or_default(),
                game: GameSummary::from(game),
            })
            .collect())
    }

    /// Wrap each word with its capped preview games, preserving page order.
    pub async fn attach_game_previews<C: ConnectionTrait>(
        db: &C,
        words: Vec<WordWithAuthor>,
    ) -> Result<Vec<WordResponse>, AppError> {
        let ids: Vec<i32> = words.iter().map(|(w, _)| w.word_id).collect();
        let mut previews = game_previews(db, &ids).await?;

        Ok(words
            .into_iter()
            .map(|(word, author)| {
                let games = previews.remove(&word.word_id).unwrap_or_default();
                WordResponse::new(word, author).with_games(games)
            })
            .collect())
    }
}

/// Up to [`PREVIEW_CAP`] active words per game, lowest `word_id` first.
async fn word_previews<C: ConnectionTrait>(
    db: &C,
    game_ids: &[i32],
) -> Result<HashMap<i32, Vec<WordPreview>>, AppError> {
    if game_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let ranked = Query::select()
        .column((game_word::Entity, game_word::Column::GameId))
        .column((word::Entity, word::Column::WordId))
        .column((word::Entity, word::Column::Word))
        .expr_window_as(
            Expr::cust("ROW_NUMBER()"),
            WindowStatement::partition_by((game_word::Entity, game_word::Column::GameId))
                .order_by((word::Entity, word::Column::WordId), Order::Asc)
                .to_owned(),
            Alias::new("rn"),
        )
        .from(game_word::Entity)
        .inner_join(
            word::Entity,
            Expr::col((word::Entity, word::Column::WordId))
                .equals((game_word::Entity, game_word::Column::WordId)),
        )
        .and_where(
            Expr::col((game_word::Entity, game_word::Column::GameId))
                .is_in(game_ids.iter().copied()),
        )
        .and_where(Expr::col((word::Entity, word::Column::IsActive)).eq(true))
        .to_owned();

    let stmt = capped(ranked, &["game_id", "word_id", "word"], "game_id", "word_id");
    let rows = WordPreviewRow::find_by_statement(build(db, &stmt))
        .all(db)
        .await?;

    let mut grouped: HashMap<i32, Vec<WordPreview>> = HashMap::new();
    for row in rows {
        grouped.entry(row.game_id).or_default().push(WordPreview {
            word_id: row.word_id,
            word: row.word,
        });
    }
    Ok(grouped)
}

/// Up to [`PREVIEW_CAP`] active games per word, lowest `game_id` first.
async fn game_previews<C: ConnectionTrait>(
    db: &C,
    word_ids: &[i32],
) -> Result<HashMap<i32, Vec<GamePreview>>, AppError> {
    if word_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let ranked = Query::select()
        .column((game_word::Entity, game_word::Column::WordId))
        .column((game::Entity, game::Column::GameId))
        .column((game::Entity, game::Column::GameName))
        .expr_window_as(
            Expr::cust("ROW_NUMBER()"),
            WindowStatement::partition_by((game_word::Entity, game_word::Column::WordId))
                .order_by((game::Entity, game::Column::GameId), Order::Asc)
                .to_owned(),
            Alias::new("rn"),
        )
        .from(game_word::Entity)
        .inner_join(
            game::Entity,
            Expr::col((game::Entity, game::Column::GameId))
                .equals((game_word::Entity, game_word::Column::GameId)),
        )
        .and_where(
            Expr::col((game_word::Entity, game_word::Column::WordId))
                .is_in(word_ids.iter().copied()),
        )
        .and_where(Expr::col((game::Entity, game::Column::IsActive)).eq(true))
        .to_owned();

    let stmt = capped(ranked, &["word_id", "game_id", "game_name"], "word_id", "game_id");
    let rows = GamePreviewRow::find_by_statement(build(db, &stmt))
        .all(db)
        .await?;

    let mut grouped: HashMap<i32, Vec<GamePreview>> = HashMap::new();
    for row in rows {
        grouped.entry(row.word_id).or_default().push(GamePreview {
            game_id: row.game_id,
            game_name: row.game_name,
        });
    }
    Ok(grouped)
}

/// `SELECT columns FROM (ranked) WHERE rn <= PREVIEW_CAP ORDER BY parent, child`
fn capped(
    ranked: SelectStatement,
    columns: &[&str],
    parent: &str,
    child: &str,
) -> SelectStatement {
    let alias = Alias::new("ranked");
    let mut stmt = Query::select();
    for column in columns {
        stmt.column((alias.clone(), Alias::new(*column)));
    }
    stmt.from_subquery(ranked, alias.clone())
        .and_where(Expr::col((alias.clone(), Alias::new("rn"))).lte(PREVIEW_CAP))
        .order_by((alias.clone(), Alias::new(parent)), Order::Asc)
        .order_by((alias, Alias::new(child)), Order::Asc)
        .to_owned()
}

fn build<C: ConnectionTrait>(db: &C, stmt: &SelectStatement) -> Statement {
    db.get_database_backend().build(stmt)
}

/// Prefix XOR substring on `words.word`.
fn word_term_condition(query: &SearchQuery) -> Result<Condition, AppError> {
    let prefix = non_empty(query.starts_with.as_deref());
    let fragment = non_empty(query.word.as_deref());

    match (prefix, fragment) {
        (Some(_), Some(_)) => Err(AppError::BadRequest(
            "Must include 'startsWith' OR 'word' in query parameters, not both.".to_string(),
        )),
        (Some(prefix), None) => Ok(Condition::all().add(prefix_match(word::Column::Word, prefix))),
        (None, Some(fragment)) => {
            Ok(Condition::all().add(contains_match(word::Column::Word, fragment)))
        }
        (None, None) => Ok(Condition::all()),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Case-insensitive `col LIKE 'prefix%'`, or the non-letter rule for `*`.
fn prefix_match<Col: ColumnTrait>(column: Col, prefix: &str) -> SimpleExpr {
    if prefix == NON_ALPHA_PREFIX {
        let first_char = Func::lower(Func::cust(Alias::new("SUBSTR")).args([
            qualified(column),
            Expr::val(1).into(),
            Expr::val(1).into(),
        ]));
        return Expr::expr(first_char).is_not_in(('a'..='z').map(String::from));
    }
    ilike(column, format!("{}%", escape_like(prefix)))
}

/// Case-insensitive `col LIKE '%fragment%'`.
fn contains_match<Col: ColumnTrait>(column: Col, fragment: &str) -> SimpleExpr {
    ilike(column, format!("%{}%", escape_like(fragment)))
}

/// `LOWER(col) LIKE LOWER(pattern)`: both sides fold with the store's own `LOWER`.
fn ilike<Col: ColumnTrait>(column: Col, pattern: String) -> SimpleExpr {
    Expr::cust_with_exprs(
        "LOWER($1) LIKE LOWER($2) ESCAPE '!'",
        [qualified(column), Expr::val(pattern).into()],
    )
}

/// `"table"."column"`, so the expression stays unambiguous under joins.
fn qualified<Col: ColumnTrait>(column: Col) -> SimpleExpr {
    Expr::col((Col::EntityName::default(), column)).into()
}

/// Escape `LIKE` metacharacters so user input only ever matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
