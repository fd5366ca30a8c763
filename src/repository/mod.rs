//! Typed CRUD over the store.
//!
//! Every read that can reach an anonymous caller filters on `is_active = true`. The
//! `find_any` lookups skip that filter and exist for permission checks only.

mod games;
mod links;
mod users;
mod words;

pub use games::{GameRepository, GameUpdate, NewGame};
pub use links::{LinkRepository, MyLinkRow};
pub use users::{NewUser, UserRepository, UserUpdate};
pub use words::{NewWord, WordRepository, WordUpdate, WordWithAuthor};

/// Default page size when the caller gives no `limit`.
pub const DEFAULT_LIMIT: u64 = 10;
/// Upper bound applied to any caller-supplied `limit`.
pub const MAX_LIMIT: u64 = 20;

/// A clamped offset/limit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    /// Build a page from raw query values: `offset` is floored at 0, `limit` defaults to
    /// [`DEFAULT_LIMIT`] and is clamped into `1..=MAX_LIMIT`.
    #[must_use]
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Self {
        let offset = offset.map_or(0, |o| u64::try_from(o).unwrap_or(0));
        let limit = limit.map_or(DEFAULT_LIMIT, |l| {
            u64::try_from(l).unwrap_or(1).clamp(1, MAX_LIMIT)
        });
        Self { offset, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(
            Page::default(),
            Page {
                offset: 0,
                limit: DEFAULT_LIMIT
            }
        );
    }

    #[test]
    fn clamps_limit_into_range() {
        assert_eq!(Page::new(None, Some(500)).limit, MAX_LIMIT);
        assert_eq!(Page::new(None, Some(0)).limit, 1);
        assert_eq!(Page::new(None, Some(-3)).limit, 1);
        assert_eq!(Page::new(None, Some(15)).limit, 15);
    }

    #[test]
    fn floors_offset_at_zero() {
        assert_eq!(Page::new(Some(-10), None).offset, 0);
        assert_eq!(Page::new(Some(40), None).offset, 40);
    }
}
