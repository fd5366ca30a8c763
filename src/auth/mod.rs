pub mod jwt;
pub mod middleware;

use serde::Serialize;

/// Identity of the caller, taken from a verified bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caller {
    pub user_id: i32,
    pub username: String,
    pub is_admin: bool,
}

impl Caller {
    /// Whether this caller may mutate a row owned by `owner_id`.
    #[must_use]
    pub const fn can_mutate(&self, owner_id: Option<i32>) -> bool {
        can_mutate(self.user_id, owner_id, self.is_admin)
    }
}

/// Admins may mutate anything; everyone else only rows they own.
///
/// Rows without an owner (`None`) are admin-only.
#[must_use]
pub const fn can_mutate(caller_id: i32, owner_id: Option<i32>, is_admin: bool) -> bool {
    if is_admin {
        return true;
    }
    match owner_id {
        Some(owner) => owner == caller_id,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_can_mutate() {
        assert!(can_mutate(7, Some(7), false));
    }

    #[test]
    fn stranger_cannot_mutate() {
        assert!(!can_mutate(7, Some(8), false));
    }

    #[test]
    fn admin_can_mutate_anything() {
        assert!(can_mutate(7, Some(8), true));
        assert!(can_mutate(7, None, true));
    }

    #[test]
    fn ownerless_rows_are_admin_only() {
        assert!(!can_mutate(7, None, false));
    }
}
