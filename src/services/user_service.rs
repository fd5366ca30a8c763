use sea_orm::ConnectionTrait;

use crate::dto::{UserProfile, WordResponse};
use crate::error::AppError;
use crate::repository::{UserRepository, WordRepository};

pub struct UserService;

impl UserService {
    /// Public profile: username and active words.
    pub async fn profile<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<UserProfile, AppError> {
        let user = UserRepository::get(db, user_id).await?;
        let words = WordRepository::list_by_author(db, user_id)
            .await?
            .into_iter()
            .map(|word| {
                let mut response = WordResponse::new(word, None);
                response.author_username = Some(user.username.clone());
                response
            })
            .collect();

        Ok(UserProfile {
            user_id: user.user_id,
            username: user.username,
            words,
        })
    }
}
