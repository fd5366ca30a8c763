use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter};

use crate::entities::user;
use crate::error::AppError;

const MAX_USERNAME_LEN: usize = 50;

/// A user row as provisioned by the auth service.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    /// Opaque password hash; this crate never verifies it.
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub struct UserRepository;

impl UserRepository {
    pub async fn find_active<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Option<user::Model>, AppError> {
        Ok(user::Entity::find_by_id(user_id)
            .filter(user::Column::IsActive.eq(true))
            .one(db)
            .await?)
    }

    /// Active user by id, or `NotFound`.
    pub async fn get<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<user::Model, AppError> {
        Self::find_active(db, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User", user_id))
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        new_user: NewUser,
    ) -> Result<user::Model, AppError> {
        let username = validate_username(&new_user.username)?;

        let user = user::ActiveModel {
            username: Set(username.clone()),
            password: Set(new_user.password),
            is_active: Set(true),
            ..Default::default()
        };

        user.insert(db)
            .await
            .map_err(|e| AppError::from_insert(e, || format!("Username '{username}' is taken.")))
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        changes: UserUpdate,
    ) -> Result<user::Model, AppError> {
        let existing = Self::get(db, user_id).await?;
        if changes.username.is_none() && changes.password.is_none() {
            return Ok(existing);
        }

        let mut active = existing.into_active_model();
        let mut new_name = None;
        if let Some(username) = changes.username {
            let username = validate_username(&username)?;
            active.username = Set(username.clone());
            new_name = Some(username);
        }
        if let Some(password) = changes.password {
            active.password = Set(password);
        }

        active.update(db).await.map_err(|e| {
            AppError::from_insert(e, || {
                format!("Username '{}' is taken.", new_name.unwrap_or_default())
            })
        })
    }

    pub async fn soft_delete<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<(), AppError> {
        let existing = Self::get(db, user_id).await?;
        let mut active = existing.into_active_model();
        active.is_active = Set(false);
        active.update(db).await?;
        Ok(())
    }
}

fn validate_username(username: &str) -> Result<String, AppError> {
    let trimmed = username.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::BadRequest(format!(
            "username must be 1 to {MAX_USERNAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
