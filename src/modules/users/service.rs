use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use mytherion_core::AppError;
use mytherion_models::users::{UpdateUserDto, UserResponse};

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<UserResponse>, AppError> {
        let users = sqlx::query_as::<_, UserResponse>(
            "SELECT id, username FROM users WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(db)
        .await?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: i64) -> Result<UserResponse, AppError> {
        sqlx::query_as::<_, UserResponse>(
            "SELECT id, username FROM users WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    /// Updates the caller's own account. Other accounts are off limits.
    #[instrument(skip(db, dto))]
    pub async fn update_user(
        db: &PgPool,
        current_user_id: i64,
        id: i64,
        dto: UpdateUserDto,
    ) -> Result<UserResponse, AppError> {
        if current_user_id != id {
            return Err(AppError::forbidden(anyhow!(
                "You can only update your own account"
            )));
        }

        let user = Self::get_user(db, id).await?;

        let Some(username) = dto.username else {
            return Ok(user);
        };
        if username == user.username {
            return Ok(user);
        }

        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND deleted_at IS NULL AND id <> $2)",
        )
        .bind(&username)
        .bind(id)
        .fetch_one(db)
        .await?;
        if taken {
            return Err(AppError::conflict(anyhow!(
                "Username '{}' is already taken",
                username
            )));
        }

        let updated = sqlx::query_as::<_, UserResponse>(
            r#"UPDATE users
               SET username = $1, updated_at = NOW()
               WHERE id = $2 AND deleted_at IS NULL
               RETURNING id, username"#,
        )
        .bind(&username)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow!("Username '{}' is already taken", username));
            }
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        info!(user_id = id, "Username updated");
        Ok(updated)
    }

    /// Soft-deletes the caller's own account.
    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, current_user_id: i64, id: i64) -> Result<(), AppError> {
        if current_user_id != id {
            return Err(AppError::forbidden(anyhow!(
                "You can only delete your own account"
            )));
        }

        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        info!(user_id = id, "User soft-deleted");
        Ok(())
    }
}
