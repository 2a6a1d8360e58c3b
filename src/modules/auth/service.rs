use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use mytherion_auth::{Role, TokenCodec};
use mytherion_core::{AppError, hash_password, verify_password};
use mytherion_models::auth::{LoginRequest, RegisterRequest};
use mytherion_models::users::User;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, created_at, updated_at, deleted_at";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(email = %dto.email, username = %dto.username))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let email = dto.email.to_lowercase();
        let username = dto.username;

        // Emails stay reserved after soft delete; usernames are freed.
        let email_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(&email)
        .fetch_one(db)
        .await?;
        if email_taken {
            return Err(AppError::conflict(anyhow!("Email is already in use")));
        }

        let username_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND deleted_at IS NULL)",
        )
        .bind(&username)
        .fetch_one(db)
        .await?;
        if username_taken {
            return Err(AppError::conflict(anyhow!("Username is already taken")));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&username)
        .bind(&email)
        .bind(&password_hash)
        .bind(Role::User.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow!("Email or username is already in use"));
            }
            AppError::from(e)
        })?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn login_user(db: &PgPool, dto: LoginRequest) -> Result<User, AppError> {
        let email = dto.email.to_lowercase();

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(&email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid credentials")))?;

        if !verify_password(&dto.password, &user.password_hash)? {
            return Err(AppError::unauthorized(anyhow!("Invalid credentials")));
        }

        info!(user_id = user.id, "User logged in");
        Ok(user)
    }

    /// Signs an access token for `user` with its current email and role.
    pub fn issue_token(tokens: &TokenCodec, user: &User) -> Result<String, AppError> {
        tokens
            .issue(user.id, &user.email, user.role())
            .map_err(AppError::internal)
    }
}
