use std::sync::Arc;

use mytherion_auth::TokenCodec;
use mytherion_config::{AppConfig, CorsConfig, JwtConfig};
use mytherion_db::init_db_pool;
use sqlx::PgPool;

/// Shared, read-only application state cloned into every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: Arc<TokenCodec>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            db,
            tokens: Arc::new(TokenCodec::new(&jwt_config)),
            jwt_config,
            cors_config,
        }
    }
}

pub async fn init_app_state(config: &AppConfig) -> Result<AppState, sqlx::Error> {
    let db = init_db_pool(&config.database).await?;
    Ok(AppState::new(db, config.jwt.clone(), config.cors.clone()))
}
