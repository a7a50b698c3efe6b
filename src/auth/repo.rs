use async_trait::async_trait;

use crate::auth::repo_types::User;
use crate::db::{PgStore, StoreError};

/// Account persistence. Username uniqueness is enforced by the store itself.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError>;
    /// Fails with [`StoreError::UniqueViolation`] when the username is taken.
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;
    /// Persists birth date and height; bumps `updated_at`.
    async fn save_profile(&self, user: &User) -> Result<User, StoreError>;
}

const USER_COLUMNS: &str = "id, username, password_hash, birth_date, height, created_at, updated_at";

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn save_profile(&self, user: &User) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
               SET birth_date = $2, height = $3, updated_at = now()
             WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(user.birth_date)
        .bind(user.height)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}
