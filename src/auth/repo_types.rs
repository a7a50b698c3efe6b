use sqlx::FromRow;
use time::{Date, OffsetDateTime};

/// User record in the database.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String, // Argon2 PHC string
    pub birth_date: Option<Date>,
    pub height: Option<i32>, // centimeters
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
