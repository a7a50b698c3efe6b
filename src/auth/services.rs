use tracing::{debug, info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::UserStore;
use crate::auth::repo_types::User;
use crate::db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Username is required.")]
    UsernameRequired,
    #[error("Username already exists.")]
    UsernameTaken,
    #[error("Password is required.")]
    PasswordRequired,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for RegisterError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation => RegisterError::UsernameTaken,
            other => RegisterError::Internal(other.into()),
        }
    }
}

pub(crate) fn normalize_username(username: &str) -> &str {
    username.trim()
}

/// Creates an account. The existence check only short-circuits the common
/// case; a concurrent insert is caught by the store's unique constraint.
pub async fn register(
    users: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<User, RegisterError> {
    let username = normalize_username(username);
    if username.is_empty() {
        return Err(RegisterError::UsernameRequired);
    }
    if users.exists_by_username(username).await? {
        warn!(%username, "username already registered");
        return Err(RegisterError::UsernameTaken);
    }
    if password.trim().is_empty() {
        return Err(RegisterError::PasswordRequired);
    }

    let hash = hash_password(password)?;
    let user = users.create(username, &hash).await.map_err(|e| {
        if matches!(e, StoreError::UniqueViolation) {
            warn!(%username, "lost registration race on username");
        }
        RegisterError::from(e)
    })?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Returns the user only when the credentials match. Unknown user, wrong
/// password and unreadable stored hash are indistinguishable to the caller.
pub async fn authenticate(
    users: &dyn UserStore,
    username: &str,
    password: &str,
) -> anyhow::Result<Option<User>> {
    let username = normalize_username(username);
    if username.is_empty() || password.trim().is_empty() {
        return Ok(None);
    }

    let Some(user) = users.find_by_username(username).await? else {
        debug!(%username, "login unknown username");
        return Ok(None);
    };

    match verify_password(password, &user.password_hash) {
        Ok(true) => Ok(Some(user)),
        Ok(false) => {
            warn!(user_id = user.id, "login invalid password");
            Ok(None)
        }
        Err(e) => {
            warn!(user_id = user.id, error = %e, "stored password hash unreadable");
            Ok(None)
        }
    }
}

pub async fn find_by_id(users: &dyn UserStore, user_id: i64) -> anyhow::Result<Option<User>> {
    Ok(users.find_by_id(user_id).await?)
}
