use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use tower_sessions::Session;
use tracing::debug;

use crate::auth::repo_types::User;

pub const SESSION_USER_ID: &str = "userId";
pub const SESSION_USERNAME: &str = "username";

/// Logged-in user as carried by the session cookie. Rejects with a redirect
/// to `/login` whenever the session is missing or incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
}

impl SessionUser {
    pub async fn store(session: &Session, user: &User) -> anyhow::Result<()> {
        session.cycle_id().await?;
        session.insert(SESSION_USER_ID, user.id).await?;
        session.insert(SESSION_USERNAME, &user.username).await?;
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| Redirect::to("/login"))?;

        let id = session.get::<i64>(SESSION_USER_ID).await.ok().flatten();
        let username = session.get::<String>(SESSION_USERNAME).await.ok().flatten();
        match (id, username) {
            (Some(id), Some(username)) => Ok(SessionUser { id, username }),
            _ => {
                debug!("no active session; redirecting to login");
                Err(Redirect::to("/login"))
            }
        }
    }
}
