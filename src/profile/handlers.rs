use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use time::{Date, OffsetDateTime};
use tower_sessions::Session;
use tracing::{instrument, warn};

use crate::{
    auth::{extractors::SessionUser, repo_types::User, services::find_by_id},
    error::AppError,
    profile::{
        dto::{DashboardQuery, ProfileForm},
        services::{load_history, update_profile, ProfileOutcome},
        views::Dashboard,
    },
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/user", get(show_profile).post(submit_profile))
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Loads the session's account, or flushes a session that points at a
/// deleted user.
async fn session_account(
    state: &AppState,
    session: &Session,
    current: &SessionUser,
) -> Result<Option<User>, AppError> {
    let user = find_by_id(state.users.as_ref(), current.id).await?;
    if user.is_none() {
        warn!(user_id = current.id, "session refers to missing user");
        if let Err(e) = session.flush().await {
            warn!(error = %e, "session flush failed");
        }
    }
    Ok(user)
}

async fn render(
    state: &AppState,
    user: &User,
    edit_weights: bool,
    message: &str,
    error: &str,
) -> Result<String, AppError> {
    let history = load_history(state.weights.as_ref(), user.id).await?;
    Ok(Dashboard {
        user,
        history: &history,
        edit_weights,
        message,
        error,
        today: today(),
    }
    .render())
}

#[instrument(skip_all, fields(user_id = current.id, username = %current.username))]
pub async fn show_profile(
    State(state): State<AppState>,
    session: Session,
    current: SessionUser,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, AppError> {
    let Some(user) = session_account(&state, &session, &current).await? else {
        return Ok(Redirect::to("/login").into_response());
    };
    let message = query.message.as_deref().unwrap_or_default();
    let page = render(&state, &user, query.edit_requested(), message, "").await?;
    Ok(Html(page).into_response())
}

#[instrument(skip_all, fields(user_id = current.id, username = %current.username))]
pub async fn submit_profile(
    State(state): State<AppState>,
    session: Session,
    current: SessionUser,
    Form(form): Form<ProfileForm>,
) -> Result<Response, AppError> {
    let Some(user) = session_account(&state, &session, &current).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let (update, parse_errors) = form.parse();
    let outcome = update_profile(
        state.users.as_ref(),
        state.weights.as_ref(),
        user.clone(),
        update,
        parse_errors,
    )
    .await?;

    match outcome {
        ProfileOutcome::Rejected {
            errors,
            edit_weights,
        } => {
            let page = render(&state, &user, edit_weights, "", &errors.join("; ")).await?;
            Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
        }
        ProfileOutcome::Applied { user, message } => {
            let page = render(&state, &user, false, &message, "").await?;
            Ok(Html(page).into_response())
        }
    }
}
