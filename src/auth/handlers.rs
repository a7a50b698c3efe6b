use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, LoginQuery, RegisterForm},
        extractors::SessionUser,
        services::{authenticate, register, RegisterError},
        views::{login_page, register_page},
    },
    error::AppError,
    state::AppState,
};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";
pub const REGISTERED: &str = "Registration successful. Please log in.";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form).post(submit_register))
        .route("/login", get(login_form).post(submit_login))
        .route("/logout", post(logout))
}

pub async fn register_form() -> Html<String> {
    Html(register_page("", "", ""))
}

#[instrument(skip(state, form))]
pub async fn submit_register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let errors = form.validate();
    if !errors.is_empty() {
        warn!(?errors, "registration form invalid");
        return Ok(rejected(register_page("error", &errors.join("; "), &form.username)));
    }

    match register(state.users.as_ref(), &form.username, &form.password).await {
        Ok(_) => Ok(Redirect::to("/login?registered=1").into_response()),
        Err(RegisterError::Internal(e)) => Err(AppError::Internal(e)),
        Err(reason) => Ok(rejected(register_page(
            "error",
            &reason.to_string(),
            &form.username,
        ))),
    }
}

#[instrument(skip_all)]
pub async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
    if query.registered.is_some() {
        Html(login_page("success", REGISTERED, ""))
    } else {
        Html(login_page("", "", ""))
    }
}

#[instrument(skip(state, session, form))]
pub async fn submit_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let Some(user) = authenticate(state.users.as_ref(), &form.username, &form.password).await?
    else {
        return Ok(rejected(login_page("error", INVALID_CREDENTIALS, &form.username)));
    };

    SessionUser::store(&session, &user).await?;
    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Redirect::to("/user").into_response())
}

#[instrument(skip_all)]
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = session.flush().await {
        warn!(error = %e, "session flush failed");
    }
    Redirect::to("/login")
}

fn rejected(page: String) -> Response {
    (StatusCode::BAD_REQUEST, Html(page)).into_response()
}
