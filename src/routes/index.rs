use axum::{extract::State, response::Html, routing::get, Router};
use tracing::{instrument, warn};

use crate::{
    db::DbInfo,
    html::{self, text},
    state::AppState,
};

const README: &str = include_str!("../../README.md");

pub fn index_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/readme", get(readme))
        .route("/db", get(db_status))
        .route("/health", get(|| async { "ok" }))
}

pub async fn home() -> Html<String> {
    Html(html::page(
        "Home",
        "<h1>DietMath</h1>\
         <p>Track your weight and get a daily calorie target.</p>\
         <ul>\
         <li><a href=\"/register\">Register</a></li>\
         <li><a href=\"/login\">Login</a></li>\
         <li><a href=\"/user\">Profile</a></li>\
         <li><a href=\"/readme\">Readme</a></li>\
         <li><a href=\"/db\">Database status</a></li>\
         </ul>",
    ))
}

pub async fn readme() -> Html<String> {
    Html(html::page(
        "Readme",
        &format!("<h1>Readme</h1><pre>{}</pre><p><a href=\"/\">Home</a></p>", text(README)),
    ))
}

/// Outcome of probing the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbStatus {
    Up(DbInfo),
    Down(String),
}

impl DbStatus {
    fn details(&self) -> String {
        match self {
            DbStatus::Up(info) => match &info.product_version {
                Some(version) => format!("{} {}", info.product_name, version),
                None => info.product_name.clone(),
            },
            DbStatus::Down(error) => error.clone(),
        }
    }
}

#[instrument(skip(state))]
pub async fn db_status(State(state): State<AppState>) -> Html<String> {
    let status = match state.probe.describe().await {
        Ok(info) => DbStatus::Up(info),
        Err(e) => {
            warn!(error = %e, "database probe failed");
            DbStatus::Down(format!("{e:#}"))
        }
    };
    let label = match status {
        DbStatus::Up(_) => "UP",
        DbStatus::Down(_) => "DOWN",
    };
    Html(html::page(
        "Database",
        &format!(
            "<h1>Database: {label}</h1><p>{}</p><p><a href=\"/\">Home</a></p>",
            text(&status.details())
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_details_join_name_and_version() {
        let up = DbStatus::Up(DbInfo {
            product_name: "PostgreSQL".into(),
            product_version: Some("16.2".into()),
        });
        assert_eq!(up.details(), "PostgreSQL 16.2");
    }

    #[test]
    fn down_details_carry_error_text() {
        assert_eq!(
            DbStatus::Down("connection refused".into()).details(),
            "connection refused"
        );
    }
}
