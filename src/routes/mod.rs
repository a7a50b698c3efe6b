pub mod index;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    index::index_routes()
}
