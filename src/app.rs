use axum::Router;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{auth, profile, routes};

pub fn build_app<S>(state: AppState, sessions: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(sessions)
        .with_secure(state.config.session.secure_cookie)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config.session.ttl_minutes,
        )));

    Router::new()
        .merge(routes::router())
        .merge(auth::router())
        .merge(profile::router())
        .with_state(state)
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, ?latency, "response");
                        } else {
                            tracing::info!(%status, ?latency, "response");
                        }
                    },
                ),
        )
}
