//! Middleware attaching a UI session to every screen request

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::state::AppState;

/// Session id cookie name
pub const SESSION_COOKIE: &str = "social_session";

/// Id of the UI session a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

/// Resolve the session cookie
///
/// Requests without a live session get a fresh id. Its cookie is only issued
/// when the handler stored something under it.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let presented = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

    let (id, fresh) = state.sessions.resolve(presented).await;

    // Add session ID to request extensions for use in handlers
    req.extensions_mut().insert(SessionId(id));

    let response = next.run(req).await;

    if fresh && state.sessions.contains(id).await {
        let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        (jar.add(cookie), response).into_response()
    } else {
        response
    }
}
