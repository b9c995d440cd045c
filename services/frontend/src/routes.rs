//! Frontend routes
//!
//! Every screen handler reads the UI session, works out the current
//! [`Screen`], and either renders it or redirects to the screen the state
//! machine moved to.

use axum::{
    Extension, Form, Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use common::models::{NewUpload, UserProfile};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    error::FrontendResult,
    middleware::{SessionId, session_middleware},
    screen::{Event, Page, Screen},
    session::{Notice, Session},
    state::AppState,
    validation::{validate_credentials, validate_email, validate_media_filename},
    views::{
        FeedContent, FeedTemplate, LoginTab, LoginTemplate, UploadTemplate, render_template,
    },
};

/// Create the router for the frontend service
pub fn create_router(state: AppState) -> Router {
    let screens = Router::new()
        .route("/", get(feed_page))
        .route("/upload", get(upload_page).post(upload_submit))
        .route("/login", get(login_page).post(login_submit))
        .route("/signup", post(signup_submit))
        .route("/logout", post(logout))
        .route("/posts/:id/delete", post(delete_post))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(screens)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "frontend"
    }))
}

/// Credentials submitted by the login and signup forms
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Query parameters of the login screen
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub tab: Option<String>,
}

fn redirect(screen: Screen) -> Response {
    Redirect::to(screen.path()).into_response()
}

fn render_login(tab: LoginTab, email: &str, notice: Option<Notice>) -> FrontendResult<Response> {
    render_template(LoginTemplate::new(tab, email, notice))
}

/// Signed-in user and token, or the redirect for a signed-out session
fn signed_in(session: &Session, page: Page) -> Result<(&UserProfile, Option<&str>), Response> {
    match Screen::for_session(session).apply(Event::Navigate(page)) {
        Screen::LoggedIn(_) => match session.user() {
            Some(user) => Ok((user, session.token())),
            None => Err(redirect(Screen::LoggedOut)),
        },
        screen => Err(redirect(screen)),
    }
}

/// Login/signup screen
pub async fn login_page(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    Query(query): Query<LoginQuery>,
) -> FrontendResult<Response> {
    let session = state.sessions.get(id).await;
    let screen = Screen::for_session(&session);
    if screen != Screen::LoggedOut {
        return Ok(redirect(screen));
    }

    let tab = match query.tab.as_deref() {
        Some("signup") => LoginTab::Signup,
        _ => LoginTab::Login,
    };
    let notice = state.sessions.take_notice(id).await;

    render_login(tab, "", notice)
}

/// Login form submission
pub async fn login_submit(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    Form(form): Form<CredentialsForm>,
) -> FrontendResult<Response> {
    let email = form.email.trim();
    if let Err(message) = validate_credentials(email, &form.password) {
        return render_login(LoginTab::Login, email, Some(Notice::warning(message)));
    }

    match state.backend.login_session(email, &form.password).await {
        Ok((token, user)) => {
            info!("User {} signed in", user.email);
            state.sessions.set_session(id, token, user).await;
            state
                .sessions
                .push_notice(id, Notice::success("Welcome back."))
                .await;
            Ok(redirect(Screen::LoggedOut.apply(Event::LoginSucceeded)))
        }
        Err(e) => {
            warn!("Login failed for {}: {}", email, e);
            render_login(LoginTab::Login, email, Some(Notice::error(e.to_string())))
        }
    }
}

/// Signup form submission
pub async fn signup_submit(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> FrontendResult<Response> {
    let email = form.email.trim();
    let validated =
        validate_credentials(email, &form.password).and_then(|_| validate_email(email));
    if let Err(message) = validated {
        return render_login(LoginTab::Signup, email, Some(Notice::warning(message)));
    }

    match state.backend.register(email, &form.password).await {
        Ok(()) => {
            info!("Account created for {}", email);
            render_login(
                LoginTab::Signup,
                "",
                Some(Notice::success(
                    "Account created! Go to the Login tab to sign in.",
                )),
            )
        }
        Err(e) => {
            warn!("Signup failed for {}: {}", email, e);
            render_login(LoginTab::Signup, email, Some(Notice::error(e.to_string())))
        }
    }
}

/// Sign the UI session out
pub async fn logout(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> Response {
    let session = state.sessions.get(id).await;
    state.sessions.clear(id).await;
    redirect(Screen::for_session(&session).apply(Event::Logout))
}

/// Feed screen
pub async fn feed_page(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> FrontendResult<Response> {
    let session = state.sessions.get(id).await;
    let (user, token) = match signed_in(&session, Page::Feed) {
        Ok(signed_in) => signed_in,
        Err(redirect) => return Ok(redirect),
    };

    let notice = state.sessions.take_notice(id).await;
    let content = match state.backend.fetch_feed(token).await {
        Ok(posts) => FeedContent::Posts(posts),
        Err(e) => {
            error!("Failed to fetch feed: {}", e);
            FeedContent::Failed(e.to_string())
        }
    };

    render_template(FeedTemplate::new(user, notice, &content))
}

/// Upload screen
pub async fn upload_page(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
) -> FrontendResult<Response> {
    let session = state.sessions.get(id).await;
    let (user, _) = match signed_in(&session, Page::Upload) {
        Ok(signed_in) => signed_in,
        Err(redirect) => return Ok(redirect),
    };

    let notice = state.sessions.take_notice(id).await;
    render_template(UploadTemplate::new(user, notice, ""))
}

#[derive(Debug, Default)]
struct UploadForm {
    file: Option<SelectedFile>,
    caption: String,
}

#[derive(Debug)]
struct SelectedFile {
    filename: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl SelectedFile {
    /// Media type sent by the browser, guessed from the name when missing
    fn mime_type(&self) -> String {
        match self.content_type.as_deref() {
            Some(mime) if !mime.is_empty() && mime != "application/octet-stream" => {
                mime.to_string()
            }
            _ => mime_guess::from_path(&self.filename)
                .first_or_octet_stream()
                .to_string(),
        }
    }
}

async fn read_upload_form(mut multipart: Multipart) -> FrontendResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                // An empty file input still submits a nameless, empty part
                if !filename.is_empty() && !bytes.is_empty() {
                    form.file = Some(SelectedFile {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            Some("caption") => form.caption = field.text().await?,
            _ => {}
        }
    }

    Ok(form)
}

/// Share form submission
pub async fn upload_submit(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    multipart: Multipart,
) -> FrontendResult<Response> {
    let session = state.sessions.get(id).await;
    let (user, token) = match signed_in(&session, Page::Upload) {
        Ok(signed_in) => signed_in,
        Err(redirect) => return Ok(redirect),
    };

    let UploadForm { file, caption } = read_upload_form(multipart).await?;
    let render = |notice: Notice, caption: &str| {
        render_template(UploadTemplate::new(user, Some(notice), caption))
    };

    let Some(file) = file else {
        return render(Notice::warning("Choose a file to share."), &caption);
    };
    if let Err(message) = validate_media_filename(&file.filename) {
        return render(Notice::warning(message), &caption);
    }

    let mime_type = file.mime_type();
    let SelectedFile { filename, bytes, .. } = file;
    let upload = NewUpload {
        bytes,
        filename: filename.clone(),
        mime_type,
        caption: caption.clone(),
    };

    match state.backend.upload_post(token, upload).await {
        Ok(()) => {
            info!("User {} shared {}", user.email, filename);
            state.sessions.push_notice(id, Notice::success("Posted.")).await;
            Ok(redirect(
                Screen::LoggedIn(Page::Upload).apply(Event::ShareSucceeded),
            ))
        }
        Err(e) => {
            error!("Upload failed for {}: {}", user.email, e);
            render(Notice::error(e.to_string()), &caption)
        }
    }
}

/// Delete a post immediately
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    Path(post_id): Path<String>,
) -> Response {
    let session = state.sessions.get(id).await;
    let (user, token) = match signed_in(&session, Page::Feed) {
        Ok(signed_in) => signed_in,
        Err(redirect) => return redirect,
    };

    let feed = Screen::LoggedIn(Page::Feed);
    match state.backend.delete_post(token, &post_id).await {
        Ok(()) => {
            info!("User {} deleted post {}", user.email, post_id);
            state.sessions.push_notice(id, Notice::success("Deleted.")).await;
            redirect(feed.apply(Event::DeleteSucceeded))
        }
        Err(e) => {
            error!("Failed to delete post {}: {}", post_id, e);
            state.sessions.push_notice(id, Notice::error(e.to_string())).await;
            redirect(feed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{middleware::SESSION_COOKIE, session::SessionStore};
    use axum::{
        body::{Body, to_bytes},
        http::{HeaderMap, Request, StatusCode, header},
    };
    use common::backend::{BackendClient, BackendConfig};
    use serde_json::Value;
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
        time::Duration,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    const TOKEN: &str = "tok-123";
    const BOUNDARY: &str = "----social-test-boundary";

    #[derive(Clone, Default)]
    struct MockBackend {
        profile_auth: Arc<Mutex<Vec<Option<String>>>>,
        posts: Arc<Mutex<Value>>,
        uploads: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
        deletes: Arc<Mutex<Vec<String>>>,
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers.get(header::AUTHORIZATION).and_then(|h| h.to_str().ok()) == Some("Bearer tok-123")
    }

    async fn spawn_backend(posts: Value) -> (MockBackend, String) {
        let mock = MockBackend::default();
        *mock.posts.lock().unwrap() = posts;

        let app = Router::new()
            .route(
                "/auth/jwt/login",
                post(|Form(form): Form<HashMap<String, String>>| async move {
                    match form.get("password").map(String::as_str) {
                        Some("correct") => (StatusCode::OK, Json(json!({"access_token": TOKEN}))),
                        // Accepted by the login endpoint, rejected by /users/me
                        Some("noprofile") => (
                            StatusCode::OK,
                            Json(json!({"access_token": "tok-noprofile"})),
                        ),
                        _ => (
                            StatusCode::BAD_REQUEST,
                            Json(json!({"detail": "LOGIN_BAD_CREDENTIALS"})),
                        ),
                    }
                }),
            )
            .route(
                "/users/me",
                get(|State(mock): State<MockBackend>, headers: HeaderMap| async move {
                    let value = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|h| h.to_str().ok())
                        .map(str::to_string);
                    mock.profile_auth.lock().unwrap().push(value);
                    if authorized(&headers) {
                        (StatusCode::OK, Json(json!({"email": "ada@example.com"})))
                    } else {
                        (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Unauthorized"})))
                    }
                }),
            )
            .route(
                "/feed",
                get(|State(mock): State<MockBackend>, headers: HeaderMap| async move {
                    if !authorized(&headers) {
                        return (StatusCode::UNAUTHORIZED, Json(json!({})));
                    }
                    let posts = mock.posts.lock().unwrap().clone();
                    (StatusCode::OK, Json(json!({ "posts": posts })))
                }),
            )
            .route(
                "/upload",
                post(
                    |State(mock): State<MockBackend>, mut multipart: Multipart| async move {
                        while let Ok(Some(field)) = multipart.next_field().await {
                            let name = field.file_name().map(str::to_string);
                            let bytes = field.bytes().await.unwrap_or_default();
                            if let Some(name) = name {
                                mock.uploads.lock().unwrap().push((name, bytes.to_vec()));
                            }
                        }
                        StatusCode::OK
                    },
                ),
            )
            .route(
                "/posts/:id",
                axum::routing::delete(
                    |State(mock): State<MockBackend>, Path(id): Path<String>| async move {
                        mock.deletes.lock().unwrap().push(id.clone());
                        if id == "mine" {
                            StatusCode::OK
                        } else {
                            StatusCode::FORBIDDEN
                        }
                    },
                ),
            )
            .with_state(mock.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend");
        });

        (mock, format!("http://{}", addr))
    }

    fn app_state(backend_url: String) -> AppState {
        AppState {
            backend: BackendClient::new(BackendConfig::new(backend_url)),
            sessions: SessionStore::new(Duration::from_secs(3600)),
            max_upload_bytes: 1024 * 1024,
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    fn cookie(id: Uuid) -> String {
        format!("{}={}", SESSION_COOKIE, id)
    }

    /// Session id issued through `Set-Cookie`, if any
    fn issued_session(response: &Response) -> Option<Uuid> {
        let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
        let pair = value.split(';').next()?;
        let id = pair.strip_prefix(&format!("{}=", SESSION_COOKIE))?;
        Uuid::parse_str(id).ok()
    }

    fn login_request(body: &'static str) -> Request<Body> {
        Request::post("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn signed_in_session(state: &AppState) -> Uuid {
        let (id, _) = state.sessions.resolve(None).await;
        state
            .sessions
            .set_session(id, TOKEN.to_string(), UserProfile::new("ada@example.com"))
            .await;
        id
    }

    fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, filename, content) in parts {
            body.push_str(&format!("--{}\r\n", BOUNDARY));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    name, filename
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));
        body
    }

    fn upload_request(id: Uuid, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(header::COOKIE, cookie(id))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn setup(posts: Value) -> (AppState, MockBackend) {
        let (mock, url) = spawn_backend(posts).await;
        (app_state(url), mock)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (state, _mock) = setup(json!([])).await;
        let response = create_router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_signed_out_visitor_is_sent_to_login() {
        let (state, _mock) = setup(json!([])).await;
        let response = create_router(state)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_cookieless_visits_store_no_sessions() {
        let (state, _mock) = setup(json!([])).await;
        let app = create_router(state.clone());

        for _ in 0..1000 {
            let response = app
                .clone()
                .oneshot(Request::get("/login").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert!(issued_session(&response).is_none());
        }

        assert_eq!(state.sessions.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn test_login_stores_session_and_shows_feed() {
        let (state, mock) = setup(json!([{
            "id": "p-1",
            "email": "bob@example.com",
            "created_at": "2025-03-02T10:00:00",
            "caption": "sunset",
            "file_type": "image",
            "url": "https://ik.imagekit.io/demo/sunset.jpg",
            "is_owner": false
        }]))
        .await;
        let app = create_router(state.clone());

        let response = app
            .clone()
            .oneshot(login_request("email=ada%40example.com&password=correct"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        let id = issued_session(&response).expect("login issues a session cookie");
        assert_eq!(
            mock.profile_auth.lock().unwrap().as_slice(),
            &[Some("Bearer tok-123".to_string())]
        );

        let session = state.sessions.get(id).await;
        assert_eq!(session.token(), Some(TOKEN));
        assert_eq!(session.user().map(|u| u.email.as_str()), Some("ada@example.com"));

        let response = app
            .oneshot(
                Request::get("/")
                    .header(header::COOKIE, cookie(id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Welcome back."));
        assert!(html.contains("bob@example.com"));
        assert!(html.contains("Mar 02, 2025"));
        assert!(html.contains("/tr:l-text,ie-c3Vuc2V0,"));
        assert!(!html.contains("/posts/p-1/delete"));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_empty() {
        let (state, mock) = setup(json!([])).await;

        let response = create_router(state.clone())
            .oneshot(login_request("email=ada%40example.com&password=wrong"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(issued_session(&response).is_none());
        assert!(body_text(response).await.contains("Invalid email or password."));
        assert!(mock.profile_auth.lock().unwrap().is_empty());
        assert_eq!(state.sessions.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn test_login_without_profile_stores_nothing() {
        let (state, mock) = setup(json!([])).await;
        let (id, _) = state.sessions.resolve(None).await;
        state.sessions.push_notice(id, Notice::info("Hello.")).await;

        let response = create_router(state.clone())
            .oneshot(
                Request::post("/login")
                    .header(header::COOKIE, cookie(id))
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("email=ada%40example.com&password=noprofile"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            body_text(response)
                .await
                .contains("Login succeeded, but failed to fetch user profile.")
        );
        assert_eq!(
            mock.profile_auth.lock().unwrap().as_slice(),
            &[Some("Bearer tok-noprofile".to_string())]
        );
        let session = state.sessions.get(id).await;
        assert_eq!(session, Session::default());
        assert_eq!(session.token(), None);
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let (state, _mock) = setup(json!([])).await;

        let response = create_router(state)
            .oneshot(
                Request::post("/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("email=ada%40example.com&password="))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            body_text(response)
                .await
                .contains("Please enter both email and password.")
        );
    }

    #[tokio::test]
    async fn test_empty_feed_shows_placeholder() {
        let (state, _mock) = setup(json!([])).await;
        let id = signed_in_session(&state).await;

        let response = create_router(state)
            .oneshot(
                Request::get("/")
                    .header(header::COOKIE, cookie(id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("No posts yet. Go be the first."));
    }

    #[tokio::test]
    async fn test_upload_without_file_issues_no_request() {
        let (state, mock) = setup(json!([])).await;
        let id = signed_in_session(&state).await;

        let body = multipart_body(&[("file", Some(""), ""), ("caption", None, "no file here")]);
        let response = create_router(state)
            .oneshot(upload_request(id, body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Choose a file to share."));
        assert!(html.contains("no file here"));
        assert!(mock.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_type() {
        let (state, mock) = setup(json!([])).await;
        let id = signed_in_session(&state).await;

        let body = multipart_body(&[("file", Some("notes.txt"), "hello"), ("caption", None, "")]);
        let response = create_router(state)
            .oneshot(upload_request(id, body))
            .await
            .unwrap();

        assert!(body_text(response).await.contains("Unsupported file type."));
        assert!(mock.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_share_returns_to_feed() {
        let (state, mock) = setup(json!([])).await;
        let id = signed_in_session(&state).await;

        let body = multipart_body(&[("file", Some("cat.png"), "PNGDATA"), ("caption", None, "cat")]);
        let response = create_router(state.clone())
            .oneshot(upload_request(id, body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert_eq!(
            mock.uploads.lock().unwrap().as_slice(),
            &[("cat.png".to_string(), b"PNGDATA".to_vec())]
        );
        assert_eq!(
            state.sessions.take_notice(id).await,
            Some(Notice::success("Posted."))
        );
    }

    #[tokio::test]
    async fn test_delete_outcomes() {
        let (state, mock) = setup(json!([])).await;
        let id = signed_in_session(&state).await;
        let app = create_router(state.clone());

        for (post_id, expected) in [
            ("mine", Notice::success("Deleted.")),
            ("theirs", Notice::error("Delete failed.")),
        ] {
            let response = app
                .clone()
                .oneshot(
                    Request::post(format!("/posts/{}/delete", post_id))
                        .header(header::COOKIE, cookie(id))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[header::LOCATION], "/");
            assert_eq!(state.sessions.take_notice(id).await, Some(expected));
        }

        assert_eq!(
            mock.deletes.lock().unwrap().as_slice(),
            &["mine".to_string(), "theirs".to_string()]
        );
    }

    #[tokio::test]
    async fn test_delete_post_id_with_reserved_characters() {
        let (state, mock) = setup(json!([])).await;
        let id = signed_in_session(&state).await;

        let response = create_router(state)
            .oneshot(
                Request::post(crate::views::delete_path("a/b?c"))
                    .header(header::COOKIE, cookie(id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(mock.deletes.lock().unwrap().as_slice(), &["a/b?c".to_string()]);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (state, _mock) = setup(json!([])).await;
        let id = signed_in_session(&state).await;

        let response = create_router(state.clone())
            .oneshot(
                Request::post("/logout")
                    .header(header::COOKIE, cookie(id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
        assert_eq!(state.sessions.get(id).await, Session::default());
        assert_eq!(state.sessions.active_sessions().await, 0);
    }
}
