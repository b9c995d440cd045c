//! UI session management
//!
//! Every browser holds an opaque session id cookie. The id maps to a
//! [`UiSession`] kept in memory until it is signed out or left idle.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use common::models::UserProfile;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Authentication state of one UI session
///
/// Token and user are only ever set and cleared together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<UserProfile>,
}

impl Session {
    /// Bearer token for backend requests
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Profile of the signed-in user
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Whether a user is signed in
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Store the result of a successful login
    pub fn set_session(&mut self, token: String, user: UserProfile) {
        self.token = Some(token);
        self.user = Some(user);
    }

    /// Forget token and user
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// Severity of a [`Notice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

/// A message shown once at the top of a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Per-browser state: authentication plus a notice surviving one redirect
#[derive(Debug, Clone)]
struct UiSession {
    session: Session,
    flash: Option<Notice>,
    last_seen: Instant,
}

impl Default for UiSession {
    fn default() -> Self {
        Self {
            session: Session::default(),
            flash: None,
            last_seen: Instant::now(),
        }
    }
}

/// In-memory registry of UI sessions
///
/// An entry only exists once there is something to keep (a login or a
/// pending notice). Entries idle for longer than `idle_timeout` are dropped.
#[derive(Debug, Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<Uuid, UiSession>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Create an empty store
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Return the id of a live session, or a fresh id when `id` is unknown or expired
    ///
    /// A fresh id is not stored until something is written to it. The flag is
    /// `true` when the id is fresh.
    pub async fn resolve(&self, id: Option<Uuid>) -> (Uuid, bool) {
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, entry| entry.last_seen.elapsed() < self.idle_timeout);
        if entries.len() < before {
            info!(
                "Expired {} idle UI sessions, {} active",
                before - entries.len(),
                entries.len()
            );
        }

        if let Some(id) = id {
            if let Some(entry) = entries.get_mut(&id) {
                entry.last_seen = Instant::now();
                return (id, false);
            }
        }

        (Uuid::new_v4(), true)
    }

    /// Whether a session is stored under `id`
    pub async fn contains(&self, id: Uuid) -> bool {
        self.entries.read().await.contains_key(&id)
    }

    /// Number of stored sessions
    pub async fn active_sessions(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Copy of the authentication state of a session
    pub async fn get(&self, id: Uuid) -> Session {
        self.entries
            .read()
            .await
            .get(&id)
            .map(|entry| entry.session.clone())
            .unwrap_or_default()
    }

    /// Record a successful login
    pub async fn set_session(&self, id: Uuid, token: String, user: UserProfile) {
        info!("Signing in UI session {} as {}", id, user.email);
        self.entries
            .write()
            .await
            .entry(id)
            .or_default()
            .session
            .set_session(token, user);
    }

    /// Sign a session out and forget it
    pub async fn clear(&self, id: Uuid) {
        info!("Signing out UI session: {}", id);
        self.entries.write().await.remove(&id);
    }

    /// Queue a notice for the next rendered screen
    pub async fn push_notice(&self, id: Uuid, notice: Notice) {
        self.entries.write().await.entry(id).or_default().flash = Some(notice);
    }

    /// Take the queued notice, if any
    pub async fn take_notice(&self, id: Uuid) -> Option<Notice> {
        self.entries
            .write()
            .await
            .get_mut(&id)
            .and_then(|entry| entry.flash.take())
    }
}
