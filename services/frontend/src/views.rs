//! HTML rendering for the login/signup, feed and upload screens
//!
//! Every screen is an askama template under `templates/`. Text coming from
//! users or the backend is escaped by the template engine.

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use common::{
    models::{Post, UserProfile},
    transform::{VIDEO_PRESET, build_transformed_url},
};
use tracing::warn;

use crate::{error::FrontendResult, session::Notice, validation::MEDIA_EXTENSIONS};

/// Tabs of the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginTab {
    #[default]
    Login,
    Signup,
}

/// Outcome of fetching the feed
#[derive(Debug)]
pub enum FeedContent {
    Failed(String),
    Posts(Vec<Post>),
}

/// Render a template into an HTML response
pub fn render_template<T: Template>(template: T) -> FrontendResult<Response> {
    let html = template.render()?;
    Ok(Html(html).into_response())
}

/// Format a post timestamp as `Mar 02, 2025`, falling back to its first 10 characters
pub fn format_post_date(iso: &str) -> String {
    const FORMAT: &str = "%b %d, %Y";

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt.format(FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(iso, pattern) {
            return dt.format(FORMAT).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        return date.format(FORMAT).to_string();
    }

    iso.chars().take(10).collect()
}

/// CDN URL a post's media is displayed from
///
/// Images carry their caption as an overlay; everything else gets the
/// uniform video preset. URLs the CDN cannot transform are used as-is.
pub fn media_url(post: &Post) -> String {
    let result = if post.is_image() {
        build_transformed_url(&post.url, "", post.caption.trim())
    } else {
        build_transformed_url(&post.url, VIDEO_PRESET, "")
    };

    result.unwrap_or_else(|e| {
        warn!("Showing post {} untransformed: {}", post.id, e);
        post.url.clone()
    })
}

/// Path of the delete action for a post
pub fn delete_path(post_id: &str) -> String {
    format!("/posts/{}/delete", urlencoding::encode(post_id))
}

/// Login/signup screen
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub signup: bool,
    pub email: String,
    pub notice: Option<Notice>,
}

impl LoginTemplate {
    pub fn new(tab: LoginTab, email: &str, notice: Option<Notice>) -> Self {
        Self {
            signup: tab == LoginTab::Signup,
            email: email.to_string(),
            notice,
        }
    }
}

/// A post as shown in the feed
#[derive(Debug)]
pub struct PostCard {
    pub email: String,
    pub date: String,
    pub media_url: String,
    pub caption: String,
    pub is_image: bool,
    /// Only set for posts the user owns
    pub delete_path: Option<String>,
}

impl From<&Post> for PostCard {
    fn from(post: &Post) -> Self {
        Self {
            email: post.email.clone(),
            date: format_post_date(&post.created_at),
            media_url: media_url(post),
            caption: post.caption.trim().to_string(),
            is_image: post.is_image(),
            delete_path: post.is_owner.then(|| delete_path(&post.id)),
        }
    }
}

/// Feed screen
#[derive(Template)]
#[template(path = "feed.html")]
pub struct FeedTemplate {
    pub user_email: String,
    pub notice: Option<Notice>,
    pub failed: Option<String>,
    pub posts: Vec<PostCard>,
}

impl FeedTemplate {
    pub fn new(user: &UserProfile, notice: Option<Notice>, content: &FeedContent) -> Self {
        let (failed, posts) = match content {
            FeedContent::Failed(message) => (Some(message.clone()), Vec::new()),
            FeedContent::Posts(posts) => (None, posts.iter().map(PostCard::from).collect()),
        };

        Self {
            user_email: user.email.clone(),
            notice,
            failed,
            posts,
        }
    }
}

/// Upload screen; Share stays disabled until a file is chosen
#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadTemplate {
    pub user_email: String,
    pub notice: Option<Notice>,
    pub caption: String,
    pub accept: String,
}

impl UploadTemplate {
    pub fn new(user: &UserProfile, notice: Option<Notice>, caption: &str) -> Self {
        let accept = MEDIA_EXTENSIONS
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(",");

        Self {
            user_email: user.email.clone(),
            notice,
            caption: caption.to_string(),
            accept,
        }
    }
}

/// Bare page for infrastructure failures
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
}
