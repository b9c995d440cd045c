//! Common library for the Simple Social frontend
//!
//! This crate provides the pieces the UI layer builds on: the wire models of
//! the authentication and media backend, an HTTP client for it, the error
//! taxonomy surfaced to users, and the media CDN transform-URL builder.

pub mod backend;
pub mod error;
pub mod models;
pub mod transform;

/// Example usage of the backend client
///
/// ```rust,no_run
/// use common::backend::{BackendClient, BackendConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = BackendClient::new(BackendConfig::default());
///     let (token, user) = client.login_session("ada@example.com", "s3cret").await?;
///     let posts = client.fetch_feed(Some(&token)).await?;
///     println!("{} sees {} posts", user.email, posts.len());
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
