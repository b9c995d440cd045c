//! Input validation utilities

use regex::Regex;
use std::{path::Path, sync::OnceLock};

/// File extensions accepted by the upload screen
pub const MEDIA_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "mp4", "avi", "mov", "mkv", "webm"];

/// Validate that both credentials were entered
pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Please enter both email and password.".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate that a file is an image or video the backend accepts
pub fn validate_media_filename(filename: &str) -> Result<(), String> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) if MEDIA_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(format!(
            "Unsupported file type. Allowed: {}",
            MEDIA_EXTENSIONS.join(", ")
        )),
    }
}
