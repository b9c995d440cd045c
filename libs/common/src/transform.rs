//! Media CDN transform URLs
//!
//! The CDN applies processing on fetch when a `tr:<directive>` segment follows
//! the endpoint part of a media URL, e.g.
//! `https://ik.imagekit.io/demo/tr:w-700,h-380/clip.mp4`.

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::TransformError;

/// Uniform pad-resize applied to videos in the feed
pub const VIDEO_PRESET: &str = "w-700,h-380,cm-pad_resize,bg-blurred";

/// Number of `/`-delimited segments forming the origin (`scheme:`, ``, host, endpoint)
const ORIGIN_SEGMENTS: usize = 4;

/// Encode overlay text the way the CDN expects for `ie-` parameters
///
/// The text is base64 encoded and then percent-encoded, leaving `/` intact.
pub fn encode_overlay_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let encoded = STANDARD.encode(text.as_bytes());
    urlencoding::encode(&encoded).replace("%2F", "/")
}

/// Bottom-anchored caption layer on a semi-transparent black background
pub fn caption_overlay(caption: &str) -> String {
    format!(
        "l-text,ie-{},ly-N20,lx-20,fs-100,co-white,bg-000000A0,l-end",
        encode_overlay_text(caption)
    )
}

/// Build the URL requesting `transform_params` (or a caption overlay) for `original_url`
///
/// A non-empty caption replaces `transform_params`. With no directive at all the
/// original URL is returned untouched.
pub fn build_transformed_url(
    original_url: &str,
    transform_params: &str,
    caption: &str,
) -> Result<String, TransformError> {
    let directive = if caption.is_empty() {
        transform_params.to_string()
    } else {
        caption_overlay(caption)
    };

    if directive.is_empty() {
        return Ok(original_url.to_string());
    }

    let parts: Vec<&str> = original_url.split('/').collect();
    if !has_cdn_shape(&parts) {
        return Err(TransformError::UnsupportedUrl(original_url.to_string()));
    }

    let origin = parts[..ORIGIN_SEGMENTS].join("/");
    let file_path = parts[ORIGIN_SEGMENTS..].join("/");

    Ok(format!("{}/tr:{}/{}", origin, directive, file_path))
}

fn has_cdn_shape(parts: &[&str]) -> bool {
    parts.len() > ORIGIN_SEGMENTS
        && parts[0].ends_with(':')
        && parts[1].is_empty()
        && !parts[2].is_empty()
        && !parts[3].is_empty()
        && parts[ORIGIN_SEGMENTS..].iter().any(|segment| !segment.is_empty())
}
