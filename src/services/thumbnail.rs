use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::database::models::{CareerCategory, CareerEntry};

/// Domains whose image links need an authenticated session to render.
/// `instagram.com` also covers `cdninstagram.com`.
const BLOCKED_POSTER_DOMAINS: [&str; 3] = ["instagram.com", "twitter.com", "facebook.com"];

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/|shorts/|live/)|youtu\.be/)([A-Za-z0-9_-]{11})",
    )
    .expect("YouTube id pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Thumbnail {
    Image { url: String },
    Placeholder { glyph: &'static str },
}

pub fn youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn youtube_thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id)
}

/// True when `url` mentions a social-media domain anywhere, including
/// proxied or redirect links. Such posters cannot serve as public thumbnails.
pub fn is_blocked_poster(url: &str) -> bool {
    let url = url.to_lowercase();
    BLOCKED_POSTER_DOMAINS.iter().any(|blocked| url.contains(blocked))
}

/// Thumbnail image URL for an entry: a usable poster first, then a video
/// thumbnail, else none.
pub fn resolve_thumbnail_url(poster_url: Option<&str>, video_url: Option<&str>) -> Option<String> {
    if let Some(poster) = poster_url.map(str::trim).filter(|p| !p.is_empty()) {
        if !is_blocked_poster(poster) {
            return Some(poster.to_string());
        }
    }

    video_url
        .and_then(youtube_video_id)
        .map(youtube_thumbnail_url)
}

pub fn placeholder_glyph(category: Option<CareerCategory>) -> &'static str {
    match category {
        Some(CareerCategory::Choreography) => "💃",
        Some(CareerCategory::Performance) => "🎭",
        Some(CareerCategory::Advertisement) => "📺",
        Some(CareerCategory::Tv) => "📡",
        Some(CareerCategory::Workshop) => "🎓",
        None => "🎬",
    }
}

pub fn thumbnail_for(entry: &CareerEntry) -> Thumbnail {
    match resolve_thumbnail_url(entry.poster_url.as_deref(), entry.video_url.as_deref()) {
        Some(url) => Thumbnail::Image { url },
        None => Thumbnail::Placeholder {
            glyph: placeholder_glyph(entry.category()),
        },
    }
}
