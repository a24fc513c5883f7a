//! Display helpers for result cards.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Thumbnail host for video ids.
pub const THUMBNAIL_BASE_URL: &str = "https://i.ytimg.com/vi";

/// Short-link host for deep links into a video.
pub const WATCH_BASE_URL: &str = "https://youtu.be";

/// `MM:SS` under an hour, `H:MM:SS` otherwise.
#[must_use]
pub fn format_timestamp(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// `MM/DD/YYYY`.
#[must_use]
pub fn format_upload_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// A run of snippet text, highlighted if it sat inside `<mark>` tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetSegment {
    /// Text with tags removed.
    pub text: String,
    /// Whether the text was marked.
    pub highlighted: bool,
}

impl SnippetSegment {
    fn new(text: &str, highlighted: bool) -> Self {
        Self {
            text: text.to_string(),
            highlighted,
        }
    }
}

static MARK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?mark>").expect("mark tag pattern is valid"));

/// Splits a snippet on `<mark>`/`</mark>` tags.
///
/// Odd-numbered pieces are the marked ones. Empty pieces are dropped.
#[must_use]
pub fn highlight_segments(snippet: &str) -> Vec<SnippetSegment> {
    MARK_TAG
        .split(snippet)
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(index, part)| SnippetSegment::new(part, index % 2 == 1))
        .collect()
}

/// Snippet with tags removed.
#[must_use]
pub fn plain_snippet(snippet: &str) -> String {
    MARK_TAG.replace_all(snippet, "").into_owned()
}

/// Medium-quality thumbnail for a video.
#[must_use]
pub fn thumbnail_url(video_id: &str) -> String {
    format!("{THUMBNAIL_BASE_URL}/{video_id}/mqdefault.jpg")
}

/// Link that starts playback at `timestamp_seconds`.
#[must_use]
pub fn watch_url(video_id: &str, timestamp_seconds: u64) -> String {
    format!("{WATCH_BASE_URL}/{video_id}?t={timestamp_seconds}")
}
