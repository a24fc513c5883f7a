//! Result records returned by the transcript search service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One transcript snippet matching the query inside a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Snippet text, highlights wrapped in `<mark>` tags.
    #[serde(rename = "snippet")]
    pub snippet_text: String,
    /// Offset of the snippet into the video.
    #[serde(rename = "timestamp")]
    pub timestamp_seconds: u64,
}

impl Match {
    /// Creates a new match.
    #[must_use]
    pub fn new(snippet_text: impl Into<String>, timestamp_seconds: u64) -> Self {
        Self {
            snippet_text: snippet_text.into(),
            timestamp_seconds,
        }
    }
}

/// A video whose transcript matched the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Backend identifier of the video.
    #[serde(rename = "video_id")]
    pub source_id: String,
    /// Video title.
    pub title: String,
    /// Channel identifier, when the backend reports it.
    #[serde(default)]
    pub channel_id: Option<String>,
    /// Display name of the channel.
    pub channel_name: String,
    /// Upload date.
    #[serde(with = "compact_date")]
    pub upload_date: NaiveDate,
    /// Video length.
    #[serde(rename = "duration", default)]
    pub duration_seconds: u64,
    /// Matches in transcript order.
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl SearchResult {
    /// Number of transcript matches.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Minimal identifiers the backend returns when it resolves a source URL.
///
/// This is the payload kept in the source cache and attached to scoped
/// queries. A channel or playlist resolves to a channel id, a playlist or
/// single video to a list of video ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSource {
    /// Resolved channel identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// Resolved video identifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub video_ids: Vec<String>,
}

impl ResolvedSource {
    /// A source resolved to a whole channel.
    #[must_use]
    pub fn channel(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: Some(channel_id.into()),
            video_ids: Vec::new(),
        }
    }

    /// A source resolved to a list of videos.
    #[must_use]
    pub fn videos<I, S>(video_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            channel_id: None,
            video_ids: video_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// True when neither a channel nor any video was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channel_id.is_none() && self.video_ids.is_empty()
    }
}

/// Serde adapter for upload dates.
///
/// Accepts `20230115`, `"20230115"` or `"2023-01-15"`; writes `20230115`.
pub mod compact_date {
    use chrono::{Datelike, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Compact(u32),
        Text(String),
    }

    /// Parses a compact `YYYYMMDD` number.
    #[must_use]
    pub fn from_compact(value: u32) -> Option<NaiveDate> {
        let year = i32::try_from(value / 10_000).ok()?;
        NaiveDate::from_ymd_opt(year, (value / 100) % 100, value % 100)
    }

    /// Renders a date as a compact `YYYYMMDD` number.
    #[must_use]
    pub fn to_compact(date: NaiveDate) -> u32 {
        let year = u32::try_from(date.year()).unwrap_or(0);
        year * 10_000 + date.month() * 100 + date.day()
    }

    /// Serde `serialize_with` hook.
    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(to_compact(*date))
    }

    /// Serde `deserialize_with` hook.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        match RawDate::deserialize(deserializer)? {
            RawDate::Compact(value) => from_compact(value)
                .ok_or_else(|| de::Error::custom(format!("invalid upload date {value}"))),
            RawDate::Text(text) => NaiveDate::parse_from_str(&text, "%Y%m%d")
                .or_else(|_| NaiveDate::parse_from_str(&text, "%Y-%m-%d"))
                .map_err(|_| de::Error::custom(format!("invalid upload date {text:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_json(upload_date: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "video_id": "dQw4w9WgXcQ",
            "title": "Never Gonna Give You Up",
            "channel_id": "UCuAXFkgsw1L7xaCfnd5JJOw",
            "channel_name": "Rick Astley",
            "upload_date": upload_date,
            "duration": 213,
            "matches": [
                {"snippet": "never gonna <mark>give</mark> you up", "timestamp": 43}
            ]
        })
    }

    #[test]
    fn test_decode_wire_result() {
        let result: SearchResult = serde_json::from_value(sample_json(serde_json::json!(20091025))).unwrap();

        assert_eq!(result.source_id, "dQw4w9WgXcQ");
        assert_eq!(result.channel_name, "Rick Astley");
        assert_eq!(result.upload_date, NaiveDate::from_ymd_opt(2009, 10, 25).unwrap());
        assert_eq!(result.duration_seconds, 213);
        assert_eq!(result.matches, vec![Match::new("never gonna <mark>give</mark> you up", 43)]);
    }

    #[test]
    fn test_upload_date_accepts_strings() {
        for raw in [serde_json::json!("20091025"), serde_json::json!("2009-10-25")] {
            let result: SearchResult = serde_json::from_value(sample_json(raw)).unwrap();
            assert_eq!(result.upload_date, NaiveDate::from_ymd_opt(2009, 10, 25).unwrap());
        }
    }

    #[test]
    fn test_upload_date_rejects_garbage() {
        assert!(serde_json::from_value::<SearchResult>(sample_json(serde_json::json!(20091345))).is_err());
        assert!(serde_json::from_value::<SearchResult>(sample_json(serde_json::json!("last week"))).is_err());
    }

    #[test]
    fn test_upload_date_serializes_compact() {
        let result: SearchResult = serde_json::from_value(sample_json(serde_json::json!("2009-10-25"))).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["upload_date"], serde_json::json!(20091025));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let result: SearchResult = serde_json::from_value(serde_json::json!({
            "video_id": "abc",
            "title": "t",
            "channel_name": "c",
            "upload_date": 20200101
        }))
        .unwrap();

        assert!(result.channel_id.is_none());
        assert_eq!(result.duration_seconds, 0);
        assert_eq!(result.match_count(), 0);
    }

    #[test]
    fn test_resolved_source_serialization_skips_empty_fields() {
        let channel = serde_json::to_value(ResolvedSource::channel("UC123")).unwrap();
        assert_eq!(channel, serde_json::json!({"channel_id": "UC123"}));

        let videos = serde_json::to_value(ResolvedSource::videos(["a", "b"])).unwrap();
        assert_eq!(videos, serde_json::json!({"video_ids": ["a", "b"]}));
    }

    #[test]
    fn test_resolved_source_is_empty() {
        assert!(ResolvedSource::default().is_empty());
        assert!(!ResolvedSource::channel("UC123").is_empty());
        assert!(!ResolvedSource::videos(["a"]).is_empty());
    }
}
