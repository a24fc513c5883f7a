//! Search result fixtures.

use chrono::NaiveDate;

use crate::core::{Match, SearchResult};

/// Builds [`SearchResult`] values with sensible defaults.
#[derive(Debug, Clone)]
pub struct ResultBuilder {
    result: SearchResult,
}

impl ResultBuilder {
    /// A result for `video_id` uploaded 2020-01-01 with no matches.
    #[must_use]
    pub fn new(video_id: impl Into<String>) -> Self {
        let video_id = video_id.into();
        Self {
            result: SearchResult {
                title: format!("Video {video_id}"),
                source_id: video_id,
                channel_id: None,
                channel_name: "Test Channel".to_string(),
                upload_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
                duration_seconds: 600,
                matches: Vec::new(),
            },
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.result.title = title.into();
        self
    }

    /// Sets the channel name.
    #[must_use]
    pub fn with_channel_name(mut self, name: impl Into<String>) -> Self {
        self.result.channel_name = name.into();
        self
    }

    /// Sets the channel id.
    #[must_use]
    pub fn with_channel_id(mut self, id: impl Into<String>) -> Self {
        self.result.channel_id = Some(id.into());
        self
    }

    /// Sets the upload date. Invalid dates leave the default in place.
    #[must_use]
    pub fn with_upload_date(mut self, year: i32, month: u32, day: u32) -> Self {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            self.result.upload_date = date;
        }
        self
    }

    /// Sets the duration.
    #[must_use]
    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.result.duration_seconds = seconds;
        self
    }

    /// Appends a match.
    #[must_use]
    pub fn with_match(mut self, snippet: impl Into<String>, timestamp_seconds: u64) -> Self {
        self.result.matches.push(Match::new(snippet, timestamp_seconds));
        self
    }

    /// Replaces the matches with `count` generated ones, a minute apart.
    #[must_use]
    pub fn with_match_count(mut self, count: usize) -> Self {
        self.result.matches = (0..count)
            .map(|i| Match::new(format!("match <mark>{i}</mark>"), i as u64 * 60))
            .collect();
        self
    }

    /// Finishes the result.
    #[must_use]
    pub fn build(self) -> SearchResult {
        self.result
    }
}

/// `count` results `v0..v{count}` with distinct dates, durations and match counts.
#[must_use]
pub fn sample_results(count: usize) -> Vec<SearchResult> {
    (0..count)
        .map(|i| {
            let day = u32::try_from(i % 28).unwrap_or(0) + 1;
            ResultBuilder::new(format!("v{i}"))
                .with_title(format!("Episode {i}"))
                .with_channel_name(format!("Channel {}", i % 3))
                .with_upload_date(2020 + i32::try_from(i / 28).unwrap_or(0), 1, day)
                .with_duration(60 * (i as u64 + 1))
                .with_match_count(i % 5 + 1)
                .build()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_builder() {
        let result = ResultBuilder::new("abc")
            .with_title("Hello")
            .with_channel_id("UC1")
            .with_upload_date(2023, 5, 17)
            .with_match("a <mark>b</mark>", 30)
            .build();

        assert_eq!(result.source_id, "abc");
        assert_eq!(result.title, "Hello");
        assert_eq!(result.channel_id.as_deref(), Some("UC1"));
        assert_eq!(result.upload_date, NaiveDate::from_ymd_opt(2023, 5, 17).unwrap());
        assert_eq!(result.match_count(), 1);
    }

    #[test]
    fn test_sample_results() {
        let results = sample_results(12);
        assert_eq!(results.len(), 12);
        assert_eq!(results[0].match_count(), 1);
        assert_eq!(results[4].match_count(), 5);
        assert_ne!(results[0].upload_date, results[1].upload_date);
    }
}
