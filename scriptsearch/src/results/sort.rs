//! Result ordering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::core::SearchResult;

/// Field a result set can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Upload date.
    #[default]
    UploadDate,
    /// Video length.
    Duration,
    /// Channel name, case-insensitive.
    ChannelName,
    /// Video title, case-insensitive.
    Title,
    /// Number of transcript matches.
    MatchCount,
}

impl SortField {
    /// Every field, in dropdown order.
    pub const ALL: [Self; 5] = [
        Self::UploadDate,
        Self::Duration,
        Self::ChannelName,
        Self::Title,
        Self::MatchCount,
    ];

    /// Stable key used in config files and on the command line.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::UploadDate => "upload_date",
            Self::Duration => "duration",
            Self::ChannelName => "channel_name",
            Self::Title => "title",
            Self::MatchCount => "match_count",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::UploadDate => "Upload date",
            Self::Duration => "Duration",
            Self::ChannelName => "Channel",
            Self::Title => "Title",
            Self::MatchCount => "Matches",
        }
    }

    fn compare(self, a: &SearchResult, b: &SearchResult) -> Ordering {
        match self {
            Self::UploadDate => a.upload_date.cmp(&b.upload_date),
            Self::Duration => a.duration_seconds.cmp(&b.duration_seconds),
            Self::ChannelName => caseless_cmp(&a.channel_name, &b.channel_name),
            Self::Title => caseless_cmp(&a.title, &b.title),
            Self::MatchCount => a.match_count().cmp(&b.match_count()),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| format!("unknown sort field: {s}"))
    }
}

/// Sort field plus direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to order by.
    #[serde(default)]
    pub field: SortField,
    /// `false` sorts descending.
    #[serde(default)]
    pub ascending: bool,
}

impl SortSpec {
    /// Descending order on `field`.
    #[must_use]
    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            ascending: false,
        }
    }

    /// Ascending order on `field`.
    #[must_use]
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            ascending: true,
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.ascending { "asc" } else { "desc" };
        write!(f, "{} {direction}", self.field)
    }
}

fn caseless_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Sorts results in place. Ties keep their relative order in both directions.
pub fn sort_results(results: &mut [SearchResult], spec: &SortSpec) {
    let field = spec.field;
    if spec.ascending {
        results.sort_by(|a, b| field.compare(a, b));
    } else {
        results.sort_by(|a, b| field.compare(b, a));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ResultBuilder;
    use pretty_assertions::assert_eq;

    fn ids(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.source_id.as_str()).collect()
    }

    #[test]
    fn test_match_count_descending() {
        let mut results = vec![
            ResultBuilder::new("one").with_match_count(1).build(),
            ResultBuilder::new("three").with_match_count(3).build(),
            ResultBuilder::new("two").with_match_count(2).build(),
        ];

        sort_results(&mut results, &SortSpec::descending(SortField::MatchCount));

        let counts: Vec<usize> = results.iter().map(SearchResult::match_count).collect();
        assert_eq!(counts, vec![3, 2, 1]);
    }

    #[test]
    fn test_equal_dates_keep_relative_order() {
        let mut results = vec![
            ResultBuilder::new("a").with_upload_date(2023, 1, 1).build(),
            ResultBuilder::new("b").with_upload_date(2023, 1, 1).build(),
            ResultBuilder::new("c").with_upload_date(2024, 1, 1).build(),
            ResultBuilder::new("d").with_upload_date(2023, 1, 1).build(),
        ];

        sort_results(&mut results, &SortSpec::descending(SortField::UploadDate));
        assert_eq!(ids(&results), vec!["c", "a", "b", "d"]);

        sort_results(&mut results, &SortSpec::ascending(SortField::UploadDate));
        assert_eq!(ids(&results), vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn test_title_is_case_insensitive() {
        let mut results = vec![
            ResultBuilder::new("1").with_title("banana").build(),
            ResultBuilder::new("2").with_title("Apple").build(),
            ResultBuilder::new("3").with_title("cherry").build(),
        ];

        sort_results(&mut results, &SortSpec::ascending(SortField::Title));
        assert_eq!(ids(&results), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_channel_and_duration() {
        let mut results = vec![
            ResultBuilder::new("1").with_channel_name("zeta").with_duration(30).build(),
            ResultBuilder::new("2").with_channel_name("Alpha").with_duration(90).build(),
            ResultBuilder::new("3").with_channel_name("beta").with_duration(60).build(),
        ];

        sort_results(&mut results, &SortSpec::descending(SortField::ChannelName));
        assert_eq!(ids(&results), vec!["1", "3", "2"]);

        sort_results(&mut results, &SortSpec::descending(SortField::Duration));
        assert_eq!(ids(&results), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_sort_field_keys() {
        for field in SortField::ALL {
            assert_eq!(field.key().parse::<SortField>().unwrap(), field);
        }
        assert!("views".parse::<SortField>().is_err());
        assert_eq!(
            serde_json::to_value(SortField::MatchCount).unwrap(),
            serde_json::json!("match_count")
        );
    }

    #[test]
    fn test_default_spec() {
        let spec = SortSpec::default();
        assert_eq!(spec.field, SortField::UploadDate);
        assert!(!spec.ascending);
        assert_eq!(spec.to_string(), "upload_date desc");
    }
}
