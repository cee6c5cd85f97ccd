use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub id: String,
    pub name: String,
    pub country: String,
    pub location: String,
    /// USD per year; 0 means the programme is free.
    pub tuition_fee: f64,
    pub ranking: u32,
    pub established_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ielts_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scholarships_available: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniversitiesResponse {
    pub universities: Vec<University>,
    pub total: usize,
}

impl UniversitiesResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub ielts_scores: Vec<f64>,
}

impl FilterOptions {
    /// Vocabulary entries for `key` containing `input`, case-insensitively.
    /// Only `country` and `course` carry a free-text vocabulary; `minIelts`
    /// offers every bucket regardless of input.
    pub fn suggest(&self, key: FilterKey, input: &str) -> Vec<String> {
        let needle = input.trim().to_lowercase();
        let pool = match key {
            FilterKey::Country => &self.countries,
            FilterKey::Course => &self.courses,
            FilterKey::MinIelts => {
                return self.ielts_scores.iter().map(|s| s.to_string()).collect();
            }
            _ => return Vec::new(),
        };

        pool.iter()
            .filter(|entry| needle.is_empty() || entry.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

/// How responses of overlapping listing requests are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RacePolicy {
    /// Only the response of the most recently issued request is applied.
    #[default]
    Sequenced,
    /// Every response is applied in arrival order; the last one to land wins.
    LastWriterWins,
}

impl FromStr for RacePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "sequenced" => Ok(Self::Sequenced),
            "last_writer_wins" => Ok(Self::LastWriterWins),
            other => Err(format!("unknown race policy '{}'", other)),
        }
    }
}

/// Query keys accepted by the listing service, in canonical query order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    Name,
    Country,
    Location,
    TuitionMin,
    TuitionMax,
    RankingMin,
    RankingMax,
    EstablishedMin,
    EstablishedMax,
    MinIelts,
    Course,
    Scholarships,
}

impl FilterKey {
    pub const ALL: [FilterKey; 12] = [
        FilterKey::Name,
        FilterKey::Country,
        FilterKey::Location,
        FilterKey::TuitionMin,
        FilterKey::TuitionMax,
        FilterKey::RankingMin,
        FilterKey::RankingMax,
        FilterKey::EstablishedMin,
        FilterKey::EstablishedMax,
        FilterKey::MinIelts,
        FilterKey::Course,
        FilterKey::Scholarships,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Name => "name",
            FilterKey::Country => "country",
            FilterKey::Location => "location",
            FilterKey::TuitionMin => "tuitionMin",
            FilterKey::TuitionMax => "tuitionMax",
            FilterKey::RankingMin => "rankingMin",
            FilterKey::RankingMax => "rankingMax",
            FilterKey::EstablishedMin => "establishedMin",
            FilterKey::EstablishedMax => "establishedMax",
            FilterKey::MinIelts => "minIelts",
            FilterKey::Course => "course",
            FilterKey::Scholarships => "scholarships",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown filter key '{}'", s))
    }
}

/// Filter values keyed by [`FilterKey`]. A key is either absent or holds a
/// non-empty, trimmed string; empty input is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    values: BTreeMap<FilterKey, String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub(crate) fn set(&mut self, key: FilterKey, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, trimmed.to_string());
        }
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Set keys and their values in canonical query order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Key/value pairs as sent to the listing service.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.iter().map(|(k, v)| (k.as_str(), v.to_string())).collect()
    }
}

impl<'a> FromIterator<(FilterKey, &'a str)> for FilterCriteria {
    fn from_iter<I: IntoIterator<Item = (FilterKey, &'a str)>>(iter: I) -> Self {
        let mut criteria = FilterCriteria::new();
        for (key, value) in iter {
            criteria.set(key, value);
        }
        criteria
    }
}
