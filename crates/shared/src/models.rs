use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome of resolving one content source.
///
/// Every source client reports through this type instead of raising:
/// `Unavailable` means a configured source failed (timeout, bad status,
/// malformed response), `Disabled` means the source was never configured.
/// Only the aggregator decides whether either of those is fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Fetched(T),
    Unavailable,
    Disabled,
}

impl<T> Fetch<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Fetch::Fetched(value) => Some(value),
            Fetch::Unavailable | Fetch::Disabled => None,
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, Fetch::Fetched(_))
    }
}

/// Placement of a curated article on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Top,
    Second,
    Brief,
}

/// A raw Guardian article, before curation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub summary: String,
    pub section: String,
    pub url: String,
}

/// One article as it appears on the page.
///
/// Invariant: `body` is non-empty unless `tier` is `Brief`; Brief entries
/// are headline-only and carry an empty body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub headline: String,
    pub body: String,
    pub source_url: String,
    pub tier: Tier,
}

/// Today's weather, all fields resolved together or not at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: i32,
    pub feels_like: Option<i32>,
    pub condition: String,
    pub high: i32,
    pub low: i32,
    pub sunrise: String,
    pub sunset: String,
    pub location: String,
}

/// The three reading references for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPlanEntry {
    pub old_testament: String,
    pub psalm: String,
    pub new_testament: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyVerse {
    pub text: String,
    pub reference: String,
}

/// A reading highlight pulled from Readwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    pub text: String,
    pub title: String,
    pub author: String,
}

/// Everything one edition needs, fully resolved before rendering.
///
/// Optional fields are `None` when their source was unavailable or
/// disabled; the renderer omits them rather than treating absence as an
/// error. `articles` is never empty (news is the one required source).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyContent {
    pub date: NaiveDate,
    pub articles: Vec<ArticleSummary>,
    pub weather: Option<WeatherSnapshot>,
    pub readings: Option<ReadingPlanEntry>,
    pub verse: DailyVerse,
    pub highlight: Option<Highlight>,
}
