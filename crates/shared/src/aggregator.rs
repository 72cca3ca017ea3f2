//! Orchestrates one generation run: fan out to every source, apply the
//! per-source fallback policy, and assemble the payload.
//!
//! News is the one required source. Everything else degrades to an absent
//! field; curation degrades to positional tiering.

use anyhow::Result;
use chrono::NaiveDate;

use crate::config::{Config, CurationLimits, InterestProfile};
use crate::curator::{fallback_tiers, NewsCurator};
use crate::guardian::GuardianClient;
use crate::models::{ArticleSummary, DailyContent, Fetch, Highlight, NewsItem, WeatherSnapshot};
use crate::readings::reading_plan;
use crate::readwise::ReadwiseClient;
use crate::verse::daily_verse;
use crate::weather::WeatherClient;

/// How many raw headlines to pull for curation.
const HEADLINE_COUNT: usize = 15;

/// Every client one run needs, built once from configuration.
pub struct Sources {
    guardian: GuardianClient,
    weather: WeatherClient,
    readwise: Option<ReadwiseClient>,
    curator: Option<NewsCurator>,
    profile: InterestProfile,
    limits: CurationLimits,
}

impl Sources {
    /// Build the clients. `use_ai: false` forces the curation fallback
    /// path regardless of configuration.
    pub fn from_config(config: &Config, use_ai: bool) -> Result<Self> {
        let curator = match &config.anthropic_api_key {
            Some(key) if use_ai => {
                Some(NewsCurator::new(key.clone(), config.claude_model.clone())?)
            }
            _ => None,
        };

        let readwise = config
            .readwise_token
            .clone()
            .map(ReadwiseClient::new)
            .transpose()?;

        Ok(Self {
            guardian: GuardianClient::new(config.guardian_api_key.clone())?,
            weather: WeatherClient::new(
                config.location_lat,
                config.location_lon,
                config.location_name.clone(),
            )?,
            readwise,
            curator,
            profile: config.profile.clone(),
            limits: CurationLimits::default(),
        })
    }

    pub fn curation_enabled(&self) -> bool {
        self.curator.is_some()
    }

    pub fn highlights_enabled(&self) -> bool {
        self.readwise.is_some()
    }

    /// Run the full pipeline for one date. Fails only when news cannot be
    /// resolved; every other source failure degrades to an absent field.
    pub async fn collect(&self, date: NaiveDate) -> Result<DailyContent> {
        let highlight_fetch = async {
            match &self.readwise {
                Some(client) => client.fetch_random_highlight().await,
                None => Fetch::Disabled,
            }
        };

        // Independent sources run concurrently; curation waits on news below.
        let (news, weather, highlight) = tokio::join!(
            self.guardian.fetch_headlines(HEADLINE_COUNT),
            self.weather.fetch_today(),
            highlight_fetch,
        );

        let raw_articles = resolve_required_news(news)?;

        let articles = match &self.curator {
            Some(curator) => {
                curator
                    .curate(&raw_articles, &self.profile, &self.limits)
                    .await
            }
            None => fallback_tiers(&raw_articles, &self.limits),
        };

        Ok(assemble(date, articles, weather, highlight))
    }
}

/// There is no newspaper without news: an unreachable source and an empty
/// result set are both fatal, with distinct messages.
fn resolve_required_news(news: Fetch<Vec<NewsItem>>) -> Result<Vec<NewsItem>> {
    match news {
        Fetch::Fetched(items) if !items.is_empty() => Ok(items),
        Fetch::Fetched(_) => {
            anyhow::bail!("The Guardian returned no articles; cannot assemble an edition")
        }
        Fetch::Unavailable => {
            anyhow::bail!("The Guardian could not be reached; cannot assemble an edition")
        }
        Fetch::Disabled => anyhow::bail!("The news source is not configured"),
    }
}

/// Merge resolved and static content into the final payload. Readings and
/// verse are pure functions of the date; weather and highlight collapse to
/// absent whether they failed or were disabled.
pub fn assemble(
    date: NaiveDate,
    articles: Vec<ArticleSummary>,
    weather: Fetch<WeatherSnapshot>,
    highlight: Fetch<Highlight>,
) -> DailyContent {
    DailyContent {
        date,
        articles,
        weather: weather.into_option(),
        readings: reading_plan(date),
        verse: daily_verse(date),
        highlight: highlight.into_option(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;

    fn raw_articles(count: usize) -> Vec<NewsItem> {
        (0..count)
            .map(|n| NewsItem {
                headline: format!("Headline {n}"),
                summary: format!("Excerpt {n}"),
                section: "World".to_string(),
                url: format!("https://example.org/{n}"),
            })
            .collect()
    }

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: 6,
            feels_like: Some(4),
            condition: "Overcast".to_string(),
            high: 9,
            low: 2,
            sunrise: "08:12".to_string(),
            sunset: "16:05".to_string(),
            location: "Witney, Oxfordshire".to_string(),
        }
    }

    #[test]
    fn unavailable_news_is_fatal() {
        let err = resolve_required_news(Fetch::Unavailable).unwrap_err();
        assert!(err.to_string().contains("could not be reached"));
    }

    #[test]
    fn empty_news_is_fatal_with_a_distinct_message() {
        let err = resolve_required_news(Fetch::Fetched(Vec::new())).unwrap_err();
        assert!(err.to_string().contains("no articles"));
    }

    #[test]
    fn fetched_news_passes_through() {
        let items = resolve_required_news(Fetch::Fetched(raw_articles(3))).unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn wednesday_edition_with_highlights_disabled() {
        // Wednesday 7 January 2026; news and weather up, no Readwise token,
        // curation on the fallback path.
        let date = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        let articles = fallback_tiers(&raw_articles(10), &CurationLimits::default());

        let content = assemble(date, articles, Fetch::Fetched(snapshot()), Fetch::Disabled);

        assert_eq!(content.articles.len(), 7);
        assert_eq!(content.articles[0].tier, Tier::Top);
        assert!(content.weather.is_some());
        assert!(content.highlight.is_none());
        assert!(content.readings.is_some());
        assert!(!content.verse.text.is_empty());
    }

    #[test]
    fn saturday_edition_has_no_readings() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
        let articles = fallback_tiers(&raw_articles(10), &CurationLimits::default());

        let content = assemble(
            date,
            articles,
            Fetch::Fetched(snapshot()),
            Fetch::Fetched(Highlight {
                text: "A line worth keeping.".to_string(),
                title: "A Book".to_string(),
                author: "Someone".to_string(),
            }),
        );

        assert!(content.readings.is_none());
        assert!(content.weather.is_some());
        assert!(content.highlight.is_some());
        assert!(!content.articles.is_empty());
    }

    #[test]
    fn failed_weather_leaves_the_rest_populated() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        let articles = fallback_tiers(&raw_articles(5), &CurationLimits::default());

        let content = assemble(date, articles, Fetch::Unavailable, Fetch::Unavailable);

        assert!(content.weather.is_none());
        assert!(content.highlight.is_none());
        assert!(content.readings.is_some());
        assert!(!content.articles.is_empty());
        assert!(!content.verse.reference.is_empty());
    }
}
