//! AI news curation with a deterministic fallback.
//!
//! The curator sends the whole raw article set to Claude in one request
//! and gets back a tiered selection referencing articles by number, so
//! headlines and source URLs always come from the Guardian data. Any
//! failure on this path degrades to positional tiering; curation can
//! never fail a run.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{CurationLimits, InterestProfile};
use crate::models::{ArticleSummary, NewsItem, Tier};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// The model's selection, referencing articles by their number in the
/// digest we sent.
#[derive(Debug, Deserialize)]
struct CuratedSelection {
    #[serde(default)]
    top_stories: Vec<IndexedStory>,
    second_story: Option<IndexedStory>,
    #[serde(default)]
    headlines: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct IndexedStory {
    index: usize,
    summary: String,
}

pub struct NewsCurator {
    client: Client,
    api_key: String,
    model: String,
}

impl NewsCurator {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    /// Curate and summarize the raw articles. Falls back to positional
    /// tiering on any error; never fails.
    pub async fn curate(
        &self,
        articles: &[NewsItem],
        profile: &InterestProfile,
        limits: &CurationLimits,
    ) -> Vec<ArticleSummary> {
        if articles.is_empty() {
            return Vec::new();
        }

        match self.try_curate(articles, profile, limits).await {
            Ok(curated) => curated,
            Err(e) => {
                eprintln!("Warning: AI curation failed, using raw articles: {e:#}");
                fallback_tiers(articles, limits)
            }
        }
    }

    async fn try_curate(
        &self,
        articles: &[NewsItem],
        profile: &InterestProfile,
        limits: &CurationLimits,
    ) -> Result<Vec<ArticleSummary>> {
        let request = ClaudeRequest {
            model: self.model.clone(),
            max_tokens: 2048,
            system: system_prompt(profile, limits),
            messages: vec![Message {
                role: "user".to_string(),
                content: format!(
                    "Here are today's news articles, numbered. Select and summarize \
                     the most interesting ones:\n\n{}",
                    articles_digest(articles)
                ),
            }],
        };

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Claude API")?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            anyhow::bail!("Claude API error: {}", error_text);
        }

        let claude_response = response
            .json::<ClaudeResponse>()
            .await
            .context("Failed to parse Claude API response")?;

        let text = claude_response
            .content
            .first()
            .map(|c| c.text.as_str())
            .context("Claude returned empty content")?;

        // Claude sometimes wraps JSON in markdown code blocks
        let selection: CuratedSelection = serde_json::from_str(strip_code_fences(text))
            .context("Failed to parse curated selection JSON")?;

        selection_to_tiers(selection, articles, limits)
    }
}

fn system_prompt(profile: &InterestProfile, limits: &CurationLimits) -> String {
    format!(
        "You are a news curator for a daily printed newspaper. Your reader is interested in:\n\
        {interests}\n\n\
        NOT interested in: {exclusions}.\n\n\
        From the numbered articles provided, create a curated selection:\n\n\
        1. TOP STORIES ({top}): The most important stories that deserve deep coverage.\n   \
        Write 7-10 COMPLETE sentences covering key facts, context, why it matters, and implications.\n\n\
        2. SECOND STORY ({second}): Another interesting story with a SHORTER summary.\n   \
        Write 3-4 COMPLETE sentences - just the essential facts and why it matters.\n\n\
        3. HEADLINES ({brief}): Other noteworthy stories where the headline tells the story.\n   \
        Reference them by number only. Pick ones that are self-explanatory.\n\n\
        IMPORTANT: Write full, complete sentences. Never trail off with ellipsis.\n\
        Article numbers refer to the numbered list in the user message.\n\n\
        Respond with valid JSON only:\n\
        {{\n  \
        \"top_stories\": [{{\"index\": 0, \"summary\": \"Detailed summary.\"}}],\n  \
        \"second_story\": {{\"index\": 3, \"summary\": \"Brief summary.\"}},\n  \
        \"headlines\": [5, 7]\n\
        }}",
        interests = profile
            .interests
            .iter()
            .map(|t| format!("- {t}"))
            .collect::<Vec<_>>()
            .join("\n"),
        exclusions = profile.exclusions.join(", "),
        top = limits.top,
        second = limits.second,
        brief = limits.brief,
    )
}

fn articles_digest(articles: &[NewsItem]) -> String {
    articles
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{i}. HEADLINE: {}\n   SUMMARY: {}", a.headline, a.summary))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn strip_code_fences(text: &str) -> &str {
    let inner = if let Some((_, after)) = text.split_once("```json") {
        after
    } else if let Some((_, after)) = text.split_once("```") {
        after
    } else {
        return text.trim();
    };
    inner.split("```").next().unwrap_or(inner).trim()
}

/// Map the model's index-based selection back onto the raw articles. Any
/// out-of-range index or empty summary rejects the whole selection, which
/// sends the caller down the fallback path.
fn selection_to_tiers(
    selection: CuratedSelection,
    articles: &[NewsItem],
    limits: &CurationLimits,
) -> Result<Vec<ArticleSummary>> {
    let article_at = |index: usize| -> Result<&NewsItem> {
        articles
            .get(index)
            .with_context(|| format!("Curated selection references unknown article {index}"))
    };

    let mut curated = Vec::new();

    if selection.top_stories.is_empty() {
        anyhow::bail!("Curated selection has no top stories");
    }

    for story in selection.top_stories.iter().take(limits.top) {
        let article = article_at(story.index)?;
        if story.summary.trim().is_empty() {
            anyhow::bail!("Curated top story has an empty summary");
        }
        curated.push(ArticleSummary {
            headline: article.headline.clone(),
            body: story.summary.trim().to_string(),
            source_url: article.url.clone(),
            tier: Tier::Top,
        });
    }

    if let Some(story) = selection.second_story {
        let article = article_at(story.index)?;
        if story.summary.trim().is_empty() {
            anyhow::bail!("Curated second story has an empty summary");
        }
        curated.push(ArticleSummary {
            headline: article.headline.clone(),
            body: story.summary.trim().to_string(),
            source_url: article.url.clone(),
            tier: Tier::Second,
        });
    }

    for index in selection.headlines.iter().take(limits.brief) {
        let article = article_at(*index)?;
        curated.push(ArticleSummary {
            headline: article.headline.clone(),
            body: String::new(),
            source_url: article.url.clone(),
            tier: Tier::Brief,
        });
    }

    Ok(curated)
}

/// Positional tiering used whenever AI curation is unavailable or fails:
/// the first articles in source order become the top stories, the next one
/// the second story, and the next few headline-only briefs.
pub fn fallback_tiers(articles: &[NewsItem], limits: &CurationLimits) -> Vec<ArticleSummary> {
    let mut tiers = Vec::new();

    for (position, article) in articles.iter().enumerate() {
        let tier = if position < limits.top {
            Tier::Top
        } else if position < limits.top + limits.second {
            Tier::Second
        } else if position < limits.top + limits.second + limits.brief {
            Tier::Brief
        } else {
            break;
        };

        let body = match tier {
            Tier::Brief => String::new(),
            // A featured story must have a body; fall back to the headline
            // when the Guardian excerpt is empty.
            _ if article.summary.trim().is_empty() => article.headline.clone(),
            _ => article.summary.clone(),
        };

        tiers.push(ArticleSummary {
            headline: article.headline.clone(),
            body,
            source_url: article.url.clone(),
            tier,
        });
    }

    tiers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(n: usize) -> NewsItem {
        NewsItem {
            headline: format!("Headline {n}"),
            summary: format!("Excerpt {n}"),
            section: "World".to_string(),
            url: format!("https://example.org/{n}"),
        }
    }

    fn articles(count: usize) -> Vec<NewsItem> {
        (0..count).map(article).collect()
    }

    #[test]
    fn fallback_assigns_tiers_positionally() {
        let tiers = fallback_tiers(&articles(10), &CurationLimits::default());

        assert_eq!(tiers.len(), 7);
        assert_eq!(tiers[0].tier, Tier::Top);
        assert_eq!(tiers[1].tier, Tier::Top);
        assert_eq!(tiers[2].tier, Tier::Second);
        assert!(tiers[3..].iter().all(|t| t.tier == Tier::Brief));
        assert_eq!(tiers[0].headline, "Headline 0");
        assert_eq!(tiers[0].body, "Excerpt 0");
        assert_eq!(tiers[0].source_url, "https://example.org/0");
    }

    #[test]
    fn fallback_briefs_are_headline_only() {
        let tiers = fallback_tiers(&articles(10), &CurationLimits::default());
        assert!(tiers
            .iter()
            .filter(|t| t.tier == Tier::Brief)
            .all(|t| t.body.is_empty()));
    }

    #[test]
    fn fallback_featured_body_is_never_empty() {
        let mut raw = articles(3);
        raw[0].summary = "   ".to_string();
        let tiers = fallback_tiers(&raw, &CurationLimits::default());
        assert_eq!(tiers[0].body, "Headline 0");
    }

    #[test]
    fn fallback_handles_fewer_articles_than_the_page_wants() {
        let tiers = fallback_tiers(&articles(2), &CurationLimits::default());
        assert_eq!(tiers.len(), 2);
        assert!(tiers.iter().all(|t| t.tier == Tier::Top));
    }

    #[test]
    fn fallback_is_deterministic() {
        let raw = articles(8);
        let limits = CurationLimits::default();
        let first: Vec<_> = fallback_tiers(&raw, &limits)
            .into_iter()
            .map(|t| (t.headline, t.tier))
            .collect();
        let second: Vec<_> = fallback_tiers(&raw, &limits)
            .into_iter()
            .map(|t| (t.headline, t.tier))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn code_fences_are_stripped() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences(" {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn selection_maps_indices_back_to_articles() {
        let raw = articles(8);
        let selection: CuratedSelection = serde_json::from_str(
            r#"{
                "top_stories": [
                    {"index": 2, "summary": "Two."},
                    {"index": 0, "summary": "Zero."}
                ],
                "second_story": {"index": 5, "summary": "Five."},
                "headlines": [1, 7]
            }"#,
        )
        .unwrap();

        let tiers = selection_to_tiers(selection, &raw, &CurationLimits::default()).unwrap();

        assert_eq!(tiers.len(), 5);
        assert_eq!(tiers[0].headline, "Headline 2");
        assert_eq!(tiers[0].body, "Two.");
        assert_eq!(tiers[0].source_url, "https://example.org/2");
        assert_eq!(tiers[2].tier, Tier::Second);
        assert_eq!(tiers[3].headline, "Headline 1");
        assert!(tiers[3].body.is_empty());
    }

    #[test]
    fn out_of_range_index_rejects_the_selection() {
        let raw = articles(3);
        let selection: CuratedSelection = serde_json::from_str(
            r#"{"top_stories": [{"index": 9, "summary": "Bad."}], "headlines": []}"#,
        )
        .unwrap();
        assert!(selection_to_tiers(selection, &raw, &CurationLimits::default()).is_err());
    }

    #[test]
    fn empty_summary_rejects_the_selection() {
        let raw = articles(3);
        let selection: CuratedSelection = serde_json::from_str(
            r#"{"top_stories": [{"index": 0, "summary": "  "}], "headlines": []}"#,
        )
        .unwrap();
        assert!(selection_to_tiers(selection, &raw, &CurationLimits::default()).is_err());
    }

    #[test]
    fn selection_with_no_top_stories_is_rejected() {
        let raw = articles(3);
        let selection: CuratedSelection =
            serde_json::from_str(r#"{"top_stories": [], "headlines": [0]}"#).unwrap();
        assert!(selection_to_tiers(selection, &raw, &CurationLimits::default()).is_err());
    }
}
