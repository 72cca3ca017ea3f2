use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::models::{Fetch, NewsItem};

const SEARCH_URL: &str = "https://content.guardianapis.com/search";
const SECTIONS: &str = "uk-news|politics|world|technology|science|business|environment";

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "webTitle", default)]
    web_title: String,
    #[serde(rename = "sectionName", default)]
    section_name: String,
    #[serde(rename = "webUrl", default)]
    web_url: String,
    #[serde(default)]
    fields: Option<SearchFields>,
}

#[derive(Debug, Deserialize)]
struct SearchFields {
    #[serde(rename = "trailText", default)]
    trail_text: String,
}

/// News headlines from the Guardian Open Platform.
pub struct GuardianClient {
    client: Client,
    api_key: String,
}

impl GuardianClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, api_key })
    }

    /// Fetch the latest headlines for curation. A failed or malformed
    /// request resolves to `Unavailable`; the aggregator decides whether
    /// that sinks the run.
    pub async fn fetch_headlines(&self, count: usize) -> Fetch<Vec<NewsItem>> {
        match self.try_fetch(count).await {
            Ok(items) => Fetch::Fetched(items),
            Err(e) => {
                eprintln!("Warning: Guardian news fetch failed: {e:#}");
                Fetch::Unavailable
            }
        }
    }

    async fn try_fetch(&self, count: usize) -> Result<Vec<NewsItem>> {
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("section", SECTIONS),
                ("show-fields", "trailText"),
                ("page-size", &count.to_string()),
                ("order-by", "newest"),
                ("api-key", &self.api_key),
            ])
            .send()
            .await
            .context("Failed to reach the Guardian API")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Guardian API returned error status: {}", status);
        }

        let envelope = response
            .json::<SearchEnvelope>()
            .await
            .context("Failed to parse Guardian API response")?;

        Ok(items_from(envelope.response.results))
    }
}

fn items_from(results: Vec<SearchResult>) -> Vec<NewsItem> {
    results
        .into_iter()
        .filter(|r| !r.web_title.is_empty())
        .map(|r| NewsItem {
            headline: r.web_title,
            summary: clean_html(&r.fields.map(|f| f.trail_text).unwrap_or_default()),
            section: r.section_name,
            url: r.web_url,
        })
        .collect()
}

/// Strip HTML tags and decode the entities the Guardian uses in trail text.
pub fn clean_html(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => stripped.push(c),
            _ => {}
        }
    }

    stripped
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&rsquo;", "\u{2019}")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_html_strips_tags_and_entities() {
        assert_eq!(
            clean_html("<strong>PM &amp; cabinet</strong> meet <em>today</em>"),
            "PM & cabinet meet today"
        );
    }

    #[test]
    fn clean_html_passes_plain_text_through() {
        assert_eq!(clean_html("  plain trail text "), "plain trail text");
    }

    #[test]
    fn response_parses_into_news_items() {
        let body = r#"{
            "response": {
                "results": [
                    {
                        "webTitle": "Storm batters coast",
                        "sectionName": "UK news",
                        "webUrl": "https://example.org/storm",
                        "fields": {"trailText": "Gusts of <b>90mph</b> recorded"}
                    },
                    {
                        "webTitle": "",
                        "sectionName": "World",
                        "webUrl": "https://example.org/dropped"
                    }
                ]
            }
        }"#;

        let envelope: SearchEnvelope = serde_json::from_str(body).unwrap();
        let items = items_from(envelope.response.results);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].headline, "Storm batters coast");
        assert_eq!(items[0].summary, "Gusts of 90mph recorded");
        assert_eq!(items[0].section, "UK news");
        assert_eq!(items[0].url, "https://example.org/storm");
    }

    #[test]
    fn missing_fields_block_yields_empty_summary() {
        let body = r#"{"response": {"results": [
            {"webTitle": "No trail", "sectionName": "Politics", "webUrl": "u"}
        ]}}"#;

        let envelope: SearchEnvelope = serde_json::from_str(body).unwrap();
        let items = items_from(envelope.response.results);
        assert_eq!(items[0].summary, "");
    }
}
