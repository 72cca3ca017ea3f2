use anyhow::{Context, Result};
use rand::seq::IndexedRandom;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{Fetch, Highlight};

const EXPORT_URL: &str = "https://readwise.io/api/v2/export/";

// Skip very short highlights
const MIN_HIGHLIGHT_LENGTH: usize = 20;
// Limit pagination to avoid excessive API calls
const MAX_PAGES: usize = 5;
// Random page offset for more even coverage of the library over time
const MAX_RANDOM_PAGE_OFFSET: usize = 10;

#[derive(Debug, Deserialize)]
struct ExportResponse {
    #[serde(default)]
    results: Vec<ExportBook>,
    #[serde(rename = "nextPageCursor")]
    next_page_cursor: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ExportBook {
    title: Option<String>,
    author: Option<String>,
    #[serde(default)]
    highlights: Vec<ExportHighlight>,
}

#[derive(Debug, Deserialize)]
struct ExportHighlight {
    #[serde(default)]
    text: String,
}

/// One random highlight per edition from the Readwise export endpoint.
pub struct ReadwiseClient {
    client: Client,
    token: String,
}

impl ReadwiseClient {
    pub fn new(token: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, token })
    }

    pub async fn fetch_random_highlight(&self) -> Fetch<Highlight> {
        match self.try_fetch().await {
            Ok(Some(highlight)) => Fetch::Fetched(highlight),
            Ok(None) => {
                eprintln!("Warning: Readwise library has no usable highlights");
                Fetch::Unavailable
            }
            Err(e) => {
                eprintln!("Warning: Readwise fetch failed: {e:#}");
                Fetch::Unavailable
            }
        }
    }

    async fn try_fetch(&self) -> Result<Option<Highlight>> {
        let start_page = rand::rng().random_range(1..=MAX_RANDOM_PAGE_OFFSET);

        // If skipping ahead fails, start from the beginning instead
        let mut cursor = self.skip_pages(start_page).await.unwrap_or(None);

        let mut highlights = Vec::new();
        for _ in 0..MAX_PAGES {
            let page = self.fetch_page(cursor.as_ref()).await?;

            for book in page.results {
                let title = book.title.unwrap_or_else(|| "Unknown".to_string());
                let author = book.author.unwrap_or_else(|| "Unknown".to_string());
                for h in book.highlights {
                    if h.text.len() > MIN_HIGHLIGHT_LENGTH {
                        highlights.push(Highlight {
                            text: h.text,
                            title: title.clone(),
                            author: author.clone(),
                        });
                    }
                }
            }

            cursor = page.next_page_cursor;
            if cursor.is_none() {
                break;
            }
        }

        Ok(highlights.choose(&mut rand::rng()).cloned())
    }

    /// Follow the cursor chain up to `start_page`, returning the cursor for
    /// that page, or `None` when the library runs out of pages first.
    async fn skip_pages(&self, start_page: usize) -> Result<Option<Value>> {
        let mut cursor = None;
        for _ in 1..start_page {
            let page = self.fetch_page(cursor.as_ref()).await?;
            cursor = page.next_page_cursor;
            if cursor.is_none() {
                return Ok(None);
            }
        }
        Ok(cursor)
    }

    async fn fetch_page(&self, cursor: Option<&Value>) -> Result<ExportResponse> {
        let mut request = self
            .client
            .get(EXPORT_URL)
            .header("Authorization", format!("Token {}", self.token));

        if let Some(cursor) = cursor {
            request = request.query(&[("pageCursor", cursor_param(cursor))]);
        }

        let response = request
            .send()
            .await
            .context("Failed to reach the Readwise API")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Readwise API returned error status: {}", status);
        }

        response
            .json::<ExportResponse>()
            .await
            .context("Failed to parse Readwise API response")
    }
}

// Readwise cursors arrive as bare numbers; strings pass through unquoted.
fn cursor_param(cursor: &Value) -> String {
    match cursor {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_cursors_serialize_bare() {
        assert_eq!(cursor_param(&Value::from(421337)), "421337");
        assert_eq!(cursor_param(&Value::from("abc")), "abc");
    }

    #[test]
    fn export_response_tolerates_missing_book_metadata() {
        let body = r#"{
            "results": [
                {"highlights": [{"text": "A highlight long enough to keep."}]}
            ],
            "nextPageCursor": 99
        }"#;

        let page: ExportResponse = serde_json::from_str(body).unwrap();
        assert_eq!(page.results[0].highlights.len(), 1);
        assert!(page.results[0].title.is_none());
        assert_eq!(page.next_page_cursor, Some(Value::from(99)));
    }
}
