//! Wikipedia lookup tool backed by the MediaWiki search API.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::AbacusError;
use crate::provider::http::shared_client;

use super::Tool;

pub const WIKIPEDIA: &str = "Wikipedia";

const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";
const RESULT_LIMIT: u32 = 3;

/// Searches Wikipedia and returns a free-text summary of the top results.
#[derive(Debug)]
pub struct WikipediaTool {
    api_url: String,
}

impl Default for WikipediaTool {
    fn default() -> Self {
        Self::new()
    }
}

impl WikipediaTool {
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Override the API endpoint (used by tests against a local mock).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

#[async_trait]
impl Tool for WikipediaTool {
    fn name(&self) -> &str {
        WIKIPEDIA
    }

    fn description(&self) -> &str {
        "Searches Wikipedia for factual information on a topic. The input is \
         a plain search query; the output summarizes the top matching articles."
    }

    async fn invoke(&self, input: &str) -> Result<String, AbacusError> {
        let query = input.trim();
        if query.is_empty() {
            return Err(AbacusError::tool(WIKIPEDIA, "empty search query"));
        }

        debug!(query, "Wikipedia search");

        let limit = RESULT_LIMIT.to_string();
        let resp = shared_client()
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("format", "json"),
                ("srlimit", limit.as_str()),
                ("utf8", "1"),
            ])
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            return Err(AbacusError::tool(
                WIKIPEDIA,
                format!("search request failed with status {status}"),
            ));
        }

        let data: SearchResponse = resp
            .json()
            .await
            .map_err(|e| AbacusError::tool(WIKIPEDIA, format!("malformed search response: {e}")))?;

        let hits = data.query.search;
        if hits.is_empty() {
            return Err(AbacusError::tool(
                WIKIPEDIA,
                format!("no results for '{query}'"),
            ));
        }

        let mut lines = Vec::with_capacity(hits.len() + 1);
        lines.push(format!("Top Wikipedia results for '{query}':"));
        for hit in hits {
            lines.push(format!("- {}: {}", hit.title, strip_html(&hit.snippet)));
        }
        Ok(lines.join("\n"))
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    title: String,
    #[serde(default)]
    snippet: String,
}

/// Snippets come back with highlight markup; reduce them to plain text.
fn strip_html(snippet: &str) -> String {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    let re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid regex"));
    re.replace_all(snippet, "")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#039;", "'")
}
