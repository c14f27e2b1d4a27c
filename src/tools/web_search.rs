//! Web search through the DuckDuckGo HTML endpoint.
//!
//! Result pages are fetched one after another and reduced to plain text so
//! the model gets a short preview of each page next to its title and URL.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::definition::{ToolDefinition, ToolHandler, ToolParam};
use super::error::ToolError;

pub const WEB_SEARCH_TOOL: &str = "web_search";
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Characters of page text kept per result.
const PREVIEW_CHARS: usize = 500;
const TEXT_WIDTH: usize = 120;
const USER_AGENT: &str = "Mozilla/5.0 (compatible; parley/0.1; +https://duckduckgo.com)";
const RESULT_LINK_MARKER: &str = "class=\"result__a\"";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSearchConfig {
    /// Search page queried with `?q=<query>`.
    pub endpoint: String,
    pub timeout_seconds: u64,
    /// Maximum number of results followed.
    pub max_results: usize,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_SEARCH_TIMEOUT_SECS,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchHit {
    title: String,
    url: String,
}

struct WebSearch {
    client: Client,
    config: WebSearchConfig,
}

pub fn web_search_tool(config: WebSearchConfig) -> Result<ToolDefinition, ToolError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .map_err(|err| ToolError::Execution(format!("failed to build http client: {err}")))?;
    Ok(ToolDefinition {
        name: WEB_SEARCH_TOOL,
        description: "Performs a web search and returns the results.",
        params: vec![ToolParam::simple(
            "query",
            "The search query to perform.",
            "string",
        )],
        required: vec!["query"],
        handler: Arc::new(WebSearch { client, config }),
    })
}

#[async_trait]
impl ToolHandler for WebSearch {
    async fn call(&self, args: Value) -> Result<Option<String>, ToolError> {
        let query = args
            .get("query")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArgs("missing 'query'".to_string()))?;

        log::debug!("web search for '{}'", query);
        let html = self
            .client
            .get(&self.config.endpoint)
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let hits = parse_results(&html, self.config.max_results);
        if hits.is_empty() {
            log::debug!("web search for '{}' returned no results", query);
            return Ok(None);
        }

        let mut out = String::new();
        for hit in hits {
            let content = self.page_content(&hit.url).await;
            out.push_str(&format!(
                "Title: {}\nURL: {}\nContent Preview: {}\n\n",
                hit.title,
                hit.url,
                snippet(&content, PREVIEW_CHARS)
            ));
        }
        Ok(Some(out))
    }
}

impl WebSearch {
    /// Readable text of a page, or a short note when it cannot be read.
    async fn page_content(&self, url: &str) -> String {
        let body = match self.fetch(url).await {
            Ok(body) => body,
            Err(err) => {
                log::debug!("fetching {} failed: {}", url, err);
                return format!("Failed to fetch: {err}");
            }
        };
        match html2text::from_read(body.as_bytes(), TEXT_WIDTH) {
            Ok(text) => {
                let text = collapse_whitespace(&text);
                match extract_title(&body) {
                    Some(title) => format!("{title}\n\n{text}"),
                    None => text,
                }
            }
            Err(err) => format!("Failed to parse readable content: {err}"),
        }
    }

    async fn fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

/// Pulls result links out of a DuckDuckGo HTML result page.
///
/// Result anchors look like `<a class="result__a" href="...">TITLE</a>`.
fn parse_results(html: &str, max_results: usize) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    let mut pos = 0;

    while hits.len() < max_results {
        let Some(found) = html[pos..].find(RESULT_LINK_MARKER) else {
            break;
        };
        let marker = pos + found;
        pos = marker + RESULT_LINK_MARKER.len();

        let Some(tag_start) = html[..marker].rfind("<a ") else {
            continue;
        };
        let Some(tag_len) = html[tag_start..].find('>') else {
            break;
        };
        let tag_end = tag_start + tag_len;
        // The marker must sit inside the opening tag of the anchor found.
        if tag_end < marker {
            continue;
        }
        let Some(title_len) = html[tag_end + 1..].find("</a>") else {
            break;
        };
        let title_end = tag_end + 1 + title_len;
        pos = title_end.max(pos);

        let href = extract_attr(&html[tag_start..tag_end], "href").unwrap_or_default();
        let url = resolve_result_url(&href);
        if url.is_empty() {
            continue;
        }
        hits.push(SearchHit {
            title: strip_tags(&html[tag_end + 1..title_end]),
            url,
        });
    }
    hits
}

/// Unwraps DuckDuckGo redirect links (`//duckduckgo.com/l/?uddg=...`).
fn resolve_result_url(href: &str) -> String {
    let is_redirect = href.contains("duckduckgo.com/l/") || href.starts_with("/l/");
    if is_redirect {
        if let Some((_, rest)) = href.split_once("uddg=") {
            let encoded = rest.split('&').next().unwrap_or(rest);
            return urlencoding::decode(encoded)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| encoded.to_string());
        }
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        String::new()
    }
}

fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    let pattern = format!("{attr}=\"");
    let start = tag.find(&pattern)? + pattern.len();
    let end = tag[start..].find('"')? + start;
    Some(decode_entities(&tag[start..end]))
}

fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let start = open + lower[open..].find('>')? + 1;
    let end = start + lower[start..].find("</title>")?;
    let title = strip_tags(&html[start..end]);
    (!title.is_empty()).then_some(title)
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    collapse_whitespace(&decode_entities(&out))
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `limit` characters of `s`, with an ellipsis when cut.
fn snippet(s: &str, limit: usize) -> String {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn tool_for(server: &mockito::Server, max_results: usize) -> ToolDefinition {
        web_search_tool(WebSearchConfig {
            endpoint: format!("{}/html/", server.url()),
            timeout_seconds: 5,
            max_results,
        })
        .unwrap()
    }

    #[test]
    fn parse_results_unwraps_redirects_and_decodes_titles() {
        let html = r##"
        <div class="result">
            <a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fa&amp;rut=abc">Example <b>Site</b></a>
        </div>
        <div class="result">
            <a class="result__a" href="https://www.rust-lang.org/">Rust &amp; Friends</a>
        </div>
        <div class="result">
            <a class="result__a" href="javascript:void(0)">Ignored</a>
        </div>
        "##;
        let hits = parse_results(html, 10);
        assert_eq!(
            hits,
            vec![
                SearchHit {
                    title: "Example Site".to_string(),
                    url: "https://example.com/a".to_string(),
                },
                SearchHit {
                    title: "Rust & Friends".to_string(),
                    url: "https://www.rust-lang.org/".to_string(),
                },
            ]
        );
    }

    #[test]
    fn parse_results_respects_cap() {
        let html: String = (0..8)
            .map(|i| format!(r#"<a class="result__a" href="https://site{i}.test/">Site {i}</a>"#))
            .collect();
        let hits = parse_results(&html, DEFAULT_MAX_RESULTS);
        assert_eq!(hits.len(), 5);
        assert_eq!(hits[4].url, "https://site4.test/");
    }

    #[test]
    fn parse_results_ignores_marker_outside_anchor() {
        let html = r#"<a href="javascript:void(0)">x</a><div class="result__a">not a link</div>"#;
        assert!(parse_results(html, 5).is_empty());

        let html = r#"<a href="https://a.test/">A</a><span class="result__a">x</span>
            <a class="result__a" href="https://b.test/">B</a>"#;
        assert_eq!(
            parse_results(html, 5),
            vec![SearchHit {
                title: "B".to_string(),
                url: "https://b.test/".to_string(),
            }]
        );
    }

    #[test]
    fn snippet_caps_characters() {
        assert_eq!(snippet("hello", 10), "hello");
        assert_eq!(snippet("hello world", 5), "hello...");
        assert_eq!(snippet("ééé", 2), "éé...");
    }

    #[test]
    fn title_is_extracted_case_insensitively() {
        assert_eq!(
            extract_title("<html><HEAD><TITLE>Docs &amp; more</TITLE></HEAD></html>"),
            Some("Docs & more".to_string())
        );
        assert_eq!(extract_title("<p>no title</p>"), None);
    }

    #[tokio::test]
    async fn search_fetches_pages_and_degrades_failed_fetches() {
        let mut server = mockito::Server::new_async().await;
        let results_page = format!(
            r#"<a class="result__a" href="{0}/good">Good page</a>
               <a class="result__a" href="{0}/missing">Missing page</a>"#,
            server.url()
        );
        server
            .mock("GET", "/html/")
            .match_query(Matcher::UrlEncoded("q".into(), "rust news".into()))
            .with_status(200)
            .with_body(results_page)
            .create_async()
            .await;
        server
            .mock("GET", "/good")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(
                "<html><head><title>Good</title></head>\
                 <body><p>Rust 2.0 announced</p></body></html>",
            )
            .create_async()
            .await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let tool = tool_for(&server, 5);
        let out = tool
            .handler
            .call(json!({"query": "rust news"}))
            .await
            .unwrap()
            .unwrap();

        let good = format!(
            "Title: Good page\nURL: {}/good\nContent Preview: Good\n\n",
            server.url()
        );
        assert!(out.starts_with(&good), "{out}");
        assert!(out.contains("Rust 2.0 announced"));
        assert!(out.contains(&format!(
            "Title: Missing page\nURL: {}/missing\nContent Preview: Failed to fetch:",
            server.url()
        )));
    }

    #[tokio::test]
    async fn search_without_results_declines() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/html/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html><body>No results.</body></html>")
            .create_async()
            .await;

        let tool = tool_for(&server, 5);
        let out = tool.handler.call(json!({"query": "zzzz"})).await.unwrap();
        assert_eq!(out, None);
    }

    #[tokio::test]
    async fn missing_query_is_an_argument_error() {
        let tool = web_search_tool(WebSearchConfig::default()).unwrap();
        let err = tool.handler.call(json!({"q": 1})).await.unwrap_err();
        assert_eq!(err, ToolError::InvalidArgs("missing 'query'".to_string()));
    }
}
