//! WebFetch and WebSearch tools.
//!
//! WebFetch does a blocking GET and reduces the body to readable text.
//! WebSearch has no search backend and only echoes the request.

use serde::Deserialize;

use crate::error::{ToolError, ToolResult};
use crate::server::ToolDefinition;

#[derive(Debug, Deserialize)]
pub struct FetchParams {
    pub url: String,
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default)]
    pub allowed_domains: Vec<String>,
    #[serde(default)]
    pub blocked_domains: Vec<String>,
}

#[cfg(feature = "http")]
const USER_AGENT: &str = concat!("Mozilla/5.0 (compatible; devtools-mcp/", env!("CARGO_PKG_VERSION"), ")");

#[cfg(feature = "http")]
const FETCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

#[cfg(feature = "http")]
const MAX_REDIRECTS: usize = 5;

/// Longest body text returned to the client.
#[cfg(feature = "http")]
const MAX_CONTENT_CHARS: usize = 50_000;

/// Elements whose text never reaches the extracted page content.
#[cfg(feature = "http")]
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "nav", "header", "footer", "aside"];

pub fn fetch_definition() -> ToolDefinition {
    ToolDefinition {
        name: "WebFetch".to_owned(),
        description: "Fetches content from a specified URL and returns it as readable text \
            alongside the prompt."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "format": "uri",
                    "description": "The URL to fetch content from"
                },
                "prompt": {
                    "type": "string",
                    "description": "The prompt to run on the fetched content"
                }
            },
            "required": ["url", "prompt"]
        }),
    }
}

pub fn search_definition() -> ToolDefinition {
    ToolDefinition {
        name: "WebSearch".to_owned(),
        description: "Search the web. This server has no search backend configured; the request \
            is echoed back."
            .to_owned(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "minLength": 2,
                    "description": "The search query to use"
                },
                "allowed_domains": {
                    "type": "array",
                    "description": "Only include search results from these domains",
                    "items": { "type": "string" }
                },
                "blocked_domains": {
                    "type": "array",
                    "description": "Never include search results from these domains",
                    "items": { "type": "string" }
                }
            },
            "required": ["query"]
        }),
    }
}

/// Rewrite a plain `http://` URL to `https://`.
pub fn upgrade_to_https(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_owned(),
    }
}

#[cfg(feature = "http")]
pub fn execute_fetch(params: FetchParams) -> ToolResult<String> {
    use reqwest::header::CONTENT_TYPE;

    let url = upgrade_to_https(&params.url);
    tracing::debug!(%url, "fetching");

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| ToolError::Fetch(e.to_string()))?;

    let response = match client.get(&url).send() {
        Ok(response) => response,
        Err(e) if e.is_redirect() => {
            let target = e.url().map_or_else(|| url.clone(), ToString::to_string);
            return Ok(format!(
                "Redirect detected to: {target}\nPlease make a new WebFetch request with the redirect URL."
            ));
        }
        Err(e) => return Err(ToolError::Fetch(e.to_string())),
    };

    let response = response
        .error_for_status()
        .map_err(|e| ToolError::Fetch(e.to_string()))?;
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let body = response
        .text()
        .map_err(|e| ToolError::Fetch(e.to_string()))?;

    let content = crate::util::text::truncate_chars(
        &render_body(&content_type, &body),
        MAX_CONTENT_CHARS,
        "... (content truncated)",
    );

    Ok(format!(
        "Fetched content from {url}:\n\n{content}\n\nPrompt: {}\n\nNote: no model processing is \
         applied here; the extracted content is returned as-is.",
        params.prompt
    ))
}

#[cfg(not(feature = "http"))]
pub fn execute_fetch(_params: FetchParams) -> ToolResult<String> {
    Err(ToolError::Fetch(
        "this build of devtools-mcp was compiled without the `http` feature".to_owned(),
    ))
}

/// Turn a response body into display text according to its content type.
#[cfg(feature = "http")]
pub fn render_body(content_type: &str, body: &str) -> String {
    if content_type.contains("application/json") {
        serde_json::from_str::<serde_json::Value>(body)
            .and_then(|v| serde_json::to_string_pretty(&v))
            .unwrap_or_else(|_| body.to_owned())
    } else if content_type.contains("text/html") {
        html_to_text(body)
    } else {
        body.to_owned()
    }
}

/// Flatten an HTML page: body text with page chrome removed, followed by
/// headings as `#` lines, paragraphs, and list items.
#[cfg(feature = "http")]
pub fn html_to_text(html: &str) -> String {
    use crate::util::text::collapse_whitespace;
    use scraper::{Html, Selector};

    let document = Html::parse_document(html);

    let body = Selector::parse("body")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .unwrap_or_else(|| document.root_element());

    let mut raw = String::new();
    collect_visible_text(body, &mut raw);
    let mut content = collapse_whitespace(&raw);

    let element_text =
        |el: scraper::ElementRef<'_>| collapse_whitespace(&el.text().collect::<String>());

    for heading in visible(&document, "h1, h2, h3, h4, h5, h6") {
        let level = heading.value().name()[1..].parse::<usize>().unwrap_or(1);
        content.push_str(&format!("\n{} {}\n", "#".repeat(level), element_text(heading)));
    }
    for paragraph in visible(&document, "p") {
        content.push_str(&format!("\n{}\n", element_text(paragraph)));
    }
    for item in visible(&document, "li") {
        content.push_str(&format!("\n- {}", element_text(item)));
    }

    content
}

/// Elements matching `selector` that are not inside page chrome.
#[cfg(feature = "http")]
fn visible<'a>(document: &'a scraper::Html, selector: &str) -> Vec<scraper::ElementRef<'a>> {
    scraper::Selector::parse(selector)
        .map(|sel| {
            document
                .select(&sel)
                .filter(|el| !within_skipped(*el))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(feature = "http")]
fn is_skipped(element: scraper::ElementRef<'_>) -> bool {
    SKIPPED_ELEMENTS.contains(&element.value().name())
}

#[cfg(feature = "http")]
fn within_skipped(element: scraper::ElementRef<'_>) -> bool {
    is_skipped(element)
        || element
            .ancestors()
            .filter_map(scraper::ElementRef::wrap)
            .any(is_skipped)
}

/// Append every text node below `element`, not descending into skipped
/// elements.
#[cfg(feature = "http")]
fn collect_visible_text(element: scraper::ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                out.push_str(&text.text);
                out.push(' ');
            }
            scraper::Node::Element(_) => {
                if let Some(child_element) = scraper::ElementRef::wrap(child)
                    && !is_skipped(child_element)
                {
                    collect_visible_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}

pub fn execute_search(params: SearchParams) -> ToolResult<String> {
    if params.query.chars().count() < 2 {
        return Err(ToolError::InvalidArguments {
            tool: "WebSearch".to_owned(),
            reason: "query must be at least 2 characters".to_owned(),
        });
    }

    let mut out = format!(
        "Web search is not available: no search backend is configured for this server.\n\n\
         Search query: {}",
        params.query
    );
    if !params.allowed_domains.is_empty() {
        out.push_str(&format!(
            "\nAllowed domains: {}",
            params.allowed_domains.join(", ")
        ));
    }
    if !params.blocked_domains.is_empty() {
        out.push_str(&format!(
            "\nBlocked domains: {}",
            params.blocked_domains.join(", ")
        ));
    }
    Ok(out)
}
