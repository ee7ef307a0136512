//! News validator: judges whether a piece of news is authentic against
//! caller-supplied sources.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::agents::build_prompt;
use crate::agents::extract::truncate_chars;
use crate::agents::prompts::{NEWS_PROMPT_TEMPLATE, NEWS_SPORTS_ADDENDUM, NO_SOURCES};
use crate::llm_client::{Invocation, StructuredInvoker};
use crate::models::NewsAnalysis;

/// What `/api/v1/agents/news` returns: the verdict plus the query used to look for sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsReport {
    pub analysis: NewsAnalysis,
    pub search_query: String,
}

const MAX_KEYWORDS: usize = 5;
const KEYWORD_FALLBACK_CHARS: usize = 50;
const SPORTS_SITES: &str = "site:espncricinfo.com OR site:cricbuzz.com";

static CAPITALIZED_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+\b").expect("valid regex"));

/// A search hit the caller found for the news item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceLink {
    pub title: String,
    pub url: String,
}

/// Host part of a URL: the third `/`-separated segment, or the URL itself when there is none.
pub fn source_domain(url: &str) -> &str {
    url.split('/').nth(2).unwrap_or(url)
}

/// Cricket coverage gets extra verification instructions.
pub fn is_sports_content(content: &str) -> bool {
    let lower = content.to_lowercase();
    lower.contains("cricket")
        || lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word == "ipl")
}

/// Up to five distinct capitalized words in order of first appearance, or the
/// first 50 characters of the content when it has none.
pub fn extract_keywords(content: &str) -> String {
    let mut keywords: Vec<&str> = Vec::new();
    for word in CAPITALIZED_WORD_RE.find_iter(content).map(|m| m.as_str()) {
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
        if !keywords.contains(&word) {
            keywords.push(word);
        }
    }
    if keywords.is_empty() {
        return truncate_chars(content, KEYWORD_FALLBACK_CHARS).to_string();
    }
    keywords.join(" ")
}

/// Web search query for corroborating the content; cricket coverage is pinned to
/// the two main cricket sites.
pub fn search_query(content: &str, year: i32) -> String {
    let query = format!("{} {year}", extract_keywords(content));
    if is_sports_content(content) {
        format!("{query} {SPORTS_SITES}")
    } else {
        query
    }
}

pub fn format_sources(sources: &[SourceLink]) -> String {
    if sources.is_empty() {
        return NO_SOURCES.to_string();
    }
    sources
        .iter()
        .map(|s| format!("- [{}]({}) (Domain: {})", s.title, s.url, source_domain(&s.url)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_news_prompt(content: &str, sources: &[SourceLink], today: NaiveDate) -> String {
    let current_date = today.format("%B %d, %Y").to_string();
    let formatted_sources = format_sources(sources);
    let prompt = build_prompt(
        NEWS_PROMPT_TEMPLATE,
        &[
            ("current_date", current_date.as_str()),
            ("content", content),
            ("formatted_sources", formatted_sources.as_str()),
        ],
    );
    if is_sports_content(content) {
        format!("{prompt}\n\n{NEWS_SPORTS_ADDENDUM}")
    } else {
        prompt
    }
}

pub async fn validate_news(
    llm: &StructuredInvoker,
    content: &str,
    sources: &[SourceLink],
    today: NaiveDate,
) -> Invocation<NewsAnalysis> {
    llm.invoke(&build_news_prompt(content, sources, today)).await
}
