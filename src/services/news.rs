// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scraper for the latest news post on the OSRS home page.
//!
//! The page has no API, so the news block is located with a chain of
//! heuristic selectors. Every step degrades to fallback text; nothing here
//! returns an error to the caller.

use crate::models::NewsArticle;
use image::imageops::FilterType;
use image::RgbaImage;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Browser-like User-Agent; the home page rejects unknown clients.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Origin used to absolutize root-relative image URLs.
const SITE_ORIGIN: &str = "https://oldschool.runescape.com";

const MAX_TITLE_CHARS: usize = 100;
const MAX_SUMMARY_CHARS: usize = 140;

/// Thumbnail size in the news pane.
pub const NEWS_IMAGE_SIZE: (u32, u32) = (120, 67);

pub const TITLE_NOT_FOUND: &str = "No title found";
pub const TITLE_NO_CONTAINER: &str = "Latest OSRS News";
pub const TITLE_FETCH_ERROR: &str = "Error fetching title";
pub const SUMMARY_FALLBACK: &str = "Check oldschool.runescape.com for latest updates";
pub const SUMMARY_FETCH_ERROR: &str = "Error fetching abstract";

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static READ_MORE_DOTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*read\s+more\.{3,}\s*$").expect("valid regex")
});
static READ_MORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*read\s+more\s*$").expect("valid regex"));
static NEWS_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)news").expect("valid regex"));

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

/// Locate the news block.
///
/// Tries a div, then a section, whose class mentions "news", then the first
/// `<article>`. With `match_text`, finally accepts a div whose sole string
/// mentions news.
pub fn find_news_container(document: &Html, match_text: bool) -> Option<ElementRef<'_>> {
    document
        .select(&selector(r#"div[class*="news"]"#))
        .next()
        .or_else(|| document.select(&selector(r#"section[class*="news"]"#)).next())
        .or_else(|| document.select(&selector("article")).next())
        .or_else(|| {
            if !match_text {
                return None;
            }
            document
                .select(&selector("div"))
                .find(|div| sole_string(*div).is_some_and(|text| NEWS_TEXT.is_match(text)))
        })
}

/// The text of an element with exactly one child, looking through nested
/// single-child elements (`<div><span>News</span></div>` gives "News").
fn sole_string(element: ElementRef<'_>) -> Option<&str> {
    let mut children = element.children();
    let (Some(only), None) = (children.next(), children.next()) else {
        return None;
    };
    match only.value().as_text() {
        Some(text) => Some(&**text),
        None => ElementRef::wrap(only).and_then(sole_string),
    }
}

fn collapsed_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    WHITESPACE.replace_all(raw.trim(), " ").into_owned()
}

/// Headline of the latest news post.
pub fn extract_title(document: &Html) -> String {
    let Some(container) = find_news_container(document, true) else {
        return TITLE_NO_CONTAINER.to_string();
    };

    let Some(heading) = ["h1", "h2", "h3", "a"]
        .into_iter()
        .find_map(|tag| container.select(&selector(tag)).next())
    else {
        return TITLE_NO_CONTAINER.to_string();
    };

    let title: String = collapsed_text(heading)
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect();
    if title.is_empty() {
        TITLE_NOT_FOUND.to_string()
    } else {
        title
    }
}

/// Short summary of the latest news post, at most 140 characters plus "...".
pub fn extract_summary(document: &Html) -> String {
    let Some(container) = find_news_container(document, false) else {
        return SUMMARY_FALLBACK.to_string();
    };

    let Some(description) = container
        .select(&selector("p"))
        .next()
        .or_else(|| {
            container
                .select(&selector(
                    r#"div[class*="desc"], div[class*="summary"], div[class*="content"]"#,
                ))
                .next()
        })
    else {
        return SUMMARY_FALLBACK.to_string();
    };

    let summary = clean_summary(&collapsed_text(description));
    if summary.is_empty() {
        SUMMARY_FALLBACK.to_string()
    } else {
        summary
    }
}

/// Strip a trailing "read more..." then a trailing "read more", and truncate
/// at a word boundary.
pub fn clean_summary(text: &str) -> String {
    let text = READ_MORE_DOTS.replace(text, "");
    let text = READ_MORE.replace(&text, "");
    if text.chars().count() <= MAX_SUMMARY_CHARS {
        return text.into_owned();
    }

    let cut: String = text.chars().take(MAX_SUMMARY_CHARS).collect();
    let kept = match cut.rfind(' ') {
        Some(pos) => &cut[..pos],
        None => cut.as_str(),
    };
    format!("{}...", kept)
}

/// URL of the news thumbnail, absolutized.
pub fn extract_image_url(document: &Html) -> Option<String> {
    let from_container = find_news_container(document, false)
        .and_then(|container| container.select(&selector("img")).next())
        .and_then(|img| img.value().attr("src"))
        .filter(|src| !src.is_empty());

    let src = from_container.or_else(|| {
        document
            .select(&selector("img[src]"))
            .next()
            .and_then(|img| img.value().attr("src"))
            .filter(|src| !src.is_empty())
    })?;

    Some(normalize_image_url(src))
}

/// Resolve protocol-relative and root-relative URLs against the site.
pub fn normalize_image_url(src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{}", src)
    } else if src.starts_with('/') {
        format!("{}{}", SITE_ORIGIN, src)
    } else {
        src.to_string()
    }
}

/// Text extracted from one copy of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedPage {
    pub title: String,
    pub summary: String,
    pub image_url: Option<String>,
}

impl ScrapedPage {
    pub fn parse(body: &str) -> Self {
        let document = Html::parse_document(body);
        Self {
            title: extract_title(&document),
            summary: extract_summary(&document),
            image_url: extract_image_url(&document),
        }
    }
}

/// News scraper bound to one page URL.
#[derive(Clone)]
pub struct NewsService {
    http: reqwest::Client,
    page_url: String,
}

impl NewsService {
    pub fn new(http: reqwest::Client, page_url: impl Into<String>) -> Self {
        Self {
            http,
            page_url: page_url.into(),
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String, reqwest::Error> {
        self.http
            .get(url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }

    async fn fetch_page(&self) -> Option<String> {
        match self.fetch_text(&self.page_url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(url = %self.page_url, error = %e, "Error fetching news page");
                None
            }
        }
    }

    /// Headline only (one page fetch).
    pub async fn title(&self) -> String {
        match self.fetch_page().await {
            Some(body) => extract_title(&Html::parse_document(&body)),
            None => TITLE_FETCH_ERROR.to_string(),
        }
    }

    /// Summary only (one page fetch).
    pub async fn summary(&self) -> String {
        match self.fetch_page().await {
            Some(body) => extract_summary(&Html::parse_document(&body)),
            None => SUMMARY_FETCH_ERROR.to_string(),
        }
    }

    /// Thumbnail only (one page fetch plus the image download).
    pub async fn image(&self) -> Option<RgbaImage> {
        let body = self.fetch_page().await?;
        let url = extract_image_url(&Html::parse_document(&body))?;
        self.download_image(url).await
    }

    /// Headline, summary and thumbnail from a single page fetch.
    pub async fn article(&self) -> NewsArticle {
        let Some(body) = self.fetch_page().await else {
            return NewsArticle {
                title: TITLE_FETCH_ERROR.to_string(),
                summary: SUMMARY_FETCH_ERROR.to_string(),
                image: None,
            };
        };

        let page = ScrapedPage::parse(&body);

        let image = match page.image_url {
            Some(url) => self.download_image(url).await,
            None => {
                tracing::warn!("No image found for news article");
                None
            }
        };

        NewsArticle {
            title: page.title,
            summary: page.summary,
            image,
        }
    }

    /// Download and resize the thumbnail.
    async fn download_image(&self, url: String) -> Option<RgbaImage> {
        let bytes = match self.fetch_bytes(&url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Error downloading news image");
                return None;
            }
        };

        match image::load_from_memory(&bytes) {
            Ok(img) => {
                let (w, h) = NEWS_IMAGE_SIZE;
                Some(img.resize_exact(w, h, FilterType::Lanczos3).to_rgba8())
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Error decoding news image");
                None
            }
        }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, reqwest::Error> {
        let bytes = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}
