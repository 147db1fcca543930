use crate::core::{Outcome, RequestContext, Resolver};
use crate::utils::collapse_whitespace;
use anyhow::Result;
use async_trait::async_trait;
use futures::StreamExt;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

// Pages are scanned for a title within the first MiB; the rest is ignored.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Domain-agnostic fallback: fetches the page and replies with its
/// `<title>`. Transport errors, bad statuses, and title-less pages all come
/// back as `Unhandled` with nothing said in chat.
pub struct TitleResolver {
    client: reqwest::Client,
}

impl TitleResolver {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_capped(&self, link: &Url) -> Option<String> {
        let response = match self.client.get(link.clone()).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!("fetch failed for {link}: {err}");
                return None;
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            debug!("skipping {link}: HTTP {}", response.status());
            return None;
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => {
                    debug!("body read failed for {link}: {err}");
                    return None;
                }
            };

            body.extend_from_slice(&chunk);
            if body.len() >= MAX_BODY_BYTES {
                body.truncate(MAX_BODY_BYTES);
                break;
            }
        }

        Some(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Text of the first `<title>` element, whitespace collapsed, if the
/// document has one.
fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        debug!("html parse reported {} recoverable errors", document.errors.len());
    }

    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|title| !title.is_empty())
}

#[async_trait]
impl Resolver for TitleResolver {
    fn name(&self) -> &'static str {
        "title"
    }

    async fn attempt(&self, ctx: &RequestContext, link: &Url) -> Result<Outcome> {
        let Some(html) = self.fetch_capped(link).await else {
            return Ok(Outcome::Unhandled);
        };

        match extract_title(&html) {
            Some(title) => {
                ctx.reply(&format!("Title: {title}"));
                Ok(Outcome::Handled)
            }
            None => Ok(Outcome::Unhandled),
        }
    }
}
