use crate::core::{Outcome, ProviderRegistry, RegistryError, RequestContext, Resolver};
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const YOUTUBE_PREFIX: &str = "[YouTube]";
const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Registers the video metadata resolver for the canonical and short-link
/// domains of the video service.
pub fn register(
    registry: &mut ProviderRegistry,
    client: reqwest::Client,
    api_key: impl Into<String>,
) -> Result<(), RegistryError> {
    let resolver = Arc::new(YouTubeResolver::new(client, api_key));
    registry.register("youtube.com", resolver.clone())?;
    registry.register("youtu.be", resolver)
}

/// Replies with a video's duration (or live status) and title, looked up
/// through the public metadata API.
pub struct YouTubeResolver {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct VideoItem {
    content_details: ContentDetails,
    snippet: Snippet,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ContentDetails {
    duration: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Snippet {
    title: String,
    live_broadcast_content: String,
}

impl YouTubeResolver {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            api_base: API_BASE.to_string(),
        }
    }

    /// Points the resolver at a different metadata endpoint; tests run
    /// against a local server.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Full watch links carry the id in the `v` parameter; short links put
    /// it in the first path segment.
    pub fn extract_video_id(&self, link: &Url) -> Option<String> {
        if let Some((_, id)) = link.query_pairs().find(|(key, _)| key == "v") {
            return Some(id.into_owned());
        }

        link.path_segments()
            .and_then(|mut segments| segments.next())
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
    }

    async fn fetch_video(&self, id: &str) -> Result<VideoListResponse> {
        let response = self
            .client
            .get(format!("{}/videos", self.api_base))
            .query(&[
                ("part", "contentDetails,snippet"),
                ("id", id),
                ("fields", "items(contentDetails,snippet)"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Resolver for YouTubeResolver {
    fn name(&self) -> &'static str {
        "youtube"
    }

    async fn attempt(&self, ctx: &RequestContext, link: &Url) -> Result<Outcome> {
        let Some(id) = self.extract_video_id(link) else {
            return Ok(Outcome::Unhandled);
        };

        // API trouble means another provider, or the title fetch, gets a shot.
        let videos = match self.fetch_video(&id).await {
            Ok(videos) => videos,
            Err(err) => {
                debug!("video lookup failed for {id}: {err}");
                return Ok(Outcome::Unhandled);
            }
        };

        let Some(video) = videos.items.into_iter().next() else {
            return Ok(Outcome::Unhandled);
        };

        let title = video.snippet.title;

        // Live and upcoming broadcasts have no meaningful duration.
        if let status @ ("live" | "upcoming") = video.snippet.live_broadcast_content.as_str() {
            ctx.reply(&format!("{YOUTUBE_PREFIX} {} ~ {title}", capitalize(status)));
            return Ok(Outcome::Handled);
        }

        let Some(duration) = parse_iso8601_duration(&video.content_details.duration) else {
            debug!(
                "unparsable duration {:?} for {id}",
                video.content_details.duration
            );
            return Ok(Outcome::Unhandled);
        };

        ctx.reply(&format!(
            "{YOUTUBE_PREFIX} {} ~ {title}",
            format_duration(&duration)
        ));
        Ok(Outcome::Handled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DurationParts {
    days: u64,
    hours: u64,
    minutes: u64,
    seconds: u64,
}

fn parse_iso8601_duration(raw: &str) -> Option<DurationParts> {
    // Durations come back like P1DT2H3M4S; every component is optional.
    let pattern = Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$").ok()?;
    let captures = pattern.captures(raw)?;

    // A bare "P" matches the pattern but carries nothing.
    if captures.iter().skip(1).all(|group| group.is_none()) {
        return None;
    }

    let part = |index: usize| {
        captures
            .get(index)
            .map_or(Some(0), |m| m.as_str().parse::<u64>().ok())
    };

    Some(DurationParts {
        days: part(1)?,
        hours: part(2)?,
        minutes: part(3)?,
        seconds: part(4)?,
    })
}

// Leading zero fields are dropped down to the coarsest nonzero unit, so
// short videos read as MM:SS rather than 00:00:MM:SS.
fn format_duration(duration: &DurationParts) -> String {
    if duration.days > 0 {
        format!(
            "{:02}:{:02}:{:02}:{:02}",
            duration.days, duration.hours, duration.minutes, duration.seconds
        )
    } else if duration.hours > 0 {
        format!(
            "{:02}:{:02}:{:02}",
            duration.hours, duration.minutes, duration.seconds
        )
    } else {
        format!("{:02}:{:02}", duration.minutes, duration.seconds)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
