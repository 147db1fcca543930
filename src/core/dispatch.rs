use crate::core::{LinkExtractor, Outcome, ProviderRegistry, RequestContext, Resolver};
use crate::resolvers::TitleResolver;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use url::Url;

/// Drives the resolution chain for every link found in a message.
pub struct Dispatcher {
    extractor: LinkExtractor,
    registry: Arc<ProviderRegistry>,
    fallback: Arc<TitleResolver>,
}

impl Dispatcher {
    /// Consumes the registry; once the dispatcher exists no further
    /// registration is possible.
    pub fn new(registry: ProviderRegistry, client: reqwest::Client) -> Self {
        Self {
            extractor: LinkExtractor::new(),
            registry: Arc::new(registry),
            fallback: Arc::new(TitleResolver::new(client)),
        }
    }

    /// Resolves every link in `text`, one task per link, and waits for the
    /// whole group to finish. Replies land in no particular order.
    pub async fn dispatch(&self, ctx: &RequestContext, text: &str) {
        debug!(
            sender = ctx.sender(),
            public = ctx.is_public(),
            "scanning message for links"
        );

        let mut tasks = JoinSet::new();

        for candidate in self.extractor.extract(text) {
            let registry = Arc::clone(&self.registry);
            let fallback = Arc::clone(&self.fallback);
            let ctx = ctx.clone();
            let raw = candidate.to_string();

            tasks.spawn(async move {
                resolve_link(registry, fallback, ctx, raw).await;
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                // A panicking resolver takes down its own task only.
                warn!("resolution task failed: {err}");
            }
        }
    }
}

async fn resolve_link(
    registry: Arc<ProviderRegistry>,
    fallback: Arc<TitleResolver>,
    ctx: RequestContext,
    raw: String,
) {
    // Malformed candidates are common in chat and not actionable.
    let Ok(mut link) = Url::parse(&raw) else {
        debug!("dropping unparsable candidate: {raw}");
        return;
    };
    strip_trailing_slash(&mut link);

    let Some(host) = link.host_str().map(str::to_owned) else {
        return;
    };

    let mut chain: Vec<Arc<dyn Resolver>> = registry.lookup(&host).to_vec();
    // A www link with no direct registration falls back to the bare domain.
    if let Some(bare) = host.strip_prefix("www.") {
        chain.extend(registry.lookup(bare).iter().cloned());
    }

    for resolver in chain {
        match resolver.attempt(&ctx, &link).await {
            Ok(Outcome::Handled) => return,
            Ok(Outcome::Unhandled) => {}
            Err(err) => warn!(resolver = resolver.name(), "resolver failed: {err:#}"),
        }
    }

    if let Err(err) = fallback.attempt(&ctx, &link).await {
        warn!(resolver = fallback.name(), "resolver failed: {err:#}");
    }
}

fn strip_trailing_slash(link: &mut Url) {
    let path = link.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path[..path.len() - 1].to_string();
        link.set_path(&trimmed);
    }
}
