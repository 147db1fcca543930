use crate::core::RequestContext;
use tokio::task::JoinHandle;
use tracing::debug;
use url::Url;

/// User-invoked "is it down" check. Shares the network client with the
/// default resolver but sits outside the resolution chain.
pub struct Prober {
    client: reqwest::Client,
}

impl Prober {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Kicks off a reachability probe for `target` and returns immediately.
    ///
    /// A target without a scheme is probed as `http://<target>`. Malformed
    /// targets are rejected synchronously with a reply and no task is
    /// spawned; otherwise hosts that care when the verdict lands may await
    /// the returned handle.
    pub fn probe(&self, ctx: &RequestContext, target: &str) -> Option<JoinHandle<()>> {
        let target = target.trim();
        let normalized = if target.contains("://") {
            target.to_string()
        } else {
            format!("http://{target}")
        };

        let Ok(link) = Url::parse(&normalized) else {
            ctx.mention_reply("URL doesn't appear to be valid");
            return None;
        };

        let client = self.client.clone();
        let ctx = ctx.clone();

        Some(tokio::spawn(async move {
            debug!("probing {link}");

            let up = match client.head(link.clone()).send().await {
                Ok(response) => response.status() == reqwest::StatusCode::OK,
                Err(_) => false,
            };

            if up {
                ctx.reply(&format!("It's just you! {link} looks up from here!"));
            } else {
                ctx.reply(&format!("It's not just you! {link} looks down from here."));
            }
        }))
    }
}
