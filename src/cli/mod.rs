use crate::config::Config;
use crate::core::{Dispatcher, Prober, ProviderRegistry, ReplySink, RequestContext};
use crate::resolvers::youtube;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "linkbot")]
#[command(about = "Resolves links in a chat message and prints the replies")]
#[command(version)]
pub struct Cli {
    /// Message text to scan for links
    #[arg(value_name = "MESSAGE")]
    pub message: Vec<String>,

    /// Check whether a host looks down instead of resolving links
    #[arg(long, value_name = "TARGET", conflicts_with = "message")]
    pub probe: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Identity replies are addressed to
    #[arg(short, long, default_value = "console")]
    pub nick: String,

    /// Enable debug output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Prints each reply line to stdout; the stdout lock keeps concurrently
/// emitted lines whole.
struct StdoutSink;

impl ReplySink for StdoutSink {
    fn reply(&self, text: &str) {
        println!("{text}");
    }

    fn mention_reply(&self, target: &str, text: &str) {
        println!("{target}: {text}");
    }
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let client = config.http.client()?;

        let ctx = RequestContext::new(&self.nick, true, Arc::new(StdoutSink));

        if let Some(target) = &self.probe {
            let prober = Prober::new(client);
            if let Some(handle) = prober.probe(&ctx, target) {
                handle.await?;
            }
            return Ok(());
        }

        // Domain providers register before the dispatcher takes the registry.
        let mut registry = ProviderRegistry::new();
        if let Some(youtube_config) = &config.youtube {
            youtube::register(&mut registry, client.clone(), &youtube_config.api_key)?;
        }

        let dispatcher = Dispatcher::new(registry, client);
        dispatcher.dispatch(&ctx, &self.message.join(" ")).await;

        Ok(())
    }
}
