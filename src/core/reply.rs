use std::sync::Arc;
use tracing::debug;

/// Host-supplied reply channel. Each call delivers one complete line and must
/// tolerate concurrent emission from any number of resolution tasks.
pub trait ReplySink: Send + Sync {
    /// Sends a line visible to the whole conversation.
    fn reply(&self, text: &str);

    /// Sends a line addressed at a specific identity.
    fn mention_reply(&self, target: &str, text: &str);
}

/// Read-only handle to the originating message plus the reply sink.
#[derive(Clone)]
pub struct RequestContext {
    sender: String,
    public: bool,
    sink: Arc<dyn ReplySink>,
}

impl RequestContext {
    pub fn new(sender: impl Into<String>, public: bool, sink: Arc<dyn ReplySink>) -> Self {
        Self {
            sender: sender.into(),
            public,
            sink,
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn reply(&self, text: &str) {
        debug!(sender = %self.sender, "reply: {text}");
        self.sink.reply(text);
    }

    pub fn mention_reply(&self, text: &str) {
        debug!(sender = %self.sender, "mention reply: {text}");
        self.sink.mention_reply(&self.sender, text);
    }
}
