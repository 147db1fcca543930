use crate::core::RequestContext;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Outcome of a single resolver attempt, used to chain providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    Unhandled,
}

/// A capability that may claim a link and reply with a summary.
///
/// Resolvers may perform I/O and emit replies through the context, but they
/// never touch the registry that holds them. Returning `Err` is treated as
/// `Unhandled`: the dispatcher logs it and moves down the chain.
#[async_trait]
pub trait Resolver: Send + Sync {
    fn name(&self) -> &'static str;
    async fn attempt(&self, ctx: &RequestContext, link: &Url) -> Result<Outcome>;
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid domain: {0:?}")]
    InvalidDomain(String),
}

/// Per-domain resolver sequences, insertion order preserved.
///
/// Registration happens once during startup. Building a `Dispatcher` consumes
/// the registry, so registering after dispatch begins is unrepresentable.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Vec<Arc<dyn Resolver>>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a resolver to the sequence for `domain`. Domains are matched
    /// case-sensitively; callers pass lowercase canonical host names.
    pub fn register(
        &mut self,
        domain: impl Into<String>,
        resolver: Arc<dyn Resolver>,
    ) -> Result<(), RegistryError> {
        let domain = domain.into();
        if domain.is_empty() {
            return Err(RegistryError::InvalidDomain(domain));
        }

        self.providers.entry(domain).or_default().push(resolver);
        Ok(())
    }

    /// Returns the resolvers registered for an exact domain, or an empty
    /// slice if there are none.
    pub fn lookup(&self, domain: &str) -> &[Arc<dyn Resolver>] {
        self.providers
            .get(domain)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
