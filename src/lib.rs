pub mod cli;
pub mod config;
pub mod core;
pub mod resolvers;
pub mod utils;

pub use crate::core::{
    Dispatcher, LinkExtractor, Outcome, Prober, ProviderRegistry, RegistryError, ReplySink,
    RequestContext, Resolver,
};
pub use crate::resolvers::{TitleResolver, YouTubeResolver};
