pub mod dispatch;
pub mod extract;
pub mod probe;
pub mod registry;
pub mod reply;

pub use dispatch::Dispatcher;
pub use extract::LinkExtractor;
pub use probe::Prober;
pub use registry::{Outcome, ProviderRegistry, RegistryError, Resolver};
pub use reply::{ReplySink, RequestContext};
