pub mod directory;
pub mod resolver;
pub mod timeout;

pub use directory::{DirectoryError, DirectoryResolver};
pub use resolver::{Destination, DestinationRequest, PkiRecord, ResolutionError, Resolver};
pub use timeout::TimeoutResolver;
