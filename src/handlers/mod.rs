pub mod discovery;
pub mod identity;
pub mod payment_destination;

pub use discovery::service_discovery;
pub use identity::identity;
pub use payment_destination::payment_destination;
