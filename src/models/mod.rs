pub mod account;
pub mod paymail;
pub mod responses;

// Re-export commonly used types
pub use account::{Account, DirectoryFile, RotationPolicy};
pub use paymail::{Paymail, PaymailError};
pub use responses::{
    DestinationOutput, ErrorResponse, PaymentDestinationQuery, PaymentDestinationResponse,
    PkiResponse, ServiceDiscoveryResponse, BSVALIAS_VERSION,
};
