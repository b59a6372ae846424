//! Paymail (bsvalias) server.
//!
//! ## Endpoints
//! - `GET /.well-known/bsvalias` - Capability document
//! - `GET /api/v1/bsvalias/id/:paymail` - Public key for a handle
//! - `GET /api/v1/bsvalias/address/:paymail` - Output scripts paying a handle

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;

pub use config::Config;
pub use error::ApiError;
pub use server::{app, create_router, serve, AppState};
pub use services::{DirectoryResolver, Resolver};
