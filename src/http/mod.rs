//! # HTTP Module
//!
//! The request handler: six routes, each mapping to one store operation,
//! with typed errors and response bodies.

pub mod errors;
pub mod response;
pub mod routes;
pub mod server;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use response::{InsertResponse, InsertSummary};
pub use routes::{router, AppState, INSTRUMENTS, SINGERS};
pub use server::HttpServer;
