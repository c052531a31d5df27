//! HTTP surface of the scheduling service.
//!
//! Routes are nested under `/api/`. Every response body uses the
//! `{ success, data?, error?, message? }` envelope except `/api/health`.
//!
//! The router is composable: `api_router()` returns a `Router` that can
//! be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer, ApiSession};
pub use types::ApiContext;
