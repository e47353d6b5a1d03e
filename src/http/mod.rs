//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, tracing, timeout)
//!     → redirect.rs (/r/i, /r/u, /plots, /uchastok → 30x or 404)
//!     → api.rs (/api/canonical JSON for page and sitemap collaborators)
//!     → health.rs (/health store probe)
//! ```

pub mod api;
pub mod health;
pub mod redirect;
pub mod request;
pub mod server;

pub use redirect::{Endpoint, RedirectTargets};
pub use request::{RequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
