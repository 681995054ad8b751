//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → request.rs (assign x-request-id)
//!     → cors.rs (reject foreign origins, answer preflight)
//!     → handlers.rs (one query at most, via the store)
//!     → error.rs (map failures to JSON error bodies)
//!     → Send to client
//! ```

pub mod cors;
pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use cors::AllowList;
pub use error::ApiError;
pub use request::{RequestIdMaker, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
