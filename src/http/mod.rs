//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/trace_context.rs (extract inbound context, open server span)
//!     → handlers.rs (demo traced operations)
//!     → response.rs (error mapping, JSON bodies)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;

pub use response::ApiError;
pub use server::HttpServer;
