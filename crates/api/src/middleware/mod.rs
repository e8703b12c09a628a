//! HTTP middleware stack for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. CORS (answer preflights, add allow headers)
//! 3. Set request ID (add unique ID to each request)
//! 4. `TraceLayer` (request tracing, span carries the request ID)
//! 5. Propagate request ID (echo it on the response)

pub mod cors;
pub mod request_id;

pub use cors::cors_layer;
pub use request_id::{propagate_request_id_layer, set_request_id_layer};
