pub mod bearer_auth;
pub mod request_trace;
pub mod structured_logger;

pub use bearer_auth::{authenticate, parse_bearer, AuthFailure, BearerAuth};
pub use request_trace::{RequestTrace, TraceId};
pub use structured_logger::StructuredLogger;
