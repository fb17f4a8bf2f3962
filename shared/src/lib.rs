//! Shared types for the club booking client
//!
//! Wire models, error codes, response envelopes and the time and money
//! helpers used by every client crate.

pub mod error;
pub mod models;
pub mod money;
pub mod response;
pub mod time;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
