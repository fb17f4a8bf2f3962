//! Data models
//!
//! Wire types shared between the API clients and the booking controller.
//! Ids arrive as JSON numbers or strings and are kept as `String`.

pub mod booking;
pub mod facility;
pub mod slot;
pub mod user;

// Re-exports
pub use booking::*;
pub use facility::*;
pub use slot::*;
pub use user::*;
