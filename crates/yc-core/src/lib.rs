//! yelp-camp/crates/yc-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Yelp-Camp.

pub mod error;
pub mod models;
pub mod traits;
pub mod validation;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
