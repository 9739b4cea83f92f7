//! # Domain Layer
//!
//! Conversation models, the generateContent wire types, and the error type
//! shared by every other layer. Nothing here depends on HTTP or terminal code.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
