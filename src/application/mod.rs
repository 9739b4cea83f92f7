//! # Application Layer
//!
//! Prompt construction and the conversation controller, written against the
//! [`GenerativeClient`] seam so they never touch HTTP directly.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
