//! Utilities
//!
//! Error handling, field validation and slug generation.

pub mod errors;
pub mod slug;
pub mod validation;
