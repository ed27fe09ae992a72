//! Domain models
//!
//! Rows as they are stored, shared by both store backends.

pub mod auth;
pub mod blog_post;
pub mod booking;
pub mod inquiry;
pub mod vehicle;
