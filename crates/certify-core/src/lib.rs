//! certify-core — courses, accounts, sessions, and MCQ scoring.
//!
//! This crate holds the in-memory domain model of the certification
//! portal. The console binary in `certify-cli` is a thin menu over the
//! [`portal::Portal`] operations defined here.

pub mod accounts;
pub mod catalog;
pub mod config;
pub mod course;
pub mod course_manager;
pub mod error;
pub mod model;
pub mod portal;
pub mod session;
pub mod traits;

pub use error::QuizError;
pub use portal::Portal;
