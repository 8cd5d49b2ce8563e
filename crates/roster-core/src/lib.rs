//! Core types and trait definitions for the student roster.
//!
//! This crate is deliberately free of image and database dependencies.
//! The artifact, store, and CLI crates all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod store;
pub mod student;
pub mod verify;

pub use error::{Error, Result};
