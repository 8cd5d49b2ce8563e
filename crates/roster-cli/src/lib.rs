//! Verification-code roster: batch artifact generation, registration, lookup.
//!
//! The `roster` binary is a thin shell over this library. Each component is
//! built from a [`RosterConfig`] loaded once at startup.

pub mod audit;
pub mod batch;
pub mod config;
pub mod roster;

pub use batch::{BatchReport, Enroller};
pub use config::RosterConfig;
