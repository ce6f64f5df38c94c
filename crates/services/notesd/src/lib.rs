//! notesd, a personal notes API.
//!
//! Users register and log in to obtain a bearer token; with it they create,
//! read, update and delete the notes they own.
//!
//! The binary wires these modules together; they are exposed as a library so
//! the router can be driven end to end from tests.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod prelude;
