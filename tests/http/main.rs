//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

mod bootstrap;
mod signatures;
mod support;
