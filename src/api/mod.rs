//! HTTP API for the relay
//!
//! Every JSON endpoint answers with a `{ "result": ... }` envelope.

pub mod routes;
pub mod server;

pub use server::{create_app, AppState};
