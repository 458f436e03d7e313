//! API route handlers

pub mod game;
pub mod token;
pub mod wallet;

use axum::Json;
use serde::Serialize;

/// Uniform `{ "result": ... }` body returned by every JSON endpoint
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub result: T,
}

impl<T> Envelope<T> {
    pub fn json(result: T) -> Json<Self> {
        Json(Self { result })
    }
}
