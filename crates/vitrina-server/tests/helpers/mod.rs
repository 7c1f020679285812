//! Test helpers para vitrina-server.

#![allow(dead_code, unused_imports)]

pub mod client;

pub use client::{SEEDED_KEYS, TestClient, TestResponse, client_with_cache, seeded_cache};
