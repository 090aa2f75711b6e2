//! Client for the V2.0 REST API generation (`{server}/api/rest/2.0/...`).

mod client;
pub mod services;

pub use client::V2Client;
