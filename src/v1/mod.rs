//! Client for the V1 REST API generation
//! (`{server}/callosum/v1/tspublic/v1/...`).

mod client;
pub mod services;

pub use client::V1Client;
