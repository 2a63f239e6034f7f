//! AWS-oriented adapters and the session handler for the fake traffic Lambda.
//!
//! The handler is synchronous and receives every collaborator explicitly:
//! the capture time, a random source, a [`adapters::traffic_client::TrafficClient`]
//! and a [`adapters::object_store::SessionLogStore`]. The `fake_traffic`
//! binary supplies the reqwest and S3 implementations.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod startup;
