//! # carlocation
//!
//! `carlocation` is a pair of small MQTT processes built with Rust: a publisher
//! that reports the car's location on a fixed interval, and a subscriber that
//! logs every location it receives.
//!
//! ## Core Modules
//!
//! - `client`: The broker session wrapping `rumqttc`, plus the `Link` seam the role loops drive.
//! - `config`: Handles loading broker and client configuration.
//! - `connection`: Connect-result codes, connect/disconnect logging and the wait-for-connection helper.
//! - `publisher`: The publishing loop.
//! - `subscriber`: The subscribing loop and message handler.
//! - `shutdown`: The shared run flag and the OS signal listener.
//! - `topics`: Topic names shared by both processes.
//! - `utils`: Error types and logging setup.

pub mod client;
pub mod config;
pub mod connection;
pub mod publisher;
pub mod shutdown;
pub mod subscriber;
pub mod topics;
pub mod utils;
