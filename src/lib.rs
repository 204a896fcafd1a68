#![warn(missing_docs)]
//! Medialift is a relay daemon that coalesces media-library lifecycle events
//! and notifies a downstream media indexer to run an incremental sync.

pub mod cmd;
pub mod config;
pub mod context;
pub mod engine;
pub mod http_client;
pub mod http_server;
pub mod models;
pub mod notification;
pub mod supervisor;
pub mod test_helpers;
