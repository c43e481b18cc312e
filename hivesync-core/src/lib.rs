//! # hivesync-core
//!
//! Core library for hivesync - a typed sync client for a spreadsheet-backed
//! beekeeping records API.
//!
//! This library provides:
//! - Domain types for the five record collections (apiaries, hives,
//!   inspections, metrics, tasks)
//! - An HTTP client speaking the endpoint's JSONP-read / JSON-write dialect
//! - An injectable in-memory snapshot store
//! - A sync layer with client-side referential checks
//! - Dashboard aggregations
//!
//! ## Architecture
//!
//! Data flows through three layers:
//! - **Transport:** [`api::ApiClient`], one request in, one settlement out
//! - **Cache:** [`Store`], five whole-replacement snapshot containers
//! - **Coordination:** [`SyncClient`], loads, validated mutations, re-fetch
//!   after every write
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hivesync_core::{Config, Store, SyncClient};
//!
//! # async fn run() -> hivesync_core::Result<()> {
//! let config = Config::load()?;
//! let store = Arc::new(Store::new());
//! let client = SyncClient::from_config(&config, store.clone())?;
//!
//! let report = client.load_all().await;
//! println!("loaded {} records", report.total_records());
//! # Ok(())
//! # }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use stats::{DashboardSummary, MetricsTrend};
pub use store::Store;
pub use sync::{LoadReport, SyncClient};
pub use types::*;

// Public modules
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod stats;
pub mod store;
pub mod sync;
pub mod types;
