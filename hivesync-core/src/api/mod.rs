//! HTTP transport for the spreadsheet-backed records API
//!
//! The remote endpoint is a single Apps Script URL speaking two dialects:
//! JSONP-padded JSON on GET (the deployed sheets still answer reads with
//! `callback({...})` padding) and plain JSON envelopes on POST. This module
//! owns the wire contract and the single transport primitive the rest of the
//! crate builds on.

mod client;
mod protocol;

pub use client::ApiClient;
pub use protocol::{Action, ApiEnvelope, ApiErrorBody, RequestId, WriteRequest};
