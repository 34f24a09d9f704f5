//! Shared utilities for doctranslate integration tests.
//!
//! - `TestHarness`: temp input/output directories plus a wired-up store,
//!   batch runner and event recorder
//! - `RecordingTranslator`: scripted translator that records every call
//! - `MockHttpServer`: one-response HTTP server for client tests

pub mod harness;
pub mod mock_http;
pub mod translator;

pub use harness::TestHarness;
pub use mock_http::MockHttpServer;
pub use translator::RecordingTranslator;
