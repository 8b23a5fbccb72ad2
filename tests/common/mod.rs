//! Common test utilities for taxotag integration tests
//!
//! This module provides a small reference filing, a target document that
//! restates its tables, and a taxonomy catalog covering some of its
//! concepts.

#![allow(dead_code)]

pub mod filings;

pub use filings::{catalog, catalog_json, parse, write_fixture, REFERENCE, TARGET};
