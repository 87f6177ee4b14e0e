//! Test helpers for reinhardt-synthesis tests.
//!
//! Shared record types and registry builders used across the integration
//! test files.

#![allow(dead_code)]

#[path = "helpers/models.rs"]
pub mod models;
