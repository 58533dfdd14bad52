//! xsproof: execution-proof validation for XSS findings.
//!
//! Proves that a candidate injection payload actually executed inside a real
//! browser, as opposed to merely being reflected in an HTTP response. Each
//! validation call opens a fresh chromium context against a crafted URL,
//! races script-triggered dialog events against a wait window, and on
//! confirmed execution captures a deterministically named JPEG screenshot.
//!
//! The scanning pipeline that discovers candidate URLs and payloads lives
//! elsewhere; this crate only validates one (url, payload, context) tuple at
//! a time and returns a [`models::ValidationResult`].

pub mod browser;
pub mod capture;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod reporting;
pub mod store;
pub mod utils;
pub mod validator;
