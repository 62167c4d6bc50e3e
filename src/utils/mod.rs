//! Utility functions.
//!
//! This module provides string sanitization and preview helpers used when
//! server responses end up in log lines or error messages.

pub mod sanitize;

pub use sanitize::truncate_preview;
