//! Utility modules.

/// `0`/`1` boolean codec used throughout the ClouDNS wire format.
pub mod api_bool;

/// Tolerant decoders for the loosely typed fields of API responses.
pub mod lenient;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
