//! Shared utility helpers.

pub(crate) mod log_sanitizer;
