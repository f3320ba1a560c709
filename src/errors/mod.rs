//! Error types and error reporting.
//!
//! This module defines the error types used by every phase of the pipeline.
//! It includes:
//!
//! - Error structures carrying the source span they refer to
//! - One error variant per condition, tagged as compile-time or runtime
//! - Diagnostics: errors resolved against their source, ready to print
//!   with a caret and tildes under the offending span

pub mod diagnostics;
pub mod errors;

#[cfg(test)]
mod tests;
