//! Prototype extraction pipeline.
//!
//! This module orchestrates one extraction run:
//!
//! - Dispatch each top-level byte to the matching scanner: preprocessor
//!   lines, comments, or declarations.
//! - Track the current source file via preprocessor line markers so
//!   declarations pulled in from `#include`d headers are suppressed.
//! - Apply the prototype filter to each scanned declaration and write the
//!   accepted ones, optionally with their preceding comment.
//!
//! The main entry point is [`extract_prototypes`] which processes a buffered
//! reader and writes prototypes to any `Write` implementation.

pub mod pipeline;

pub use pipeline::extract_prototypes;
