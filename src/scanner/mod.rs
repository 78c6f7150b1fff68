//! C source scanning utilities.
//!
//! This module provides the single-pass scanner core:
//! - [`InputStream`]: byte-at-a-time input with one-byte push-back
//! - [`lexical`]: string/character literal and comment scanners
//! - [`statement`]: compound statement (function body) and declaration scanners
//! - [`preproc`]: preprocessor line handling, including GNU line markers
//!
//! The scanners are mutually recursive consumers of the input stream: each is
//! entered with its opening delimiter already consumed, appends what it reads
//! to a caller-supplied buffer, and stops at its closing delimiter or at
//! end-of-input. None of them treat malformed input as an error; an
//! unterminated construct is simply consumed to end-of-input.

pub mod lexical;
pub mod preproc;
pub mod statement;
pub mod stream;

pub use lexical::{scan_comment, scan_literal};
pub use preproc::scan_preprocessor_line;
pub use statement::{scan_compound, scan_declaration};
pub use stream::InputStream;
