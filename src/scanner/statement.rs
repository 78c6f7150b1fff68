//! Compound statement and declaration scanners
//!
//! The declaration scanner collects the text of one top-level statement; the
//! compound scanner balances the braces of a function body so the caller can
//! throw the body away.

use std::io::BufRead;

use super::lexical::{scan_comment, scan_literal};
use super::stream::InputStream;
use crate::error::Result;

/// Read a compound statement up to its matching `}` and add it to `buffer`.
///
/// Entered after the opening `{` has been consumed. Nested braces are
/// tracked with an explicit depth counter; strings and comments are consumed
/// through their own scanners so braces inside them do not count. The caller
/// discards the buffer, only balanced consumption matters. Unbalanced input
/// is consumed to end-of-input.
pub fn scan_compound<R: BufRead>(stream: &mut InputStream<R>, buffer: &mut Vec<u8>) -> Result<()> {
    let mut depth: usize = 1;

    while let Some(b) = stream.next_byte()? {
        buffer.push(b);

        match b {
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            b'{' => depth += 1,
            b'"' | b'\'' => scan_literal(stream, buffer, b)?,
            b'/' => {
                // A lone slash inside a body needs no special handling
                scan_comment(stream, buffer)?;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Read a declaration up to a `;` or an opening `{` and add it to
/// `declaration`.
///
/// Entered with the first byte of the statement already in `declaration`.
/// A terminating `;` is appended; an opening `{` is not, the body behind it
/// is consumed and discarded instead. Comments seen along the way replace
/// `comment` (last one wins); a `/` that does not start a comment stays part
/// of the declaration text.
pub fn scan_declaration<R: BufRead>(
    stream: &mut InputStream<R>,
    declaration: &mut Vec<u8>,
    comment: &mut Vec<u8>,
) -> Result<()> {
    while let Some(b) = stream.next_byte()? {
        match b {
            b';' => {
                declaration.push(b);
                break;
            }
            b'{' => {
                let mut body = Vec::new();
                scan_compound(stream, &mut body)?;
                break;
            }
            b'/' => {
                comment.clear();
                comment.push(b'/');
                if !scan_comment(stream, comment)? {
                    declaration.push(b'/');
                    comment.clear();
                }
            }
            b'"' | b'\'' => {
                declaration.push(b);
                scan_literal(stream, declaration, b)?;
            }
            _ => declaration.push(b),
        }
    }

    Ok(())
}
