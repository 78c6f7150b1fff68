//! Top-level extraction driver and prototype filter
//!
//! The driver loops over the input one byte at a time: a `#` hands off to
//! the preprocessor handler, a `/` to the comment scanner, anything else
//! that is not whitespace or a stray `;` starts a declaration. Each scanned
//! declaration then runs through the prototype filter.

use std::io::{BufRead, Write};

use crate::config::Config;
use crate::error::Result;
use crate::scanner::{
    scan_comment, scan_declaration, scan_preprocessor_line, InputStream,
};

/// Extract prototypes from `reader` and write them to `writer`.
///
/// `input_name` is the name of the file the prototypes are wanted from.
/// Declarations are only emitted while the most recent line marker (or, with
/// unpreprocessed input, the absence of one) attributes the text to that
/// file.
pub fn extract_prototypes<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    config: &Config,
    input_name: &str,
) -> Result<()> {
    let mut stream = InputStream::new(reader);
    let mut current_file = input_name.to_string();
    let mut comment: Vec<u8> = Vec::new();
    let mut declaration: Vec<u8> = Vec::new();

    while let Some(b) = stream.next_byte()? {
        match b {
            b'#' => {
                if let Some(filename) = scan_preprocessor_line(&mut stream)? {
                    if config.debug {
                        eprintln!(
                            "[DEBUG] line marker: current file is now \"{filename}\" (input line {})",
                            stream.line_number()
                        );
                    }
                    current_file = filename;
                }
                // A directive breaks the comment/declaration association
                comment.clear();
            }
            b'/' => {
                comment.clear();
                comment.push(b'/');
                if !scan_comment(&mut stream, &mut comment)? {
                    comment.clear();
                }
            }
            _ if b.is_ascii_whitespace() || b == b';' => {}
            _ => {
                declaration.clear();
                declaration.push(b);
                scan_declaration(&mut stream, &mut declaration, &mut comment)?;

                if current_file == input_name {
                    emit_if_prototype(writer, &declaration, &comment, config)?;
                }

                comment.clear();
            }
        }
    }

    Ok(())
}

/// Apply the prototype filter to one scanned declaration and emit it if it
/// qualifies.
fn emit_if_prototype<W: Write>(
    writer: &mut W,
    declaration: &[u8],
    comment: &[u8],
    config: &Config,
) -> Result<()> {
    if !declaration.contains(&b'(') {
        return Ok(());
    }

    let text = declaration.trim_ascii();

    // Guard against malformed fragments being mistaken for declarations
    match text.first() {
        Some(&b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return Ok(()),
    }

    if !config.include_statics && is_static_qualified(text) {
        return Ok(());
    }

    writer.write_all(b"\n")?;

    if config.include_comments && !comment.is_empty() {
        writer.write_all(comment)?;
        writer.write_all(b"\n")?;
    }

    writer.write_all(text)?;
    if text.last() != Some(&b';') {
        writer.write_all(b";")?;
    }
    writer.write_all(b"\n")?;

    Ok(())
}

/// Decide whether the declaration uses `static` as a keyword.
///
/// Purely textual, on the first occurrence of the substring only: `static`
/// at the start followed by whitespace, or surrounded by whitespace, counts
/// as the storage-class keyword. Any other occurrence is assumed to be part
/// of an identifier (say, a function named `reset_static_state`).
fn is_static_qualified(text: &[u8]) -> bool {
    const NEEDLE: &[u8] = b"static";

    let Some(pos) = text
        .windows(NEEDLE.len())
        .position(|window| window == NEEDLE)
    else {
        return false;
    };

    let followed_by_space = text
        .get(pos + NEEDLE.len())
        .is_some_and(u8::is_ascii_whitespace);

    if pos == 0 {
        followed_by_space
    } else {
        text[pos - 1].is_ascii_whitespace() && followed_by_space
    }
}
