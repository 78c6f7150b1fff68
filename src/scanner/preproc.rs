//! Preprocessor line handling
//!
//! A `#` at the top level starts a preprocessor line. The only directive
//! exproto cares about is the GNU line marker, `# <num> "<file>" [flags]`,
//! which the preprocessor emits to record where the following text came
//! from. Everything else on a `#` line is consumed and ignored.

use std::io::BufRead;

use super::lexical::scan_literal;
use super::stream::InputStream;
use crate::error::Result;

/// Handle a preprocessor line, the `#` already consumed.
///
/// Returns the marker filename if the line is a line marker, None otherwise.
/// The rest of the line is consumed either way, with backslash-newline
/// treated as a continuation of the directive.
pub fn scan_preprocessor_line<R: BufRead>(stream: &mut InputStream<R>) -> Result<Option<String>> {
    let mut filename = None;

    if line_marker_follows(stream)? {
        // Line marker; look for the quoted filename before the line ends.
        loop {
            match stream.next_byte()? {
                Some(b'"') => {
                    let mut buffer = Vec::new();
                    scan_literal(stream, &mut buffer, b'"')?;
                    if buffer.last() == Some(&b'"') {
                        buffer.pop();
                    }
                    filename = Some(String::from_utf8_lossy(&buffer).into_owned());
                    break;
                }
                Some(b'\n') => {
                    stream.push_back(b'\n');
                    break;
                }
                Some(_) => {}
                None => break,
            }
        }
    }

    consume_directive_tail(stream)?;

    Ok(filename)
}

/// Check whether the bytes after `#` form a decimal line number.
///
/// Skips spaces and tabs, then consumes any digits. The first byte that is
/// neither is pushed back so the caller still sees the rest of the line.
fn line_marker_follows<R: BufRead>(stream: &mut InputStream<R>) -> Result<bool> {
    let mut saw_digit = false;

    loop {
        match stream.next_byte()? {
            Some(b' ' | b'\t') if !saw_digit => {}
            Some(b) if b.is_ascii_digit() => saw_digit = true,
            Some(other) => {
                stream.push_back(other);
                break;
            }
            None => break,
        }
    }

    Ok(saw_digit)
}

/// Consume the remainder of a directive up to and including its newline.
///
/// A backslash immediately before the newline continues the directive onto
/// the next physical line.
fn consume_directive_tail<R: BufRead>(stream: &mut InputStream<R>) -> Result<()> {
    while let Some(b) = stream.next_byte()? {
        match b {
            b'\n' => break,
            b'\\' => match stream.next_byte()? {
                // Continuation; keep consuming the next line
                Some(b'\n') => {}
                Some(other) => stream.push_back(other),
                None => break,
            },
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_str(input: &str) -> (Option<String>, String) {
        let mut stream = InputStream::from_string(input);
        let filename = scan_preprocessor_line(&mut stream).unwrap();
        let mut rest = Vec::new();
        while let Some(b) = stream.next_byte().unwrap() {
            rest.push(b);
        }
        (filename, String::from_utf8(rest).unwrap())
    }

    #[test]
    fn test_line_marker_with_filename() {
        let (filename, rest) = scan_str(" 1 \"header.h\"\nint x;");
        assert_eq!(filename.as_deref(), Some("header.h"));
        assert_eq!(rest, "int x;");
    }

    #[test]
    fn test_line_marker_with_flags() {
        let (filename, rest) = scan_str(" 42 \"orig.c\" 2 3 4\nnext");
        assert_eq!(filename.as_deref(), Some("orig.c"));
        assert_eq!(rest, "next");
    }

    #[test]
    fn test_line_marker_no_leading_space() {
        let (filename, _) = scan_str("5 \"file.c\"\n");
        assert_eq!(filename.as_deref(), Some("file.c"));
    }

    #[test]
    fn test_define_is_not_a_marker() {
        let (filename, rest) = scan_str("define FOO 1\nint x;");
        assert_eq!(filename, None);
        assert_eq!(rest, "int x;");
    }

    #[test]
    fn test_marker_without_filename_consumes_one_line_only() {
        let (filename, rest) = scan_str(" 7\nint x;");
        assert_eq!(filename, None);
        assert_eq!(rest, "int x;");
    }

    #[test]
    fn test_directive_continuation() {
        let (filename, rest) = scan_str("define FOO \\\n  1\nint x;");
        assert_eq!(filename, None);
        assert_eq!(rest, "int x;");
    }

    #[test]
    fn test_backslash_not_followed_by_newline() {
        let (filename, rest) = scan_str("define SEP \\x\nint x;");
        assert_eq!(filename, None);
        assert_eq!(rest, "int x;");
    }

    #[test]
    fn test_directive_at_eof() {
        let (filename, rest) = scan_str("pragma once");
        assert_eq!(filename, None);
        assert_eq!(rest, "");
    }

    #[test]
    fn test_marker_filename_with_escapes() {
        let (filename, _) = scan_str(" 1 \"dir\\\\name.c\"\n");
        assert_eq!(filename.as_deref(), Some("dir\\\\name.c"));
    }
}
