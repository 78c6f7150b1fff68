//! Literal and comment scanners
//!
//! The two leaf scanners: quoted literals and comments. Both exist so the
//! higher-level scanners never mistake a `;`, `{` or `}` inside a string or
//! comment for real structure.

use std::io::BufRead;

use super::stream::InputStream;
use crate::error::Result;

/// Read a string or character literal up to and including `terminator`.
///
/// The buffer already holds the opening delimiter. Every consumed byte is
/// appended, the terminator included. A backslash always takes the following
/// byte verbatim, so an escaped quote cannot end the literal early. An
/// unterminated literal is consumed to end-of-input.
pub fn scan_literal<R: BufRead>(
    stream: &mut InputStream<R>,
    buffer: &mut Vec<u8>,
    terminator: u8,
) -> Result<()> {
    while let Some(b) = stream.next_byte()? {
        buffer.push(b);

        if b == terminator {
            break;
        }

        if b == b'\\' {
            if let Some(escaped) = stream.next_byte()? {
                buffer.push(escaped);
            }
        }
    }

    Ok(())
}

/// Read a comment into `buffer`, which already contains the first `/`.
///
/// Returns true if a line or block comment was consumed. If the next byte
/// does not continue a comment it is pushed back and false is returned; the
/// caller decides what to do with the lone slash.
pub fn scan_comment<R: BufRead>(stream: &mut InputStream<R>, buffer: &mut Vec<u8>) -> Result<bool> {
    match stream.next_byte()? {
        Some(b'*') => {
            buffer.push(b'*');
            scan_block_comment(stream, buffer)?;
            Ok(true)
        }
        Some(b'/') => {
            buffer.push(b'/');
            scan_line_comment(stream, buffer)?;
            Ok(true)
        }
        Some(other) => {
            stream.push_back(other);
            Ok(false)
        }
        None => Ok(false),
    }
}

/// Read a block comment up to and including `*/`. The opening `/*` is
/// already in the buffer.
fn scan_block_comment<R: BufRead>(stream: &mut InputStream<R>, buffer: &mut Vec<u8>) -> Result<()> {
    while let Some(b) = stream.next_byte()? {
        buffer.push(b);

        if b == b'*' {
            match stream.next_byte()? {
                Some(b'/') => {
                    buffer.push(b'/');
                    break;
                }
                // Not the end yet; the byte may itself be another `*`
                Some(other) => stream.push_back(other),
                None => break,
            }
        }
    }

    Ok(())
}

/// Read a line comment up to and including the newline. The opening `//` is
/// already in the buffer.
fn scan_line_comment<R: BufRead>(stream: &mut InputStream<R>, buffer: &mut Vec<u8>) -> Result<()> {
    while let Some(b) = stream.next_byte()? {
        buffer.push(b);
        if b == b'\n' {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_literal_str(input: &str, terminator: u8) -> (String, String) {
        let mut stream = InputStream::from_string(input);
        let mut buffer = Vec::new();
        scan_literal(&mut stream, &mut buffer, terminator).unwrap();
        let mut rest = Vec::new();
        while let Some(b) = stream.next_byte().unwrap() {
            rest.push(b);
        }
        (
            String::from_utf8(buffer).unwrap(),
            String::from_utf8(rest).unwrap(),
        )
    }

    #[test]
    fn test_literal_stops_at_terminator() {
        let (lit, rest) = scan_literal_str("hello\" + 1", b'"');
        assert_eq!(lit, "hello\"");
        assert_eq!(rest, " + 1");
    }

    #[test]
    fn test_literal_escaped_quote_does_not_terminate() {
        let (lit, rest) = scan_literal_str(r#"a\"b" rest"#, b'"');
        assert_eq!(lit, r#"a\"b""#);
        assert_eq!(rest, " rest");
    }

    #[test]
    fn test_literal_escaped_backslash() {
        let (lit, rest) = scan_literal_str(r#"a\\" rest"#, b'"');
        assert_eq!(lit, r#"a\\""#);
        assert_eq!(rest, " rest");
    }

    #[test]
    fn test_literal_char_terminator() {
        let (lit, rest) = scan_literal_str("x' + y", b'\'');
        assert_eq!(lit, "x'");
        assert_eq!(rest, " + y");
    }

    #[test]
    fn test_unterminated_literal_consumes_to_eof() {
        let (lit, rest) = scan_literal_str("never ends", b'"');
        assert_eq!(lit, "never ends");
        assert_eq!(rest, "");
    }

    #[test]
    fn test_trailing_backslash_at_eof() {
        let (lit, _) = scan_literal_str("abc\\", b'"');
        assert_eq!(lit, "abc\\");
    }

    fn scan_comment_str(input: &str) -> (bool, String, String) {
        let mut stream = InputStream::from_string(input);
        let mut buffer = vec![b'/'];
        let consumed = scan_comment(&mut stream, &mut buffer).unwrap();
        let mut rest = Vec::new();
        while let Some(b) = stream.next_byte().unwrap() {
            rest.push(b);
        }
        (
            consumed,
            String::from_utf8(buffer).unwrap(),
            String::from_utf8(rest).unwrap(),
        )
    }

    #[test]
    fn test_block_comment() {
        let (consumed, comment, rest) = scan_comment_str("* hello */int x;");
        assert!(consumed);
        assert_eq!(comment, "/* hello */");
        assert_eq!(rest, "int x;");
    }

    #[test]
    fn test_block_comment_with_inner_stars() {
        let (consumed, comment, rest) = scan_comment_str("** stars **/after");
        assert!(consumed);
        assert_eq!(comment, "/** stars **/");
        assert_eq!(rest, "after");
    }

    #[test]
    fn test_line_comment_includes_newline() {
        let (consumed, comment, rest) = scan_comment_str("/ note\nint x;");
        assert!(consumed);
        assert_eq!(comment, "// note\n");
        assert_eq!(rest, "int x;");
    }

    #[test]
    fn test_not_a_comment_pushes_back() {
        let (consumed, comment, rest) = scan_comment_str(" 2");
        assert!(!consumed);
        assert_eq!(comment, "/");
        assert_eq!(rest, " 2");
    }

    #[test]
    fn test_slash_at_eof() {
        let (consumed, comment, rest) = scan_comment_str("");
        assert!(!consumed);
        assert_eq!(comment, "/");
        assert_eq!(rest, "");
    }

    #[test]
    fn test_unterminated_block_comment() {
        let (consumed, comment, rest) = scan_comment_str("* never closed");
        assert!(consumed);
        assert_eq!(comment, "/* never closed");
        assert_eq!(rest, "");
    }

    #[test]
    fn test_line_comment_at_eof_without_newline() {
        let (consumed, comment, rest) = scan_comment_str("/ last line");
        assert!(consumed);
        assert_eq!(comment, "// last line");
        assert_eq!(rest, "");
    }
}
