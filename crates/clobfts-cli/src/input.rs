//! Line-oriented console input

use std::io::{self, BufRead, Write};

/// Line that ends multi-line content input (case-insensitive, trimmed)
pub const CONTENT_SENTINEL: &str = "EOF";

/// Read one line, replacing bytes that are not valid UTF-8
///
/// Returns `None` at end of input. The line terminator is stripped.
pub fn read_line_lossy<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Read lines until the sentinel line or end of input
///
/// Every kept line is terminated with `\n`; the sentinel itself is dropped.
pub fn read_until_sentinel<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut content = String::new();

    while let Some(line) = read_line_lossy(reader)? {
        if line.trim().eq_ignore_ascii_case(CONTENT_SENTINEL) {
            break;
        }

        content.push_str(&line);
        content.push('\n');
    }

    Ok(content)
}

/// Print `label` and read one line without its terminator
///
/// Returns `None` at end of input.
pub fn prompt<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(writer, "{}", label)?;
    writer.flush()?;

    read_line_lossy(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_until_sentinel() {
        let mut input = Cursor::new("first line\nsecond line\nEOF\nignored\n");
        let content = read_until_sentinel(&mut input).unwrap();
        assert_eq!(content, "first line\nsecond line\n");
    }

    #[test]
    fn test_sentinel_is_case_insensitive_and_trimmed() {
        let mut input = Cursor::new("body\n   eof  \n");
        assert_eq!(read_until_sentinel(&mut input).unwrap(), "body\n");
    }

    #[test]
    fn test_sentinel_inside_a_line_is_content() {
        let mut input = Cursor::new("EOF marker here\nEOF\n");
        assert_eq!(
            read_until_sentinel(&mut input).unwrap(),
            "EOF marker here\n"
        );
    }

    #[test]
    fn test_immediate_sentinel_gives_empty_content() {
        let mut input = Cursor::new("EOF\n");
        assert_eq!(read_until_sentinel(&mut input).unwrap(), "");
    }

    #[test]
    fn test_end_of_input_without_sentinel() {
        let mut input = Cursor::new("line one\r\nline two");
        assert_eq!(
            read_until_sentinel(&mut input).unwrap(),
            "line one\nline two\n"
        );
    }

    #[test]
    fn test_prompt_writes_label_and_reads_line() {
        let mut input = Cursor::new("Doc1\r\nrest\n");
        let mut out = Vec::new();

        let answer = prompt(&mut input, &mut out, "Name: ").unwrap();

        assert_eq!(answer.as_deref(), Some("Doc1"));
        assert_eq!(String::from_utf8(out).unwrap(), "Name: ");
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_rejected() {
        let mut input = Cursor::new(b"caf\xe9\n\xff\xfe\nEOF\n".to_vec());
        assert_eq!(
            read_until_sentinel(&mut input).unwrap(),
            "caf\u{FFFD}\n\u{FFFD}\u{FFFD}\n"
        );

        let mut input = Cursor::new(b"\xff\r\n".to_vec());
        assert_eq!(read_line_lossy(&mut input).unwrap().as_deref(), Some("\u{FFFD}"));
    }

    #[test]
    fn test_prompt_at_end_of_input() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        assert_eq!(prompt(&mut input, &mut out, "> ").unwrap(), None);
    }
}
