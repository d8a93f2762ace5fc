//! Line-oriented `key=value` text format.
//!
//! Reading follows the classic properties-file rules:
//! - `#` and `!` start comment lines, blank lines are skipped
//! - a line ending in an odd number of backslashes continues on the next line
//! - the key ends at the first unescaped `=`, `:` or whitespace
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are decoded
//!
//! Files are read and written as UTF-8; non-ASCII characters are written as-is.

use std::io::{self, Write};
use thiserror::Error;

/// A logical line that could not be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Parse properties text into `(key, value)` pairs in file order.
///
/// Duplicate keys are all returned; callers collecting into a map get
/// last-one-wins.
pub fn parse(input: &str) -> Result<Vec<(String, String)>, ParseError> {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = normalized.split('\n').enumerate();
    let mut entries = Vec::new();

    while let Some((index, line)) = lines.next() {
        let line = line.trim_start_matches(is_whitespace);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_whitespace)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        let line_no = index + 1;
        entries.push((unescape(key, line_no)?, unescape(value, line_no)?));
    }

    Ok(entries)
}

/// True when the line ends in an odd number of backslashes.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_whitespace(c) {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_whitespace);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(is_whitespace);
    }
    (key, rest)
}

fn unescape(raw: &str, line: usize) -> Result<String, ParseError> {
    let malformed = |message: &str| ParseError {
        line,
        message: message.to_string(),
    };

    let mut out = String::with_capacity(raw.len());
    // \uXXXX escapes are UTF-16 code units; surrogate pairs span two escapes.
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_units(&mut units, &mut out).map_err(|_| malformed("unpaired surrogate"))?;
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        if escaped == 'u' {
            let hex: String = chars.by_ref().take(4).collect();
            if hex.chars().count() != 4 {
                return Err(malformed("truncated \\uXXXX escape"));
            }
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(malformed("malformed \\uXXXX escape"));
            }
            let unit = u16::from_str_radix(&hex, 16)
                .map_err(|_| malformed("malformed \\uXXXX escape"))?;
            units.push(unit);
            continue;
        }
        flush_units(&mut units, &mut out).map_err(|_| malformed("unpaired surrogate"))?;
        out.push(match escaped {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\x0c',
            other => other,
        });
    }
    flush_units(&mut units, &mut out).map_err(|_| malformed("unpaired surrogate"))?;

    Ok(out)
}

fn flush_units(units: &mut Vec<u16>, out: &mut String) -> Result<(), std::string::FromUtf16Error> {
    if !units.is_empty() {
        out.push_str(&String::from_utf16(units)?);
        units.clear();
    }
    Ok(())
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Write comment lines followed by one `key=value` line per entry.
pub fn write<'a, W, I>(out: &mut W, comments: &[String], entries: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    for comment in comments {
        for line in comment.lines() {
            writeln!(out, "#{}", line)?;
        }
    }
    for (key, value) in entries {
        writeln!(out, "{}={}", escape(key, true), escape(value, false))?;
    }
    Ok(())
}
