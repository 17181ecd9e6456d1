use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::data::Bundle;

/// Character encoding of bundle files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8", alias = "UTF-8", alias = "utf8")]
    #[value(name = "utf-8")]
    Utf8,
    #[serde(rename = "iso-8859-1", alias = "ISO-8859-1", alias = "latin1")]
    #[value(name = "iso-8859-1")]
    Latin1,
}

impl Encoding {
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            Encoding::Utf8 => {
                String::from_utf8(bytes.to_vec()).context("File is not valid UTF-8")
            }
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

pub fn parse_properties_file(path: &Path, encoding: Encoding) -> Result<Bundle> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read bundle file: {:?}", path))?;
    let content = encoding
        .decode(&bytes)
        .with_context(|| format!("Failed to decode bundle file: {:?}", path))?;
    parse_properties(&content).with_context(|| format!("Failed to parse bundle file: {:?}", path))
}

/// Parse `.properties` content into an ordered bundle.
///
/// Later definitions of a key replace the value but keep the key's
/// original position.
pub fn parse_properties(content: &str) -> Result<Bundle> {
    let mut bundle = Bundle::new();
    for line in logical_lines(content) {
        let (key, value) = split_key_value(&line.text);
        let key = unescape(key).with_context(|| format!("Invalid key on line {}", line.number))?;
        let value =
            unescape(value).with_context(|| format!("Invalid value on line {}", line.number))?;
        bundle.insert(key, value, line.number);
    }
    Ok(bundle)
}

/// One key/value line after joining continuations.
#[derive(Debug, PartialEq, Eq)]
struct LogicalLine {
    /// 1-based number of the first natural line.
    number: usize,
    /// Escapes are still in place; continuation backslashes are removed.
    text: String,
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Split on `\r\n`, `\r` or `\n`.
fn natural_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = content.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&content[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&content[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < content.len() {
        lines.push(&content[start..]);
    }
    lines
}

fn logical_lines(content: &str) -> Vec<LogicalLine> {
    let mut result = Vec::new();
    let mut current: Option<LogicalLine> = None;

    for (i, raw) in natural_lines(content).into_iter().enumerate() {
        let trimmed = raw.trim_start_matches(is_blank);

        let mut line = match current.take() {
            Some(mut line) => {
                line.text.push_str(trimmed);
                line
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                LogicalLine {
                    number: i + 1,
                    text: trimmed.to_string(),
                }
            }
        };

        let trailing_backslashes = line.text.chars().rev().take_while(|&c| c == '\\').count();
        if trailing_backslashes % 2 == 1 {
            line.text.pop();
            current = Some(line);
        } else {
            result.push(line);
        }
    }

    // A continuation at end of input still yields its line.
    if let Some(line) = current {
        result.push(line);
    }

    result
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut separator = None;

    for (i, c) in line.char_indices() {
        if c == '\\' {
            escaped = !escaped;
            continue;
        }
        if !escaped && (c == '=' || c == ':' || is_blank(c)) {
            key_end = i;
            separator = Some(c);
            break;
        }
        escaped = false;
    }

    let Some(separator) = separator else {
        return (line, "");
    };

    let mut rest = &line[key_end + separator.len_utf8()..];
    let mut has_separator = separator == '=' || separator == ':';
    loop {
        rest = rest.trim_start_matches(is_blank);
        match rest.chars().next() {
            Some(c @ ('=' | ':')) if !has_separator => {
                has_separator = true;
                rest = &rest[c.len_utf8()..];
            }
            _ => break,
        }
    }

    (&line[..key_end], rest)
}

fn unescape(raw: &str) -> Result<String> {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    // `\uXXXX` escapes are UTF-16 code units; a pair may encode one char.
    let mut units: Vec<u16> = Vec::new();

    while let Some(c) = chars.next() {
        if c == '\\' && chars.as_str().starts_with('u') {
            chars.next();
            units.push(unicode_escape(&mut chars)?);
            continue;
        }
        flush_utf16(&mut units, &mut result);

        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => result.push('\t'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('f') => result.push('\x0c'),
            Some(other) => result.push(other),
            None => {}
        }
    }
    flush_utf16(&mut units, &mut result);

    Ok(result)
}

/// The four hex digits after `\u`.
fn unicode_escape(chars: &mut std::str::Chars<'_>) -> Result<u16> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Malformed \\uxxxx encoding: \\u{}", hex);
    }
    u16::from_str_radix(&hex, 16)
        .with_context(|| format!("Malformed \\uxxxx encoding: \\u{}", hex))
}

/// Unpaired surrogates become U+FFFD.
fn flush_utf16(units: &mut Vec<u16>, result: &mut String) {
    result.extend(
        char::decode_utf16(units.drain(..)).map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}
