//! Scans all six TOML string flavors: basic/literal, each single- or
//! multi-line. By the time a string leaves this module its quoting and
//! escapes are fully resolved into an owned [`String`].

use crate::{error::TomlErrorKind, text::Cursor};

/// TOML allows tab as the only control character inside a string (plus
/// carriage return, only as half of a `\r\n` line ending); everything else in
/// `0x00..=0x08`, `0x0B..=0x1F`, `0x7F` must be escaped, and literal strings
/// have no escapes to do it with.
fn is_disallowed_control(b: u8) -> bool {
	matches!(b, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F)
}

/// Scan whichever string flavor starts at the cursor.
pub(crate) fn parse_string(cursor: &mut Cursor<'_>) -> Result<String, TomlErrorKind> {
	match cursor.current() {
		Some(b'\'') => {
			if cursor.starts_with("'''") {
				parse_multiline_literal(cursor)
			} else {
				parse_single_line_literal(cursor)
			}
		}
		Some(b'"') => {
			if cursor.starts_with("\"\"\"") {
				parse_multiline_basic(cursor)
			} else {
				parse_single_line_basic(cursor)
			}
		}
		_ => Err(TomlErrorKind::InvalidValue),
	}
}

fn parse_single_line_literal(cursor: &mut Cursor<'_>) -> Result<String, TomlErrorKind> {
	cursor.advance();
	let start = cursor.pos();
	loop {
		match cursor.current() {
			Some(b'\'') => {
				let content = cursor.slice_from(start).to_string();
				cursor.advance();
				return Ok(content);
			}
			Some(b'\n') => return Err(TomlErrorKind::InvalidChar),
			None => return Err(TomlErrorKind::InvalidStringDelimiter),
			Some(b) if is_disallowed_control(b) => return Err(TomlErrorKind::InvalidChar),
			_ => cursor.advance(),
		}
	}
}

fn parse_multiline_literal(cursor: &mut Cursor<'_>) -> Result<String, TomlErrorKind> {
	cursor.advance_n(3);
	cursor.eat_newline();
	let start = cursor.pos();
	loop {
		match cursor.current() {
			Some(b'\'') if cursor.starts_with("'''") => {
				let content = cursor.slice_from(start).to_string();
				cursor.advance_n(3);
				if cursor.current() == Some(b'\'') {
					return Err(TomlErrorKind::InvalidStringDelimiter);
				}
				return Ok(content);
			}
			None => return Err(TomlErrorKind::InvalidStringDelimiter),
			Some(b) if is_disallowed_control(b) => return Err(TomlErrorKind::InvalidChar),
			_ => cursor.advance(),
		}
	}
}

fn parse_single_line_basic(cursor: &mut Cursor<'_>) -> Result<String, TomlErrorKind> {
	cursor.advance();
	let mut out = String::new();
	loop {
		match cursor.current() {
			Some(b'"') => {
				cursor.advance();
				return Ok(out);
			}
			Some(b'\\') => push_escape(cursor, &mut out, false)?,
			Some(b'\n') => return Err(TomlErrorKind::InvalidChar),
			None => return Err(TomlErrorKind::InvalidStringDelimiter),
			Some(b) if is_disallowed_control(b) => return Err(TomlErrorKind::InvalidChar),
			Some(_) => push_raw_char(cursor, &mut out),
		}
	}
}

fn parse_multiline_basic(cursor: &mut Cursor<'_>) -> Result<String, TomlErrorKind> {
	cursor.advance_n(3);
	cursor.eat_newline();
	let mut out = String::new();
	loop {
		match cursor.current() {
			Some(b'"') if cursor.starts_with("\"\"\"") => {
				cursor.advance_n(3);
				if cursor.current() == Some(b'"') {
					return Err(TomlErrorKind::InvalidStringDelimiter);
				}
				return Ok(out);
			}
			Some(b'\\') => push_escape(cursor, &mut out, true)?,
			None => return Err(TomlErrorKind::InvalidStringDelimiter),
			Some(b) if is_disallowed_control(b) => return Err(TomlErrorKind::InvalidChar),
			Some(_) => push_raw_char(cursor, &mut out),
		}
	}
}

/// Advance past one (possibly multi-byte) UTF-8 character and push it.
fn push_raw_char(cursor: &mut Cursor<'_>, out: &mut String) {
	let start = cursor.pos();
	let first = cursor.current().unwrap();
	let len = utf8_len(first);
	cursor.advance_n(len);
	out.push_str(cursor.slice(start, cursor.pos()));
}

fn utf8_len(first_byte: u8) -> usize {
	if first_byte & 0x80 == 0 {
		1
	} else if first_byte & 0xE0 == 0xC0 {
		2
	} else if first_byte & 0xF0 == 0xE0 {
		3
	} else {
		4
	}
}

fn push_escape(
	cursor: &mut Cursor<'_>,
	out: &mut String,
	multiline: bool,
) -> Result<(), TomlErrorKind> {
	debug_assert_eq!(cursor.current(), Some(b'\\'));
	cursor.advance();

	match cursor.current() {
		Some(b'b') => {
			cursor.advance();
			out.push('\u{0008}');
		}
		Some(b't') => {
			cursor.advance();
			out.push('\t');
		}
		Some(b'n') => {
			cursor.advance();
			out.push('\n');
		}
		Some(b'f') => {
			cursor.advance();
			out.push('\u{000C}');
		}
		Some(b'r') => {
			cursor.advance();
			out.push('\r');
		}
		Some(b'"') => {
			cursor.advance();
			out.push('"');
		}
		Some(b'\\') => {
			cursor.advance();
			out.push('\\');
		}
		Some(b'u') => {
			cursor.advance();
			out.push(parse_unicode_escape(cursor, 4)?);
		}
		Some(b'U') => {
			cursor.advance();
			out.push(parse_unicode_escape(cursor, 8)?);
		}
		// Line-ending backslash: only legal in multi-line strings, eats the
		// newline and all following whitespace.
		Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') if multiline => {
			cursor.skip_horizontal_whitespace();
			if !cursor.eat_newline() {
				return Err(TomlErrorKind::InvalidEscapeValue);
			}
			loop {
				cursor.skip_horizontal_whitespace();
				if !cursor.eat_newline() {
					break;
				}
			}
		}
		_ => return Err(TomlErrorKind::InvalidEscapeValue),
	}

	Ok(())
}

fn parse_unicode_escape(cursor: &mut Cursor<'_>, digits: usize) -> Result<char, TomlErrorKind> {
	let start = cursor.pos();
	for _ in 0..digits {
		match cursor.current() {
			Some(b) if b.is_ascii_hexdigit() => cursor.advance(),
			_ => return Err(TomlErrorKind::InvalidUnicode),
		}
	}
	let hex = cursor.slice(start, cursor.pos());
	u32::from_str_radix(hex, 16)
		.ok()
		.and_then(char::from_u32)
		.ok_or(TomlErrorKind::InvalidUnicode)
}
