//! Scans a single key segment - bare or quoted - from the cursor. Leaves
//! escape decoding and quote-stripping to [`crate::key::canonicalize_key`];
//! this module only finds where the segment ends.

use crate::{error::TomlErrorKind, text::Cursor};

fn is_bare_key_byte(b: u8) -> bool {
	b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Scan one key segment starting at the cursor: a bare run of key bytes, or
/// a `'...'`/`"..."` quoted span. Returns the raw source text, quotes
/// included for quoted segments, and leaves the cursor just past it.
pub(crate) fn scan_key_segment<'a>(cursor: &mut Cursor<'a>) -> Result<&'a str, TomlErrorKind> {
	match cursor.current() {
		Some(q @ (b'\'' | b'"')) => {
			let start = cursor.pos();
			cursor.advance();
			loop {
				match cursor.current() {
					Some(b) if b == q => {
						cursor.advance();
						break;
					}
					Some(b'\n') | None => return Err(TomlErrorKind::InvalidStringDelimiter),
					_ => cursor.advance(),
				}
			}
			Ok(cursor.slice_from(start))
		}
		Some(b) if is_bare_key_byte(b) => {
			let start = cursor.pos();
			while matches!(cursor.current(), Some(b) if is_bare_key_byte(b)) {
				cursor.advance();
			}
			Ok(cursor.slice_from(start))
		}
		_ => Err(TomlErrorKind::InvalidKey),
	}
}

/// Scan a full `a.b.c`-style key path, stopping at (but not consuming) the
/// first unquoted byte in `terminators`. Returns the raw path text with
/// leading/trailing whitespace trimmed, for the caller to split with
/// [`crate::key::split_dotted_key`].
pub(crate) fn scan_key_path<'a>(
	cursor: &mut Cursor<'a>,
	terminators: &[u8],
) -> Result<&'a str, TomlErrorKind> {
	let start = cursor.pos();
	loop {
		match cursor.current() {
			Some(b'\'') | Some(b'"') => {
				scan_key_segment(cursor)?;
			}
			Some(b) if terminators.contains(&b) => break,
			Some(b'\n') | None => return Err(TomlErrorKind::ErrorEOF),
			_ => cursor.advance(),
		}
	}
	Ok(cursor.slice_from(start).trim_matches(|c: char| c == ' ' || c == '\t'))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scans_bare_segment() {
		let mut cursor = Cursor::new("abc =");
		assert_eq!(scan_key_segment(&mut cursor).unwrap(), "abc");
	}

	#[test]
	fn scans_quoted_segment() {
		let mut cursor = Cursor::new("\"a b\" =");
		assert_eq!(scan_key_segment(&mut cursor).unwrap(), "\"a b\"");
	}

	#[test]
	fn scans_dotted_path_up_to_equals() {
		let mut cursor = Cursor::new("a.\"b.c\".d = 1");
		let path = scan_key_path(&mut cursor, b"=").unwrap();
		assert_eq!(path, "a.\"b.c\".d");
	}

	#[test]
	fn scans_header_path_up_to_bracket() {
		let mut cursor = Cursor::new("a.b]");
		let path = scan_key_path(&mut cursor, b"]").unwrap();
		assert_eq!(path, "a.b");
	}
}
