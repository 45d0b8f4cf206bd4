//! Key utilities (spec.md §4.2): validating bare keys, decoding quoted
//! keys, and splitting a dotted key path while honoring quoted segments.

use crate::error::TomlErrorKind;

/// True for the bytes TOML allows unquoted in a bare key: letters, digits,
/// `-`, and `_`.
fn is_bare_key_byte(b: u8) -> bool {
	b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn all_bare_key_bytes(s: &str) -> bool {
	!s.is_empty() && s.bytes().all(is_bare_key_byte)
}

/// Trim ASCII space/tab from both ends (TOML never allows other whitespace
/// around a key).
fn trim_key_whitespace(s: &str) -> &str {
	s.trim_matches(|c: char| c == ' ' || c == '\t')
}

/// Canonicalize a single key segment (spec.md §4.2, §3 "Keys are stored in
/// canonical form"): the canonical form of a key is its decoded text with
/// quoting stripped, regardless of whether that text happens to be
/// bare-key-safe. Quoting is a source-level spelling choice, not part of
/// the key's identity - [`encode_key`] decides fresh whether a key needs
/// quoting when rendering it back out.
pub fn canonicalize_key(s: &str) -> Result<String, TomlErrorKind> {
	let s = trim_key_whitespace(s);
	let bytes = s.as_bytes();

	match bytes.first() {
		Some(b'\'') if bytes.len() >= 2 && bytes[bytes.len() - 1] == b'\'' => {
			Ok(s[1..s.len() - 1].to_string())
		}
		Some(b'"') if bytes.len() >= 2 && bytes[bytes.len() - 1] == b'"' => {
			decode_basic_key(&s[1..s.len() - 1])
		}
		_ if all_bare_key_bytes(s) => Ok(s.to_string()),
		_ => Err(TomlErrorKind::InvalidKey),
	}
}

/// Decode the basic-string escapes a quoted key is allowed to contain.
fn decode_basic_key(inner: &str) -> Result<String, TomlErrorKind> {
	let mut out = String::with_capacity(inner.len());
	let mut chars = inner.chars().peekable();

	while let Some(c) = chars.next() {
		if c != '\\' {
			out.push(c);
			continue;
		}
		match chars.next() {
			Some('b') => out.push('\u{0008}'),
			Some('t') => out.push('\t'),
			Some('n') => out.push('\n'),
			Some('f') => out.push('\u{000C}'),
			Some('r') => out.push('\r'),
			Some('"') => out.push('"'),
			Some('\\') => out.push('\\'),
			Some('u') => out.push(decode_unicode_escape(&mut chars, 4)?),
			Some('U') => out.push(decode_unicode_escape(&mut chars, 8)?),
			_ => return Err(TomlErrorKind::InvalidEscapeValue),
		}
	}

	Ok(out)
}

fn decode_unicode_escape(
	chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
	digits: usize,
) -> Result<char, TomlErrorKind> {
	let mut hex = String::with_capacity(digits);
	for _ in 0..digits {
		match chars.next() {
			Some(c) if c.is_ascii_hexdigit() => hex.push(c),
			_ => return Err(TomlErrorKind::InvalidUnicode),
		}
	}
	u32::from_str_radix(&hex, 16)
		.ok()
		.and_then(char::from_u32)
		.ok_or(TomlErrorKind::InvalidUnicode)
}

/// Render a canonical key for output: bare if it's safe to, otherwise a
/// quoted basic string with the minimal necessary escaping. The inverse of
/// [`canonicalize_key`].
pub(crate) fn encode_key(s: &str) -> String {
	if all_bare_key_bytes(s) {
		return s.to_string();
	}

	let mut out = String::with_capacity(s.len() + 2);
	out.push('"');
	for c in s.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\t' => out.push_str("\\t"),
			'\r' => out.push_str("\\r"),
			c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
			c => out.push(c),
		}
	}
	out.push('"');
	out
}

/// Split a dotted key path on `.`, treating `"..."`/`'...'` spans as opaque
/// (property P4). Each returned segment is trimmed of surrounding
/// space/tab but is otherwise unprocessed - callers canonicalize each part
/// themselves.
pub fn split_dotted_key(s: &str) -> Vec<&str> {
	let mut parts = Vec::with_capacity(5);
	let bytes = s.as_bytes();
	let mut start = 0usize;
	let mut i = 0usize;
	let mut quote: Option<u8> = None;

	while i < bytes.len() {
		let b = bytes[i];
		match quote {
			Some(q) if b == q => quote = None,
			Some(_) => {}
			None => match b {
				b'"' | b'\'' => quote = Some(b),
				b'.' => {
					parts.push(trim_key_whitespace(&s[start..i]));
					start = i + 1;
				}
				_ => {}
			},
		}
		i += 1;
	}
	parts.push(trim_key_whitespace(&s[start..]));

	parts
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_plain_dotted_keys() {
		assert_eq!(split_dotted_key("a.b.c"), vec!["a", "b", "c"]);
	}

	#[test]
	fn keeps_quoted_segments_whole() {
		assert_eq!(split_dotted_key(r#"a."b.c".d"#), vec!["a", "\"b.c\"", "d"]);
	}

	#[test]
	fn canonicalize_strips_redundant_quotes() {
		assert_eq!(canonicalize_key("\"abc\"").unwrap(), "abc");
		assert_eq!(canonicalize_key("'abc'").unwrap(), "abc");
	}

	#[test]
	fn canonicalize_strips_quotes_even_when_not_bare_safe() {
		assert_eq!(canonicalize_key("\"a b\"").unwrap(), "a b");
		assert_eq!(canonicalize_key("\"\"").unwrap(), "");
		assert_eq!(canonicalize_key("\"child.dotted\"").unwrap(), "child.dotted");
	}

	#[test]
	fn canonicalize_decodes_basic_string_escapes() {
		assert_eq!(canonicalize_key(r#""a\tb""#).unwrap(), "a\tb");
	}

	#[test]
	fn canonicalize_is_idempotent_for_bare_safe_keys() {
		for key in ["abc", "\"abc\"", "'abc'"] {
			let once = canonicalize_key(key).unwrap();
			let twice = canonicalize_key(&once).unwrap();
			assert_eq!(once, twice);
			assert_eq!(once, "abc");
		}
	}

	#[test]
	fn encode_key_quotes_only_when_needed() {
		assert_eq!(encode_key("abc"), "abc");
		assert_eq!(encode_key("a b"), "\"a b\"");
		assert_eq!(encode_key(""), "\"\"");
	}

	#[test]
	fn canonicalize_rejects_invalid_bare_key() {
		assert_eq!(canonicalize_key("a b").unwrap_err(), TomlErrorKind::InvalidKey);
		assert_eq!(canonicalize_key("").unwrap_err(), TomlErrorKind::InvalidKey);
	}
}
