//! Value dispatch: strings delegate to [`crate::parser::string`], arrays and
//! inline tables recurse into this module, and everything else falls
//! through to the scalar interpreters in [`crate::scalar`].

use crate::{
	error::TomlErrorKind,
	key::{canonicalize_key, split_dotted_key},
	parser::{key::scan_key_path, string},
	scalar,
	table::{Origin, Table, TableKind},
	text::Cursor,
	value::Value,
};

/// Parse whichever value starts at the cursor.
pub(crate) fn parse_value(cursor: &mut Cursor<'_>) -> Result<Value, TomlErrorKind> {
	match cursor.current() {
		Some(b'\'') | Some(b'"') => string::parse_string(cursor).map(Value::String),
		Some(b'[') => parse_array(cursor),
		Some(b'{') => parse_inline_table(cursor),
		Some(_) => parse_scalar_token(cursor),
		None => Err(TomlErrorKind::ErrorEOF),
	}
}

fn parse_array(cursor: &mut Cursor<'_>) -> Result<Value, TomlErrorKind> {
	cursor.advance();
	let mut elements = Vec::new();
	let mut expect_value = true;

	loop {
		skip_array_whitespace(cursor);
		match cursor.current() {
			Some(b']') => {
				cursor.advance();
				return Ok(Value::Array(elements));
			}
			Some(b',') => {
				if expect_value {
					return Err(TomlErrorKind::InvalidValue);
				}
				cursor.advance();
				expect_value = true;
			}
			None => return Err(TomlErrorKind::ErrorEOF),
			Some(_) if !expect_value => return Err(TomlErrorKind::TrailingComma),
			Some(_) => {
				elements.push(parse_value(cursor)?);
				expect_value = false;
			}
		}
	}
}

/// Inside an array, whitespace, newlines, and `#` comments are all
/// insignificant (unlike top-level statements).
fn skip_array_whitespace(cursor: &mut Cursor<'_>) {
	loop {
		cursor.skip_horizontal_whitespace();
		if cursor.eat_newline() {
			continue;
		}
		if cursor.current() == Some(b'#') {
			cursor.skip_comment();
			continue;
		}
		break;
	}
}

fn parse_inline_table(cursor: &mut Cursor<'_>) -> Result<Value, TomlErrorKind> {
	cursor.advance();
	let mut table = Table::new(TableKind::Inline, Origin::Explicit);

	cursor.skip_horizontal_whitespace();
	if cursor.current() == Some(b'}') {
		cursor.advance();
		return Ok(Value::Table(table));
	}

	loop {
		cursor.skip_horizontal_whitespace();
		let path_text = scan_key_path(cursor, b"=")?;
		let parts = canonicalize_path(path_text)?;

		cursor.skip_horizontal_whitespace();
		if cursor.current() != Some(b'=') {
			return Err(TomlErrorKind::InvalidKeyValuePair);
		}
		cursor.advance();
		cursor.skip_horizontal_whitespace();

		let value = parse_value(cursor)?;
		table.add_key_value(&parts, value)?;

		cursor.skip_horizontal_whitespace();
		match cursor.current() {
			Some(b'}') => {
				cursor.advance();
				return Ok(Value::Table(table));
			}
			Some(b',') => {
				cursor.advance();
				cursor.skip_horizontal_whitespace();
				if cursor.current() == Some(b'}') {
					return Err(TomlErrorKind::TrailingComma);
				}
			}
			Some(b'\n') | None => return Err(TomlErrorKind::InlineDefinition),
			Some(_) => return Err(TomlErrorKind::InvalidChar),
		}
	}
}

pub(crate) fn canonicalize_path(path_text: &str) -> Result<Vec<String>, TomlErrorKind> {
	split_dotted_key(path_text)
		.into_iter()
		.map(canonicalize_key)
		.collect()
}

/// Scan a bare token (int/float/bool/date/time/datetime) up to the next
/// structural delimiter and run it through the scalar interpreters.
fn parse_scalar_token(cursor: &mut Cursor<'_>) -> Result<Value, TomlErrorKind> {
	let start = cursor.pos();
	loop {
		match cursor.current() {
			None => break,
			Some(b',') | Some(b']') | Some(b'}') | Some(b'\n') | Some(b'#') => break,
			Some(b' ') | Some(b'\t') | Some(b'\r') => {
				// A space can separate a date from its time in a datetime
				// literal; keep scanning if the next non-space byte looks
				// like a time continuation, otherwise stop here.
				let save = cursor.pos();
				cursor.advance();
				cursor.skip_horizontal_whitespace();
				let looks_like_time_tail = cursor
					.current()
					.map(|b| b.is_ascii_digit())
					.unwrap_or(false)
					&& is_plausible_time_lookahead(cursor);
				if !looks_like_time_tail {
					cursor.set_pos(save);
					break;
				}
			}
			Some(_) => cursor.advance(),
		}
	}
	let token = cursor
		.slice_from(start)
		.trim_end_matches(|c: char| c == ' ' || c == '\t');
	cursor.set_pos(start + token.len());

	match scalar::parse_scalar(token) {
		Some(Ok(value)) => Ok(value),
		Some(Err(kind)) => Err(kind),
		None => Err(TomlErrorKind::InvalidValue),
	}
}

fn is_plausible_time_lookahead(cursor: &Cursor<'_>) -> bool {
	cursor.peek(2) == Some(b':')
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_integer_token() {
		let mut cursor = Cursor::new("42,");
		assert_eq!(parse_value(&mut cursor).unwrap(), Value::Integer(42));
	}

	#[test]
	fn parses_array_of_mixed_whitespace() {
		let mut cursor = Cursor::new("[1, 2,\n  3,\n]");
		let value = parse_value(&mut cursor).unwrap();
		assert_eq!(
			value,
			Value::Array(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)])
		);
	}

	#[test]
	fn rejects_array_leading_comma() {
		let mut cursor = Cursor::new("[, 1]");
		assert!(parse_value(&mut cursor).is_err());
	}

	#[test]
	fn parses_inline_table() {
		let mut cursor = Cursor::new(r#"{ x = 1, y = "a" }"#);
		let value = parse_value(&mut cursor).unwrap();
		let table = value.as_table().unwrap();
		assert_eq!(table.get("x"), Some(&Value::Integer(1)));
		assert_eq!(table.get("y"), Some(&Value::String("a".into())));
	}

	#[test]
	fn rejects_inline_table_trailing_comma() {
		let mut cursor = Cursor::new("{ x = 1, }");
		assert_eq!(
			parse_value(&mut cursor).unwrap_err(),
			TomlErrorKind::TrailingComma
		);
	}

	#[test]
	fn parses_datetime_with_space_separator() {
		let mut cursor = Cursor::new("1979-05-27 07:32:00Z\n");
		let value = parse_value(&mut cursor).unwrap();
		assert!(matches!(value, Value::DateTime(_)));
	}
}
