//! Top-level statement dispatch (spec.md §4.4): headers, array-of-tables
//! headers, and key/value lines, each delegating key and value scanning to
//! [`key`]/[`value`]/[`string`] and table placement to [`crate::table`].
//!
//! Parser rules, same as every submodule here: each function only consumes
//! the bytes it is responsible for, leaves the cursor at the first byte it
//! didn't consume, and never looks past what it needs to decide.

pub(crate) mod key;
pub(crate) mod string;
pub(crate) mod value;

use crate::{
	error::TomlErrorKind,
	table::{Origin, Table, TableKind},
	text::Cursor,
	value::Value,
};

/// Parse a full document's statements into a fresh root table.
pub(crate) fn parse_document(cursor: &mut Cursor<'_>) -> Result<Table, TomlErrorKind> {
	let mut root = Table::new(TableKind::Root, Origin::Explicit);
	let mut current_path: Vec<String> = Vec::new();

	loop {
		skip_statement_whitespace(cursor);
		match cursor.current() {
			None => break,
			Some(b'[') if cursor.peek(1) == Some(b'[') => {
				current_path = parse_array_table_header(cursor, &mut root)?;
			}
			Some(b'[') => {
				current_path = parse_table_header(cursor, &mut root)?;
			}
			Some(_) => parse_key_value_line(cursor, &mut root, &current_path)?,
		}
		end_of_line(cursor)?;
	}

	Ok(root)
}

/// Advance past blank lines, horizontal whitespace, and full-line comments
/// between statements.
fn skip_statement_whitespace(cursor: &mut Cursor<'_>) {
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

/// After a statement's value, only horizontal whitespace, an optional
/// comment, and a newline (or EOF) are legal.
fn end_of_line(cursor: &mut Cursor<'_>) -> Result<(), TomlErrorKind> {
	cursor.skip_horizontal_whitespace();
	if cursor.current() == Some(b'#') {
		cursor.skip_comment();
	}
	match cursor.current() {
		None => Ok(()),
		Some(b'\n') | Some(b'\r') => {
			cursor.eat_newline();
			Ok(())
		}
		Some(_) => Err(TomlErrorKind::InvalidChar),
	}
}

fn parse_table_header(
	cursor: &mut Cursor<'_>,
	root: &mut Table,
) -> Result<Vec<String>, TomlErrorKind> {
	cursor.advance(); // '['
	cursor.skip_horizontal_whitespace();
	let path_text = key::scan_key_path(cursor, b"]")?;
	let parts = value::canonicalize_path(path_text)?;
	cursor.skip_horizontal_whitespace();
	if !cursor.eat(b']') {
		return Err(TomlErrorKind::InvalidTableHeader);
	}

	root.create_table(&parts, TableKind::Header)?;
	Ok(parts)
}

fn parse_array_table_header(
	cursor: &mut Cursor<'_>,
	root: &mut Table,
) -> Result<Vec<String>, TomlErrorKind> {
	cursor.advance_n(2); // '[['
	cursor.skip_horizontal_whitespace();
	let path_text = key::scan_key_path(cursor, b"]")?;
	let parts = value::canonicalize_path(path_text)?;
	cursor.skip_horizontal_whitespace();
	let closed_first = cursor.eat(b']');
	let closed_second = cursor.eat(b']');
	if !closed_first || !closed_second {
		return Err(TomlErrorKind::InvalidTableArrayHeader);
	}

	let array = root.get_or_create_array(&parts)?;
	array.push(Value::Table(Table::new(TableKind::ArrayElement, Origin::Explicit)));
	Ok(parts)
}

fn parse_key_value_line(
	cursor: &mut Cursor<'_>,
	root: &mut Table,
	current_path: &[String],
) -> Result<(), TomlErrorKind> {
	let path_text = key::scan_key_path(cursor, b"=")?;
	let parts = value::canonicalize_path(path_text)?;

	cursor.skip_horizontal_whitespace();
	if !cursor.eat(b'=') {
		return Err(TomlErrorKind::InvalidKeyValuePair);
	}
	cursor.skip_horizontal_whitespace();
	if matches!(cursor.current(), None | Some(b'\n')) {
		return Err(TomlErrorKind::InvalidKeyValuePair);
	}

	let val = value::parse_value(cursor)?;

	let table = if current_path.is_empty() {
		&mut *root
	} else {
		root.navigate_mut(current_path)?
	};
	table.add_key_value(&parts, val)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(src: &str) -> Table {
		let mut cursor = Cursor::new(src);
		parse_document(&mut cursor).unwrap()
	}

	#[test]
	fn simple_document() {
		let root = parse("a = 1\nb = \"two\"\n");
		assert_eq!(root.get("a"), Some(&Value::Integer(1)));
		assert_eq!(root.get("b"), Some(&Value::String("two".into())));
	}

	#[test]
	fn header_then_keys() {
		let root = parse("[server]\nhost = \"localhost\"\nport = 8080\n");
		let server = root.get("server").unwrap().as_table().unwrap();
		assert_eq!(server.get("host"), Some(&Value::String("localhost".into())));
		assert_eq!(server.get("port"), Some(&Value::Integer(8080)));
	}

	#[test]
	fn nested_headers() {
		let root = parse("[a.b]\nx = 1\n[a.c]\ny = 2\n");
		let a = root.get("a").unwrap().as_table().unwrap();
		assert_eq!(a.get("b").unwrap().as_table().unwrap().get("x"), Some(&Value::Integer(1)));
		assert_eq!(a.get("c").unwrap().as_table().unwrap().get("y"), Some(&Value::Integer(2)));
	}

	#[test]
	fn array_of_tables() {
		let root = parse("[[fruit]]\nname = \"apple\"\n[[fruit]]\nname = \"banana\"\n");
		let fruits = root.get("fruit").unwrap().as_array().unwrap();
		assert_eq!(fruits.len(), 2);
		assert_eq!(
			fruits[0].as_table().unwrap().get("name"),
			Some(&Value::String("apple".into()))
		);
		assert_eq!(
			fruits[1].as_table().unwrap().get("name"),
			Some(&Value::String("banana".into()))
		);
	}

	#[test]
	fn nested_array_of_tables() {
		let root = parse("[[fruit]]\nname = \"apple\"\n[[fruit.variety]]\nname = \"red\"\n");
		let fruits = root.get("fruit").unwrap().as_array().unwrap();
		let variety = fruits[0]
			.as_table()
			.unwrap()
			.get("variety")
			.unwrap()
			.as_array()
			.unwrap();
		assert_eq!(
			variety[0].as_table().unwrap().get("name"),
			Some(&Value::String("red".into()))
		);
	}

	#[test]
	fn comments_and_blank_lines_are_ignored() {
		let root = parse("# top comment\n\na = 1 # trailing\n\n");
		assert_eq!(root.get("a"), Some(&Value::Integer(1)));
	}

	#[test]
	fn redefined_header_is_an_error() {
		let mut cursor = Cursor::new("[a]\nx = 1\n[a]\ny = 2\n");
		let err = parse_document(&mut cursor).unwrap_err();
		assert_eq!(err, TomlErrorKind::TableRedefinition);
	}

	#[test]
	fn garbage_after_value_is_an_error() {
		let mut cursor = Cursor::new("a = 1 2\n");
		assert!(parse_document(&mut cursor).is_err());
	}
}
