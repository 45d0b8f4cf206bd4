#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

mod json;
mod key;
mod parser;
mod scalar;
pub mod table;
mod text;
mod toml_encode;
pub mod value;

pub mod error;

use crate::text::Cursor;
pub use crate::{
	error::{DocumentError, ErrorContext, TomlError, TomlErrorKind},
	table::{Origin, Table, TableKind},
	value::{Date, DateTime, Time, Value, ValueType},
};

/// Commonly used items, re-exported for a single import line.
pub mod prelude {
	pub use crate::{
		error::{DocumentError, ErrorContext, TomlError, TomlErrorKind},
		table::{Origin, Table, TableKind},
		value::{Date, DateTime, Time, Value, ValueType},
		Document,
	};
}

/// A fully parsed TOML document.
#[derive(Debug, PartialEq, Clone)]
pub struct Document {
	root: Table,
}

impl Document {
	/// Parse `source` as a TOML 1.0.0 document.
	pub fn parse(source: &str) -> Result<Self, TomlError> {
		let mut cursor = Cursor::new(source);
		parser::parse_document(&mut cursor)
			.map(|root| Self { root })
			.map_err(|kind| {
				let byte_index = cursor.pos();
				let line_number = cursor.line_number_at(byte_index);
				TomlError::new(kind, byte_index, line_number)
			})
	}

	/// Read the file at `path` and parse its contents as TOML.
	pub fn parse_file(path: impl AsRef<std::path::Path>) -> Result<Self, DocumentError> {
		let source = std::fs::read_to_string(path).map_err(DocumentError::Io)?;
		Self::parse(&source).map_err(DocumentError::Parse)
	}

	/// The document's root table.
	pub fn root(&self) -> &Table {
		&self.root
	}

	/// Render this document as plain JSON.
	pub fn to_json(&self) -> String {
		json::to_json(&self.root, false)
	}

	/// Render this document as typed JSON, wrapping every scalar as
	/// `{"type": ..., "value": ...}` per the toml-lang conformance test
	/// harness schema.
	pub fn to_json_typed(&self) -> String {
		json::to_json(&self.root, true)
	}

	/// Render this document back out as TOML source.
	pub fn to_toml(&self) -> String {
		toml_encode::to_toml(&self.root)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_and_reports_root() {
		let doc = Document::parse("a = 1\n[b]\nc = 2\n").unwrap();
		assert_eq!(doc.root().get("a"), Some(&Value::Integer(1)));
		let b = doc.root().get("b").unwrap().as_table().unwrap();
		assert_eq!(b.get("c"), Some(&Value::Integer(2)));
	}

	#[test]
	fn error_reports_line_number() {
		let err = Document::parse("a = 1\nb = \n").unwrap_err();
		assert_eq!(err.context.line_number, 2);
	}

	#[test]
	fn round_trips_through_toml_and_json() {
		let doc = Document::parse("[server]\nhost = \"localhost\"\nport = 8080\n").unwrap();
		assert_eq!(doc.to_toml(), "[server]\nhost = \"localhost\"\nport = 8080\n");
		assert_eq!(doc.to_json(), r#"{"server":{"host":"localhost","port":8080}}"#);
	}

	#[test]
	fn parse_file_reads_and_parses() {
		let dir = std::env::temp_dir();
		let path = dir.join("tomldoc_parse_file_test.toml");
		std::fs::write(&path, "x = 1\n").unwrap();

		let doc = Document::parse_file(&path).unwrap();
		assert_eq!(doc.root().get("x"), Some(&Value::Integer(1)));

		let _ = std::fs::remove_file(&path);
	}
}
