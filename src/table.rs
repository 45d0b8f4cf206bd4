//! The table model (spec.md §4.3): an ordered key/value map carrying the
//! `kind`/`origin` metadata that decides whether a header or dotted key is
//! legal, plus the navigation operations that enforce TOML's nesting rules.

use std::collections::HashMap;

use crate::{error::TomlErrorKind, key::canonicalize_key, value::Value};

/// What introduced a table.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TableKind {
	/// The document's single root table.
	Root,
	/// Named by a `[table]` header.
	Header,
	/// One element of an array of tables, introduced by `[[table]]`.
	ArrayElement,
	/// An `{ ... }` value, sealed the instant its closing brace is parsed.
	Inline,
	/// An intermediate or terminal table created by a `a.b = value` dotted
	/// key.
	Dotted,
}

/// Whether a table was named outright or only came into being as a path
/// step on the way to naming something else.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Origin {
	/// Brought into existence only as an intermediate step; may still be
	/// promoted to `Explicit` later (I1).
	Implicit,
	/// Named directly by a `[header]`, `[[header]]`, or the terminal of a
	/// `key.path = value` line.
	Explicit,
}

/// An ordered key/value map with the metadata needed to reproduce TOML's
/// table-kind distinctions on the way back out.
#[derive(Debug, PartialEq, Clone)]
pub struct Table {
	kind: TableKind,
	origin: Origin,
	entries: Vec<(String, Value)>,
	index: HashMap<String, usize>,
}

impl Table {
	pub(crate) fn new(kind: TableKind, origin: Origin) -> Self {
		Self {
			kind,
			origin,
			entries: Vec::new(),
			index: HashMap::new(),
		}
	}

	/// What introduced this table.
	pub fn kind(&self) -> TableKind {
		self.kind
	}
	/// Whether this table has been explicitly named.
	pub fn origin(&self) -> Origin {
		self.origin
	}
	/// Number of direct keys in this table.
	pub fn len(&self) -> usize {
		self.entries.len()
	}
	/// True if this table has no keys.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate over `(key, value)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Canonicalize `key` and look it up in this table only (no descent).
	pub fn get(&self, key: &str) -> Option<&Value> {
		let canonical = canonicalize_key(key).ok()?;
		self.get_canonical(&canonical)
	}

	fn get_canonical(&self, canonical: &str) -> Option<&Value> {
		self.index.get(canonical).map(|&i| &self.entries[i].1)
	}
	/// Insert `(key, value)` following the ordering discipline: header-kind
	/// tables and array-of-tables are appended at the tail; everything else
	/// is inserted immediately before the first header/array-of-tables
	/// sibling, so scalar assignments print before child headers (spec.md
	/// §4.3 put_ordered, §4.6).
	fn put_ordered(&mut self, key: String, value: Value) {
		if is_header_shaped(&value) {
			self.index.insert(key.clone(), self.entries.len());
			self.entries.push((key, value));
			return;
		}

		let insert_at = self
			.entries
			.iter()
			.position(|(_, v)| is_header_shaped(v))
			.unwrap_or(self.entries.len());

		self.entries.insert(insert_at, (key, value));
		self.reindex_from(insert_at);
	}

	fn reindex_from(&mut self, start: usize) {
		for i in start..self.entries.len() {
			self.index.insert(self.entries[i].0.clone(), i);
		}
	}

	/// Walk `parts` from this table, creating missing `Header`/`Implicit`
	/// intermediates, descending into the last element of any array of
	/// tables encountered. Used by `create_table`/`get_or_create_array` for
	/// the path up to (but not including) their terminal.
	fn descend_header_path(&mut self, parts: &[String]) -> Result<&mut Table, TomlErrorKind> {
		let mut current = self;
		for part in parts {
			let existing_idx = current.index.get(part).copied();
			current = match existing_idx {
				None => {
					current.put_ordered(
						part.clone(),
						Value::Table(Table::new(TableKind::Header, Origin::Implicit)),
					);
					let idx = current.index[part];
					match &mut current.entries[idx].1 {
						Value::Table(t) => t,
						_ => unreachable!(),
					}
				}
				Some(idx) => match &mut current.entries[idx].1 {
					Value::Table(t) if t.kind == TableKind::Inline => {
						return Err(TomlErrorKind::ImmutableInlineTable)
					}
					Value::Table(t) => t,
					Value::Array(arr) => last_array_element_table(arr)?,
					_ => return Err(TomlErrorKind::ExpectedTable),
				},
			};
		}
		Ok(current)
	}

	/// `create_table(path, kind)` (spec.md §4.3). Called by the parser for
	/// both `[header]` and `[[array]]`'s fresh-element bookkeeping.
	pub(crate) fn create_table(
		&mut self,
		parts: &[String],
		kind: TableKind,
	) -> Result<&mut Table, TomlErrorKind> {
		if parts.is_empty() {
			return Err(TomlErrorKind::InvalidTableHeader);
		}
		let (terminal, intermediate) = parts.split_last().unwrap();
		let parent = self.descend_header_path(intermediate)?;

		match parent.index.get(terminal).copied() {
			None => {
				parent.put_ordered(terminal.clone(), Value::Table(Table::new(kind, Origin::Explicit)));
				let idx = parent.index[terminal];
				match &mut parent.entries[idx].1 {
					Value::Table(t) => Ok(t),
					_ => unreachable!(),
				}
			}
			Some(idx) => match &mut parent.entries[idx].1 {
				Value::Table(t) if t.kind == TableKind::Inline => {
					Err(TomlErrorKind::ImmutableInlineTable)
				}
				Value::Table(t) if t.origin == Origin::Explicit => {
					Err(TomlErrorKind::TableRedefinition)
				}
				Value::Table(t) => {
					t.kind = kind;
					t.origin = Origin::Explicit;
					Ok(t)
				}
				_ => Err(TomlErrorKind::ExpectedTable),
			},
		}
	}

	/// `get_or_create_array(path)` (spec.md §4.3). Returns the array a
	/// `[[path]]` header should append a fresh element to.
	pub(crate) fn get_or_create_array(
		&mut self,
		parts: &[String],
	) -> Result<&mut Vec<Value>, TomlErrorKind> {
		if parts.is_empty() {
			return Err(TomlErrorKind::InvalidTableArrayHeader);
		}
		let (terminal, intermediate) = parts.split_last().unwrap();
		let parent = self.descend_header_path(intermediate)?;

		match parent.index.get(terminal).copied() {
			None => {
				parent.put_ordered(terminal.clone(), Value::Array(Vec::new()));
				let idx = parent.index[terminal];
				match &mut parent.entries[idx].1 {
					Value::Array(a) => Ok(a),
					_ => unreachable!(),
				}
			}
			Some(idx) => match &mut parent.entries[idx].1 {
				Value::Array(a) if is_array_of_tables_or_empty(a) => Ok(a),
				_ => Err(TomlErrorKind::ExpectedArrayOfTables),
			},
		}
	}

	/// Navigate to an existing table along `parts` without creating
	/// anything, stepping into the last element of any array of tables
	/// encountered along the way. Used by the parser to re-acquire the
	/// "current table" named by the most recent `[header]`/`[[array]]`
	/// before adding each key/value line that follows it.
	pub(crate) fn navigate_mut(&mut self, parts: &[String]) -> Result<&mut Table, TomlErrorKind> {
		let mut current = self;
		for part in parts {
			let idx = current
				.index
				.get(part)
				.copied()
				.ok_or(TomlErrorKind::ExpectedTable)?;
			current = match &mut current.entries[idx].1 {
				Value::Table(t) => t,
				Value::Array(arr) => last_array_element_table(arr)?,
				_ => return Err(TomlErrorKind::ExpectedTable),
			};
		}
		Ok(current)
	}

	/// `add_key_value(parts, value)` (spec.md §4.3). Materializes the path
	/// up to the penultimate part as `Dotted` tables and places `value` at
	/// the final part.
	pub(crate) fn add_key_value(
		&mut self,
		parts: &[String],
		value: Value,
	) -> Result<(), TomlErrorKind> {
		if parts.is_empty() {
			return Err(TomlErrorKind::InvalidKeyValuePair);
		}
		let (terminal, intermediate) = parts.split_last().unwrap();

		let mut current = self;
		for part in intermediate {
			let existing_idx = current.index.get(part).copied();
			current = match existing_idx {
				None => {
					current.put_ordered(
						part.clone(),
						Value::Table(Table::new(TableKind::Dotted, Origin::Implicit)),
					);
					let idx = current.index[part];
					match &mut current.entries[idx].1 {
						Value::Table(t) => t,
						_ => unreachable!(),
					}
				}
				Some(idx) => match &mut current.entries[idx].1 {
					Value::Table(t) if t.kind == TableKind::Inline => {
						return Err(TomlErrorKind::ImmutableInlineTable)
					}
					Value::Table(t)
						if matches!(t.kind, TableKind::Header | TableKind::ArrayElement)
							&& t.origin == Origin::Explicit =>
					{
						return Err(TomlErrorKind::TableRedefinition)
					}
					Value::Table(t) => t,
					_ => return Err(TomlErrorKind::DuplicateKeyValuePair),
				},
			};
		}

		match current.index.get(terminal).copied() {
			None => {
				current.put_ordered(terminal.clone(), value);
			}
			Some(idx) => {
				return match &current.entries[idx].1 {
					Value::Table(t) if t.origin == Origin::Explicit => {
						Err(TomlErrorKind::TableRedefinition)
					}
					Value::Table(_) => Err(TomlErrorKind::KeyValueRedefinition),
					_ => Err(TomlErrorKind::DuplicateKeyValuePair),
				};
			}
		}

		if current.kind != TableKind::Root {
			current.origin = Origin::Explicit;
		}
		Ok(())
	}
}

fn last_array_element_table(arr: &mut [Value]) -> Result<&mut Table, TomlErrorKind> {
	match arr.last_mut() {
		Some(Value::Table(t)) if t.kind == TableKind::ArrayElement => Ok(t),
		_ => Err(TomlErrorKind::ExpectedArrayOfTables),
	}
}

fn is_array_of_tables_or_empty(arr: &[Value]) -> bool {
	arr.is_empty()
		|| matches!(arr.first(), Some(Value::Table(t)) if t.kind == TableKind::ArrayElement)
}

/// True if `value` should print as a `[header]`/`[[header]]` section rather
/// than an inline assignment - used by both the insertion ordering above and
/// the TOML encoder to decide what to defer until after a table's plain
/// assignments.
pub(crate) fn is_header_shaped(value: &Value) -> bool {
	match value {
		Value::Table(t) => t.kind == TableKind::Header || t.kind == TableKind::ArrayElement,
		Value::Array(_) => value.is_array_of_tables(),
		_ => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(s: &str) -> String {
		s.to_string()
	}

	#[test]
	fn simple_key_value() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		root.add_key_value(&[key("a")], Value::Integer(1)).unwrap();
		assert_eq!(root.get("a"), Some(&Value::Integer(1)));
	}

	#[test]
	fn dotted_keys_share_implicit_table() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		root.add_key_value(&[key("a"), key("b"), key("c")], Value::Integer(1))
			.unwrap();
		root.add_key_value(&[key("a"), key("b"), key("d")], Value::Integer(2))
			.unwrap();

		let a = root.get("a").unwrap().as_table().unwrap();
		let b = a.get("b").unwrap().as_table().unwrap();
		assert_eq!(b.get("c"), Some(&Value::Integer(1)));
		assert_eq!(b.get("d"), Some(&Value::Integer(2)));
		assert_eq!(b.origin(), Origin::Explicit);
	}

	#[test]
	fn header_after_implicit_dotted_table_is_legal() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		root.create_table(&[key("a"), key("b")], TableKind::Header)
			.unwrap()
			.add_key_value(&[key("x")], Value::Integer(1))
			.unwrap();
		root.create_table(&[key("a")], TableKind::Header)
			.unwrap()
			.add_key_value(&[key("y")], Value::Integer(2))
			.unwrap();

		let a = root.get("a").unwrap().as_table().unwrap();
		assert_eq!(a.origin(), Origin::Explicit);
		assert_eq!(a.get("y"), Some(&Value::Integer(2)));
		assert_eq!(
			a.get("b").unwrap().as_table().unwrap().get("x"),
			Some(&Value::Integer(1))
		);
	}

	#[test]
	fn redefining_header_fails() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		root.create_table(&[key("a")], TableKind::Header).unwrap();
		let err = root.create_table(&[key("a")], TableKind::Header).unwrap_err();
		assert_eq!(err, TomlErrorKind::TableRedefinition);
	}

	#[test]
	fn extending_inline_table_fails() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		let mut inline = Table::new(TableKind::Inline, Origin::Explicit);
		inline.add_key_value(&[key("x")], Value::Integer(1)).unwrap();
		root.add_key_value(&[key("t")], Value::Table(inline)).unwrap();

		let err = root
			.add_key_value(&[key("t"), key("y")], Value::Integer(2))
			.unwrap_err();
		assert_eq!(err, TomlErrorKind::ImmutableInlineTable);
	}

	#[test]
	fn array_of_tables_elements() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		{
			let arr = root.get_or_create_array(&[key("fruits")]).unwrap();
			let mut elem = Table::new(TableKind::ArrayElement, Origin::Explicit);
			elem.add_key_value(&[key("name")], Value::String("apple".into())).unwrap();
			arr.push(Value::Table(elem));
		}
		{
			let arr = root.get_or_create_array(&[key("fruits")]).unwrap();
			let mut elem = Table::new(TableKind::ArrayElement, Origin::Explicit);
			elem.add_key_value(&[key("name")], Value::String("banana".into())).unwrap();
			arr.push(Value::Table(elem));
		}

		let fruits = root.get("fruits").unwrap().as_array().unwrap();
		assert_eq!(fruits.len(), 2);
		assert_eq!(
			fruits[1].as_table().unwrap().get("name"),
			Some(&Value::String("banana".into()))
		);
	}

	#[test]
	fn put_ordered_keeps_headers_after_scalars() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		root.create_table(&[key("b")], TableKind::Header).unwrap();
		root.add_key_value(&[key("a")], Value::Integer(1)).unwrap();

		let keys: Vec<&str> = root.iter().map(|(k, _)| k).collect();
		assert_eq!(keys, vec!["a", "b"]);
	}
}
