//! TOML encoding (spec.md §4.6): walks a [`Table`] depth-first, printing a
//! table's own scalar and dotted-key assignments before recursing into its
//! `[header]`/`[[header]]` children, relying on [`Table::iter`]'s ordering
//! guarantee to keep assignments above child sections the way a human would
//! write them.

use std::fmt::Write as _;

use crate::{
	key::encode_key,
	table::{is_header_shaped, Origin, Table, TableKind},
	value::{Date, DateTime, Time, Value},
};

/// Render `root` back out as TOML source.
pub(crate) fn to_toml(root: &Table) -> String {
	let mut out = String::new();
	write_table_sections(&mut out, root, &[]);
	out
}

fn write_table_sections(out: &mut String, table: &Table, path: &[String]) {
	write_assignments(out, table, "");

	for (key, value) in table.iter() {
		if !is_header_shaped(value) {
			continue;
		}
		let mut child_path = path.to_vec();
		child_path.push(key.to_string());

		match value {
			Value::Table(t) => {
				if t.origin() == Origin::Explicit {
					push_section_header(out, &format!("[{}]", encode_path(&child_path)));
				}
				write_table_sections(out, t, &child_path);
			}
			Value::Array(elements) => {
				for element in elements {
					let Value::Table(element_table) = element else {
						continue;
					};
					push_section_header(out, &format!("[[{}]]", encode_path(&child_path)));
					write_table_sections(out, element_table, &child_path);
				}
			}
			_ => {}
		}
	}
}

fn push_section_header(out: &mut String, header: &str) {
	if !out.is_empty() {
		out.push('\n');
	}
	out.push_str(header);
	out.push('\n');
}

fn encode_path(parts: &[String]) -> String {
	parts
		.iter()
		.map(|p| encode_key(p))
		.collect::<Vec<_>>()
		.join(".")
}

/// Write every entry of `table` that is not header-shaped, as a `key =
/// value` line under `prefix` (empty at the top, `"a.b."` while flattening a
/// dotted table).
fn write_assignments(out: &mut String, table: &Table, prefix: &str) {
	for (key, value) in table.iter() {
		if is_header_shaped(value) {
			continue;
		}

		if let Value::Table(t) = value {
			if t.kind() == TableKind::Dotted {
				let nested_prefix = format!("{prefix}{}.", encode_key(key));
				write_assignments(out, t, &nested_prefix);
				continue;
			}
		}

		out.push_str(prefix);
		out.push_str(&encode_key(key));
		out.push_str(" = ");
		write_inline_value(out, value);
		out.push('\n');
	}
}

fn write_inline_value(out: &mut String, value: &Value) {
	match value {
		Value::Integer(n) => {
			let _ = write!(out, "{n}");
		}
		Value::Float(f) => out.push_str(&format_float(*f)),
		Value::Boolean(b) => {
			let _ = write!(out, "{b}");
		}
		Value::String(s) => write_basic_string(out, s),
		Value::Date(d) => out.push_str(&format_date(d)),
		Value::Time(t) => out.push_str(&format_time(t)),
		Value::DateTime(dt) => out.push_str(&format_datetime(dt)),
		Value::Array(elements) => {
			out.push('[');
			for (i, element) in elements.iter().enumerate() {
				if i > 0 {
					out.push_str(", ");
				}
				write_inline_value(out, element);
			}
			out.push(']');
		}
		// Only inline tables can appear as a plain value; `Dotted` tables
		// are flattened before reaching here, and `Header`/`ArrayElement`
		// tables are filtered out by `is_header_shaped` upstream.
		Value::Table(t) => {
			out.push_str("{ ");
			for (i, (key, v)) in t.iter().enumerate() {
				if i > 0 {
					out.push_str(", ");
				}
				out.push_str(&encode_key(key));
				out.push_str(" = ");
				write_inline_value(out, v);
			}
			out.push_str(" }");
		}
	}
}

fn write_basic_string(out: &mut String, s: &str) {
	out.push('"');
	for c in s.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\t' => out.push_str("\\t"),
			'\r' => out.push_str("\\r"),
			c if (c as u32) < 0x20 => {
				let _ = write!(out, "\\u{:04x}", c as u32);
			}
			c => out.push(c),
		}
	}
	out.push('"');
}

fn format_float(f: f64) -> String {
	if f.is_nan() {
		(if f.is_sign_negative() { "-nan" } else { "nan" }).to_string()
	} else if f.is_infinite() {
		(if f > 0.0 { "inf" } else { "-inf" }).to_string()
	} else if f == f.trunc() && f.abs() < 1e15 {
		format!("{f:.1}")
	} else {
		format!("{f}")
	}
}

fn format_date(d: &Date) -> String {
	format!("{:04}-{:02}-{:02}", d.year, d.month, d.day)
}

fn format_time(t: &Time) -> String {
	let mut s = format!("{:02}:{:02}:{:02}", t.hour, t.minute, t.second);
	if t.nanosecond > 0 {
		let frac = format!("{:09}", t.nanosecond);
		let frac = frac.trim_end_matches('0');
		s.push('.');
		s.push_str(frac);
	}
	s
}

fn format_datetime(dt: &DateTime) -> String {
	let mut s = format_date(&dt.date);
	s.push('T');
	s.push_str(&format_time(&dt.time));
	match dt.offset {
		Some(0) => s.push('Z'),
		Some(minutes) => {
			let sign = if minutes < 0 { '-' } else { '+' };
			let minutes = minutes.unsigned_abs();
			let _ = write!(s, "{sign}{:02}:{:02}", minutes / 60, minutes % 60);
		}
		None => {}
	}
	s
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_flat_document() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		root.add_key_value(&["a".into()], Value::Integer(1)).unwrap();
		root.add_key_value(&["b".into()], Value::String("x".into())).unwrap();
		assert_eq!(to_toml(&root), "a = 1\nb = \"x\"\n");
	}

	#[test]
	fn renders_header_after_assignments() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		root.add_key_value(&["a".into()], Value::Integer(1)).unwrap();
		root.create_table(&["b".into()], TableKind::Header)
			.unwrap()
			.add_key_value(&["x".into()], Value::Integer(2))
			.unwrap();

		assert_eq!(to_toml(&root), "a = 1\n\n[b]\nx = 2\n");
	}

	#[test]
	fn flattens_dotted_tables() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		root.add_key_value(
			&["physical".into(), "color".into()],
			Value::String("orange".into()),
		)
		.unwrap();
		root.add_key_value(&["physical".into(), "shape".into()], Value::String("round".into()))
			.unwrap();

		assert_eq!(
			to_toml(&root),
			"physical.color = \"orange\"\nphysical.shape = \"round\"\n"
		);
	}

	#[test]
	fn renders_array_of_tables() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		let arr = root.get_or_create_array(&["fruit".into()]).unwrap();
		let mut elem = Table::new(TableKind::ArrayElement, Origin::Explicit);
		elem.add_key_value(&["name".into()], Value::String("apple".into())).unwrap();
		arr.push(Value::Table(elem));

		assert_eq!(to_toml(&root), "[[fruit]]\nname = \"apple\"\n");
	}

	#[test]
	fn renders_inline_table_value() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		let mut inline = Table::new(TableKind::Inline, Origin::Explicit);
		inline.add_key_value(&["x".into()], Value::Integer(1)).unwrap();
		root.add_key_value(&["point".into()], Value::Table(inline)).unwrap();

		assert_eq!(to_toml(&root), "point = { x = 1 }\n");
	}

	#[test]
	fn implicit_intermediate_header_emits_no_line_of_its_own() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		root.create_table(&["a".into(), "b".into()], TableKind::Header)
			.unwrap()
			.add_key_value(&["x".into()], Value::Integer(1))
			.unwrap();

		assert_eq!(to_toml(&root), "[a.b]\nx = 1\n");
	}

	#[test]
	fn explicit_intermediate_header_still_emits_its_own_line() {
		let mut root = Table::new(TableKind::Root, Origin::Explicit);
		root.create_table(&["a".into()], TableKind::Header).unwrap();
		root.create_table(&["a".into(), "b".into()], TableKind::Header)
			.unwrap()
			.add_key_value(&["x".into()], Value::Integer(1))
			.unwrap();

		assert_eq!(to_toml(&root), "[a]\n\n[a.b]\nx = 1\n");
	}
}
