//! JSON encoding (spec.md §4.5): a plain mode for ordinary interchange, and
//! a typed mode matching the toml-lang conformance test harness schema,
//! wrapping every scalar as `{"type": ..., "value": ...}` so a `datetime`
//! can be told apart from a `datetime-local` (property P6) without
//! re-parsing the rendered JSON.

use std::fmt::Write as _;

use crate::{
	table::Table,
	value::{Date, DateTime, Time, Value, ValueType},
};

/// Render `root` as JSON. `typed` selects the conformance-harness shape
/// over plain JSON.
pub(crate) fn to_json(root: &Table, typed: bool) -> String {
	let mut out = String::new();
	write_table(&mut out, root, typed);
	out
}

fn write_table(out: &mut String, table: &Table, typed: bool) {
	out.push('{');
	for (i, (key, value)) in table.iter().enumerate() {
		if i > 0 {
			out.push(',');
		}
		write_json_string(out, key);
		out.push(':');
		write_value(out, value, typed);
	}
	out.push('}');
}

fn write_value(out: &mut String, value: &Value, typed: bool) {
	match value {
		Value::Table(t) => write_table(out, t, typed),
		Value::Array(a) => {
			out.push('[');
			for (i, v) in a.iter().enumerate() {
				if i > 0 {
					out.push(',');
				}
				write_value(out, v, typed);
			}
			out.push(']');
		}
		scalar if typed => write_typed_scalar(out, scalar),
		Value::String(s) => write_json_string(out, s),
		Value::Integer(n) => {
			let _ = write!(out, "{n}");
		}
		Value::Float(f) => write_plain_float(out, *f),
		Value::Boolean(b) => {
			let _ = write!(out, "{b}");
		}
		Value::Date(d) => write_json_string(out, &format_date(d)),
		Value::Time(t) => write_json_string(out, &format_time(t)),
		Value::DateTime(dt) => write_json_string(out, &format_datetime(dt)),
	}
}

fn write_typed_scalar(out: &mut String, value: &Value) {
	out.push_str("{\"type\":\"");
	out.push_str(type_name(value.ty()));
	out.push_str("\",\"value\":");
	match value {
		Value::String(s) => write_json_string(out, s),
		Value::Integer(n) => write_json_string(out, &n.to_string()),
		Value::Float(f) => write_json_string(out, &format_float(*f)),
		Value::Boolean(b) => write_json_string(out, if *b { "true" } else { "false" }),
		Value::Date(d) => write_json_string(out, &format_date(d)),
		Value::Time(t) => write_json_string(out, &format_time(t)),
		Value::DateTime(dt) => write_json_string(out, &format_datetime(dt)),
		Value::Array(_) | Value::Table(_) => unreachable!("arrays and tables aren't scalars"),
	}
	out.push('}');
}

fn type_name(ty: ValueType) -> &'static str {
	match ty {
		ValueType::Integer => "integer",
		ValueType::Float => "float",
		ValueType::Boolean => "bool",
		ValueType::String => "string",
		ValueType::Date => "date-local",
		ValueType::Time => "time-local",
		ValueType::DateTime => "datetime",
		ValueType::DateTimeLocal => "datetime-local",
		ValueType::Array => "array",
		ValueType::Table => "table",
	}
}

fn write_json_string(out: &mut String, s: &str) {
	out.push('"');
	for c in s.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c if (c as u32) < 0x20 => {
				let _ = write!(out, "\\u{:04x}", c as u32);
			}
			c => out.push(c),
		}
	}
	out.push('"');
}

/// JSON has no literal for `inf`/`nan`, so plain mode falls back to the same
/// quoted spelling the typed mode uses for them - still valid JSON, unlike
/// emitting the bare token.
fn write_plain_float(out: &mut String, f: f64) {
	if f.is_nan() || f.is_infinite() {
		write_json_string(out, &format_float(f));
		return;
	}
	if f == f.trunc() && f.abs() < 1e15 {
		let _ = write!(out, "{f:.1}");
	} else {
		let _ = write!(out, "{f}");
	}
}

fn format_float(f: f64) -> String {
	if f.is_nan() {
		(if f.is_sign_negative() { "-nan" } else { "nan" }).to_string()
	} else if f.is_infinite() {
		(if f > 0.0 { "inf" } else { "-inf" }).to_string()
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
			s.push(sign);
			let _ = write!(s, "{:02}:{:02}", minutes / 60, minutes % 60);
		}
		None => {}
	}
	s
}
