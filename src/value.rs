//! TOML's value types: the tagged union described in the data model, plus
//! the calendar types it embeds.

use crate::table::Table;

/// A value in a TOML document.
///
/// This is a closed, nine-variant tagged union - exactly the shapes TOML
/// 1.0.0 defines. There is no tenth variant hiding behind a catch-all.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
	/// A 64-bit signed integer (`x = 5`, `x = 0xDEAD_BEEF`).
	Integer(i64),
	/// A 64-bit IEEE-754 float, including `inf`/`nan` and their signed forms.
	Float(f64),
	/// A boolean (`true`/`false`).
	Boolean(bool),
	/// An owned UTF-8 string. Used for all six TOML string flavors; by the
	/// time a string reaches this variant, quoting/escaping has already been
	/// resolved.
	String(String),
	/// A local date with no time component.
	Date(Date),
	/// A local time with no date component.
	Time(Time),
	/// A date and time, local or offset from UTC. See [`DateTime::offset`].
	DateTime(DateTime),
	/// An ordered sequence of values. Whether this is an "array of tables"
	/// is derived from its first element, not stored as separate metadata
	/// (spec.md §3).
	Array(Vec<Value>),
	/// A table of key/value pairs. See [`Table`] for the `kind`/`origin`
	/// metadata that distinguishes headers, dotted tables, inline tables,
	/// and array-of-tables elements.
	Table(Table),
}

impl Value {
	/// The type tag of this value, useful for error messages and the typed
	/// JSON encoder.
	pub fn ty(&self) -> ValueType {
		match self {
			Self::Integer(_) => ValueType::Integer,
			Self::Float(_) => ValueType::Float,
			Self::Boolean(_) => ValueType::Boolean,
			Self::String(_) => ValueType::String,
			Self::Date(_) => ValueType::Date,
			Self::Time(_) => ValueType::Time,
			Self::DateTime(dt) if dt.offset.is_some() => ValueType::DateTime,
			Self::DateTime(_) => ValueType::DateTimeLocal,
			Self::Array(_) => ValueType::Array,
			Self::Table(_) => ValueType::Table,
		}
	}

	/// Attempt to borrow this value as a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s.as_str()),
			_ => None,
		}
	}
	/// Attempt to copy this value out as an integer.
	pub fn as_integer(&self) -> Option<i64> {
		match self {
			Self::Integer(n) => Some(*n),
			_ => None,
		}
	}
	/// Attempt to copy this value out as a float.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(n) => Some(*n),
			_ => None,
		}
	}
	/// Attempt to copy this value out as a bool.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Boolean(b) => Some(*b),
			_ => None,
		}
	}
	/// Attempt to borrow this value as an array.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(a) => Some(a),
			_ => None,
		}
	}
	/// Attempt to borrow this value as a table.
	pub fn as_table(&self) -> Option<&Table> {
		match self {
			Self::Table(t) => Some(t),
			_ => None,
		}
	}

	/// True if this is an array whose elements are all `ArrayElement`
	/// tables, i.e. the result of one or more `[[path]]` headers.
	pub(crate) fn is_array_of_tables(&self) -> bool {
		match self {
			Self::Array(elements) => matches!(
				elements.first(),
				Some(Value::Table(t)) if t.kind() == crate::table::TableKind::ArrayElement
			),
			_ => false,
		}
	}
}

/// The type tag of a [`Value`]. `DateTime` and `DateTimeLocal` are split so
/// the typed JSON encoder can tell them apart without re-inspecting the
/// value (spec.md §4.5, property P6).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[allow(missing_docs)]
pub enum ValueType {
	Integer,
	Float,
	Boolean,
	String,
	Date,
	Time,
	DateTime,
	DateTimeLocal,
	Array,
	Table,
}

/// A calendar date: `YYYY-MM-DD`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Date {
	/// Four-digit year, `0..=9999`.
	pub year: u16,
	/// Month, `1..=12`.
	pub month: u8,
	/// Day of month, `1..=`days_in_month(year, month)`.
	pub day: u8,
}

impl Date {
	/// True if `year` is a leap year under the Gregorian rule: divisible by
	/// 4, except centuries, unless also divisible by 400.
	pub fn is_leap_year(year: u16) -> bool {
		(year % 4 == 0 && year % 100 != 0) || year % 400 == 0
	}

	/// Number of days in `month` of `year`, honoring the leap-year rule for
	/// February. `month` must be `1..=12`.
	pub fn days_in_month(year: u16, month: u8) -> u8 {
		match month {
			1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
			4 | 6 | 9 | 11 => 30,
			2 if Self::is_leap_year(year) => 29,
			2 => 28,
			_ => 0,
		}
	}
}

/// A time of day with nanosecond precision: `HH:MM:SS[.fraction]`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Time {
	/// Hour, `0..=23`.
	pub hour: u8,
	/// Minute, `0..=59`.
	pub minute: u8,
	/// Second, `0..=59`. TOML does not model leap seconds.
	pub second: u8,
	/// Fractional seconds. A source with more than nine fractional digits
	/// is rejected with `InvalidNanoSecond` rather than truncated.
	pub nanosecond: u32,
}

/// A date and time, optionally offset from UTC.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DateTime {
	/// The calendar date component.
	pub date: Date,
	/// The time-of-day component.
	pub time: Time,
	/// Offset from UTC in minutes, `-1439..=1439`. `Some(0)` means the
	/// source had an explicit `Z`/`z` suffix; `None` means no offset was
	/// given at all (a "local" datetime) - these are distinct per spec.md
	/// §3 and property P6.
	pub offset: Option<i16>,
}
