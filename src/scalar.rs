//! Scalar interpreters (spec.md §4.1): turn a trimmed byte slice into one of
//! integer, float, bool, date, time, or datetime. Each interpreter only
//! looks inside the slice it's given.

use crate::{
	error::TomlErrorKind,
	value::{Date, DateTime, Time, Value},
};

/// Parse `s` as a signed integer: optional `+`/`-`, underscores between
/// digits, and `0x`/`0o`/`0b` prefixes for base 16/8/2. Returns `None`
/// (rather than an error) on anything that doesn't look like an integer at
/// all, so the caller can fall through to the next interpreter.
pub fn parse_integer(s: &str) -> Option<i64> {
	let (negative, rest) = match s.as_bytes().first() {
		Some(b'+') => (false, &s[1..]),
		Some(b'-') => (true, &s[1..]),
		_ => (false, s),
	};
	if rest.is_empty() {
		return None;
	}

	let (radix, digits) = if let Some(hex) = rest.strip_prefix("0x") {
		(16, hex)
	} else if let Some(oct) = rest.strip_prefix("0o") {
		(8, oct)
	} else if let Some(bin) = rest.strip_prefix("0b") {
		(2, bin)
	} else {
		(10, rest)
	};

	if digits.is_empty() {
		return None;
	}
	// A leading zero followed by more digits is only legal in base 10 for
	// the literal value "0" itself.
	if radix == 10 && digits.len() > 1 && digits.as_bytes()[0] == b'0' {
		return None;
	}
	if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
		return None;
	}

	let mut cleaned = String::with_capacity(digits.len());
	for b in digits.bytes() {
		if b == b'_' {
			continue;
		}
		if !is_valid_digit(b, radix) {
			return None;
		}
		cleaned.push(b as char);
	}
	if cleaned.is_empty() {
		return None;
	}

	let magnitude = u64::from_str_radix(&cleaned, radix).ok()?;
	if negative {
		if magnitude > i64::MAX as u64 + 1 {
			return None;
		}
		Some((magnitude as i128 * -1) as i64)
	} else {
		if magnitude > i64::MAX as u64 {
			return None;
		}
		Some(magnitude as i64)
	}
}

fn is_valid_digit(b: u8, radix: u32) -> bool {
	match radix {
		2 => matches!(b, b'0' | b'1'),
		8 => (b'0'..=b'7').contains(&b),
		16 => b.is_ascii_hexdigit(),
		_ => b.is_ascii_digit(),
	}
}

/// Parse `s` as a float: decimal/exponential forms, plus `inf`/`+inf`/
/// `-inf`/`nan`/`+nan`/`-nan`. Returns `None` on anything that doesn't look
/// like a float, so the caller falls through.
pub fn parse_float(s: &str) -> Option<f64> {
	match s {
		"inf" | "+inf" => return Some(f64::INFINITY),
		"-inf" => return Some(f64::NEG_INFINITY),
		"nan" | "+nan" => return Some(f64::NAN),
		"-nan" => return Some(-f64::NAN),
		_ => {}
	}

	if s.is_empty() || !s.bytes().any(|b| b == b'.' || b == b'e' || b == b'E') {
		return None;
	}
	if s.starts_with('_') || s.ends_with('_') || s.contains("__") {
		return None;
	}
	if s.contains("._") || s.contains("_.") {
		return None;
	}

	let cleaned: String = s.bytes().filter(|&b| b != b'_').map(|b| b as char).collect();
	cleaned.parse::<f64>().ok()
}

/// Parse `s` as a boolean literal.
pub fn parse_bool(s: &str) -> Option<bool> {
	match s {
		"true" => Some(true),
		"false" => Some(false),
		_ => None,
	}
}

fn parse_2digit(s: &str) -> Option<u8> {
	if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	s.parse().ok()
}

/// Parse `YYYY-MM-DD`, range-checking month length and leap years.
pub fn parse_date(s: &str) -> Result<Date, TomlErrorKind> {
	let bytes = s.as_bytes();
	if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
		return Err(TomlErrorKind::InvalidValue);
	}
	let year: u16 = s[0..4]
		.parse()
		.map_err(|_| TomlErrorKind::InvalidYear)?;
	let month = parse_2digit(&s[5..7]).ok_or(TomlErrorKind::InvalidMonth)?;
	let day = parse_2digit(&s[8..10]).ok_or(TomlErrorKind::InvalidDay)?;

	if !(1..=12).contains(&month) {
		return Err(TomlErrorKind::InvalidMonth);
	}
	if day == 0 || day > Date::days_in_month(year, month) {
		return Err(TomlErrorKind::InvalidDay);
	}

	Ok(Date { year, month, day })
}

/// Parse `HH:MM:SS[.fraction]`, truncating fractional digits beyond nine.
pub fn parse_time(s: &str) -> Result<Time, TomlErrorKind> {
	let bytes = s.as_bytes();
	if bytes.len() < 8 || bytes[2] != b':' || bytes[5] != b':' {
		return Err(TomlErrorKind::InvalidValue);
	}
	let hour = parse_2digit(&s[0..2]).ok_or(TomlErrorKind::InvalidHour)?;
	let minute = parse_2digit(&s[3..5]).ok_or(TomlErrorKind::InvalidMinute)?;
	let second = parse_2digit(&s[6..8]).ok_or(TomlErrorKind::InvalidSecond)?;

	if hour > 23 {
		return Err(TomlErrorKind::InvalidHour);
	}
	if minute > 59 {
		return Err(TomlErrorKind::InvalidMinute);
	}
	if second > 59 {
		return Err(TomlErrorKind::InvalidSecond);
	}

	let nanosecond = if bytes.len() > 8 {
		if bytes[8] != b'.' {
			return Err(TomlErrorKind::InvalidValue);
		}
		let frac = &s[9..];
		if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
			return Err(TomlErrorKind::InvalidNanoSecond);
		}
		if frac.len() > 9 {
			return Err(TomlErrorKind::InvalidNanoSecond);
		}
		let mut digits = [b'0'; 9];
		digits[..frac.len()].copy_from_slice(frac.as_bytes());
		std::str::from_utf8(&digits)
			.unwrap()
			.parse()
			.map_err(|_| TomlErrorKind::InvalidNanoSecond)?
	} else {
		0
	};

	Ok(Time {
		hour,
		minute,
		second,
		nanosecond,
	})
}

/// Parse a full datetime: a 10-char date, `T`/`t`/space, a time, and an
/// optional `Z`/`z` or `±HH:MM` offset.
pub fn parse_datetime(s: &str) -> Result<DateTime, TomlErrorKind> {
	if s.len() < 19 {
		return Err(TomlErrorKind::InvalidValue);
	}
	let sep = s.as_bytes()[10];
	if sep != b'T' && sep != b't' && sep != b' ' {
		return Err(TomlErrorKind::InvalidValue);
	}

	let date = parse_date(&s[0..10])?;
	let rest = &s[11..];

	let (time_part, offset) = split_offset(rest)?;
	let time = parse_time(time_part)?;

	Ok(DateTime {
		date,
		time,
		offset,
	})
}

/// Split off a trailing `Z`/`z` or `±HH:MM` offset from a time-or-datetime
/// tail, returning the remaining time text and the offset in minutes.
/// `Z`/`z` is distinct from no offset at all (`Some(0)` vs `None`).
fn split_offset(s: &str) -> Result<(&str, Option<i16>), TomlErrorKind> {
	if let Some(stripped) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
		return Ok((stripped, Some(0)));
	}

	let bytes = s.as_bytes();
	if bytes.len() >= 6 {
		let sign_idx = bytes.len() - 6;
		let sign = bytes[sign_idx];
		if (sign == b'+' || sign == b'-') && bytes[sign_idx + 3] == b':' {
			let hour = parse_2digit(&s[sign_idx + 1..sign_idx + 3])
				.ok_or(TomlErrorKind::InvalidTimeOffset)?;
			let minute = parse_2digit(&s[sign_idx + 4..sign_idx + 6])
				.ok_or(TomlErrorKind::InvalidTimeOffset)?;
			if hour > 23 || minute > 59 {
				return Err(TomlErrorKind::InvalidTimeOffset);
			}
			let total = hour as i16 * 60 + minute as i16;
			let total = if sign == b'-' { -total } else { total };
			return Ok((&s[..sign_idx], Some(total)));
		}
	}

	Ok((s, None))
}

/// Run all scalar interpreters, in the order the spec prescribes: int,
/// float, bool, datetime, date, time. Returns `None` if nothing recognizes
/// the text (the caller reports `InvalidValue`).
pub fn parse_scalar(s: &str) -> Option<Result<Value, TomlErrorKind>> {
	if let Some(n) = parse_integer(s) {
		return Some(Ok(Value::Integer(n)));
	}
	if let Some(f) = parse_float(s) {
		return Some(Ok(Value::Float(f)));
	}
	if let Some(b) = parse_bool(s) {
		return Some(Ok(Value::Boolean(b)));
	}
	if looks_like_datetime(s) {
		return Some(parse_datetime(s).map(Value::DateTime));
	}
	if looks_like_date(s) {
		return Some(parse_date(s).map(Value::Date));
	}
	if looks_like_time(s) {
		return Some(parse_time(s).map(Value::Time));
	}
	None
}

fn looks_like_date(s: &str) -> bool {
	s.len() == 10 && s.as_bytes()[4] == b'-' && s.as_bytes()[7] == b'-'
}
fn looks_like_time(s: &str) -> bool {
	s.len() >= 8 && s.as_bytes()[2] == b':' && s.as_bytes()[5] == b':'
}
fn looks_like_datetime(s: &str) -> bool {
	s.len() >= 19
		&& s.as_bytes()[4] == b'-'
		&& s.as_bytes()[7] == b'-'
		&& matches!(s.as_bytes()[10], b'T' | b't' | b' ')
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hex_int() {
		assert_eq!(parse_integer("0xDEAD_BEEF"), Some(3735928559));
	}

	#[test]
	fn signed_int() {
		assert_eq!(parse_integer("-42"), Some(-42));
		assert_eq!(parse_integer("+7"), Some(7));
	}

	#[test]
	fn float_inf_nan() {
		assert_eq!(parse_float("inf"), Some(f64::INFINITY));
		assert_eq!(parse_float("-inf"), Some(f64::NEG_INFINITY));
		assert!(parse_float("nan").unwrap().is_nan());
	}

	#[test]
	fn offset_datetime_vs_local() {
		let with_offset = parse_datetime("1979-05-27T07:32:00Z").unwrap();
		assert_eq!(with_offset.offset, Some(0));

		let local = parse_datetime("1979-05-27T07:32:00").unwrap();
		assert_eq!(local.offset, None);
	}

	#[test]
	fn leap_year_date() {
		assert!(parse_date("2024-02-29").is_ok());
		assert_eq!(parse_date("2023-02-29").unwrap_err(), TomlErrorKind::InvalidDay);
	}

	#[test]
	fn fractional_seconds_beyond_nine_digits_is_rejected() {
		let t = parse_time("07:32:00.1234567891").unwrap_err();
		assert_eq!(t, TomlErrorKind::InvalidNanoSecond);
		let t = parse_time("07:32:00.123456789").unwrap();
		assert_eq!(t.nanosecond, 123456789);
	}
}
