//! The parser's forward cursor over the input bytes.
//!
//! A single index into a borrowed `&str`, plus the handful of byte-at-a-time
//! helpers every parser submodule needs. Nothing here outlives one call to
//! `parse_string` - every byte it looks at is copied into an owned `String`
//! or `Value` before the cursor moves on, per spec.md §9.

/// A forward-only cursor over the UTF-8 bytes of a TOML source.
pub(crate) struct Cursor<'a> {
	text: &'a str,
	bytes: &'a [u8],
	idx: usize,
}

impl<'a> Cursor<'a> {
	pub(crate) fn new(text: &'a str) -> Self {
		Self {
			text,
			bytes: text.as_bytes(),
			idx: 0,
		}
	}

	/// The current byte index.
	pub(crate) fn pos(&self) -> usize {
		self.idx
	}
	/// Reposition the cursor. Used to backtrack after a lookahead.
	pub(crate) fn set_pos(&mut self, idx: usize) {
		self.idx = idx;
	}

	/// The byte at the cursor, if any.
	pub(crate) fn current(&self) -> Option<u8> {
		self.bytes.get(self.idx).copied()
	}
	/// The byte `offset` positions ahead of the cursor, if any.
	pub(crate) fn peek(&self, offset: usize) -> Option<u8> {
		self.bytes.get(self.idx + offset).copied()
	}
	/// Advance the cursor by one byte.
	pub(crate) fn advance(&mut self) {
		self.idx += 1;
	}
	/// Advance the cursor by `n` bytes.
	pub(crate) fn advance_n(&mut self, n: usize) {
		self.idx += n;
	}

	/// Consume `current()` if it equals `byte`, returning whether it did.
	pub(crate) fn eat(&mut self, byte: u8) -> bool {
		if self.current() == Some(byte) {
			self.advance();
			true
		} else {
			false
		}
	}

	/// True if the upcoming bytes starting at the cursor equal `pat`.
	pub(crate) fn starts_with(&self, pat: &str) -> bool {
		self.bytes[self.idx.min(self.bytes.len())..].starts_with(pat.as_bytes())
	}

	/// Advance past ASCII space and tab only (no newlines).
	pub(crate) fn skip_horizontal_whitespace(&mut self) {
		while matches!(self.current(), Some(b' ') | Some(b'\t')) {
			self.advance();
		}
	}

	/// Advance past a `\n` or `\r\n`; returns false if there was no newline.
	pub(crate) fn eat_newline(&mut self) -> bool {
		if self.current() == Some(b'\r') && self.peek(1) == Some(b'\n') {
			self.advance_n(2);
			true
		} else if self.current() == Some(b'\n') {
			self.advance();
			true
		} else {
			false
		}
	}

	/// Advance past a `#...` comment, up to but not including the newline.
	pub(crate) fn skip_comment(&mut self) {
		if self.current() == Some(b'#') {
			while let Some(b) = self.current() {
				if b == b'\n' {
					break;
				}
				self.advance();
			}
		}
	}

	/// Borrow the bytes from `start` (inclusive) to the cursor (exclusive).
	pub(crate) fn slice_from(&self, start: usize) -> &'a str {
		&self.text[start..self.idx]
	}
	/// Borrow the bytes in `start..end`.
	pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
		&self.text[start..end]
	}

	/// 1-based line number containing byte offset `idx`, computed by
	/// counting newlines in the consumed prefix. Only called on the error
	/// path, so linear counting is fine (spec.md §9).
	pub(crate) fn line_number_at(&self, idx: usize) -> usize {
		1 + self.bytes[..idx.min(self.bytes.len())]
			.iter()
			.filter(|&&b| b == b'\n')
			.count()
	}
}
