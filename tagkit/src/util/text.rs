use crate::error::Result;
use crate::macros::err;

/// The text encoding for use in ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash, Default)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	#[default]
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	pub(crate) fn verify_latin1(text: &str) -> bool {
		text.chars().all(|c| c as u32 <= 255)
	}

	/// The width of this encoding's NUL terminator
	pub(crate) fn terminator_len(self) -> usize {
		match self {
			Self::Latin1 | Self::UTF8 => 1,
			Self::UTF16 | Self::UTF16BE => 2,
		}
	}

	/// Encode `text`, optionally appending a terminator
	///
	/// [`TextEncoding::UTF16`] is always written little endian with a BOM.
	///
	/// # Errors
	///
	/// * [`ErrorKind::InvalidEncoding`](crate::error::ErrorKind::InvalidEncoding), `text` has characters outside of Latin-1 and the encoding is
	///   [`TextEncoding::Latin1`]
	pub(crate) fn encode(self, text: &str, terminated: bool) -> Result<Vec<u8>> {
		let mut out = match self {
			TextEncoding::Latin1 => latin1_encode(text)?,
			TextEncoding::UTF16 => utf16_encode(text, u16::to_le_bytes, true),
			TextEncoding::UTF16BE => utf16_encode(text, u16::to_be_bytes, false),
			TextEncoding::UTF8 => text.as_bytes().to_vec(),
		};

		if terminated {
			out.extend(std::iter::repeat_n(0, self.terminator_len()));
		}

		Ok(out)
	}
}

/// Find the length of a NUL terminated string within `bytes`
///
/// The returned length does not include the terminator. For UTF-16 encodings, the terminator
/// is two NUL bytes, and is only matched at an even offset.
///
/// Returns `None` if no terminator exists.
pub(crate) fn terminated_len(bytes: &[u8], encoding: TextEncoding) -> Option<usize> {
	match encoding.terminator_len() {
		1 => bytes.iter().position(|b| *b == 0),
		_ => bytes
			.chunks_exact(2)
			.position(|c| c == [0, 0])
			.map(|pos| pos * 2),
	}
}

/// Split a NUL terminated string off the front of `bytes`
///
/// Returns the string's content (without the terminator) and the bytes following the terminator.
pub(crate) fn split_terminated(bytes: &[u8], encoding: TextEncoding) -> Result<(&[u8], &[u8])> {
	let Some(len) = terminated_len(bytes, encoding) else {
		err!(TextDecode("Expected a terminated string, found none"));
	};

	let rest = &bytes[len + encoding.terminator_len()..];
	Ok((&bytes[..len], rest))
}

/// Decode `bytes` in full, trimming any trailing NULs
///
/// Anything that can't be decoded is replaced with U+FFFD, and an odd trailing byte in UTF-16
/// text is dropped.
pub(crate) fn decode_text(bytes: &[u8], encoding: TextEncoding) -> String {
	match encoding {
		TextEncoding::Latin1 => latin1_decode(bytes),
		TextEncoding::UTF16 => match bytes {
			[] => String::new(),
			[0xFE, 0xFF, rest @ ..] => utf16_decode_bytes(rest, u16::from_be_bytes),
			[0xFF, 0xFE, rest @ ..] => utf16_decode_bytes(rest, u16::from_le_bytes),
			_ => {
				log::warn!("UTF-16 string has no byte order mark, assuming big endian");
				utf16_decode_bytes(bytes, u16::from_be_bytes)
			},
		},
		TextEncoding::UTF16BE => utf16_decode_bytes(bytes, u16::from_be_bytes),
		TextEncoding::UTF8 => utf8_decode(bytes),
	}
}

/// Split a terminated string off the front of `bytes` and decode it
///
/// Returns the decoded string and the bytes following the terminator.
pub(crate) fn decode_terminated(bytes: &[u8], encoding: TextEncoding) -> Result<(String, &[u8])> {
	let (content, rest) = split_terminated(bytes, encoding)?;
	Ok((decode_text(content, encoding), rest))
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	let mut text = bytes.iter().map(|c| *c as char).collect::<String>();
	trim_end_nulls(&mut text);
	text
}

pub(crate) fn latin1_encode(text: &str) -> Result<Vec<u8>> {
	let mut out = Vec::with_capacity(text.len());
	for c in text.chars() {
		let Ok(b) = u8::try_from(u32::from(c)) else {
			log::debug!("Unable to encode {c:?} as Latin-1");
			err!(InvalidEncoding);
		};

		out.push(b);
	}

	Ok(out)
}

pub(crate) fn utf8_decode(bytes: &[u8]) -> String {
	let mut text = match std::str::from_utf8(bytes) {
		Ok(text) => text.to_owned(),
		Err(_) => {
			log::warn!("Invalid UTF-8 string, decoding lossily");
			String::from_utf8_lossy(bytes).into_owned()
		},
	};

	trim_end_nulls(&mut text);
	text
}

/// Decode UTF-16 with a known byte order
///
/// Any byte order mark must already be stripped.
pub(crate) fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> String {
	if bytes.len() % 2 != 0 {
		log::warn!("UTF-16 string has an odd length, dropping the final byte");
	}

	let units: Vec<u16> = bytes
		.chunks_exact(2)
		.map(|c| endianness([c[0], c[1]]))
		.collect();

	let mut text = match String::from_utf16(&units) {
		Ok(text) => text,
		Err(_) => {
			log::warn!("Invalid UTF-16 string, decoding lossily");
			String::from_utf16_lossy(&units)
		},
	};

	trim_end_nulls(&mut text);
	text
}

pub(crate) fn trim_end_nulls(text: &mut String) {
	if text.ends_with('\0') {
		let new_len = text.trim_end_matches('\0').len();
		text.truncate(new_len);
	}
}

fn utf16_encode(text: &str, endianness: fn(u16) -> [u8; 2], bom: bool) -> Vec<u8> {
	let mut encoded = Vec::<u8>::new();

	if bom {
		encoded.extend_from_slice(&endianness(0xFEFF_u16));
	}

	for ch in text.encode_utf16() {
		encoded.extend_from_slice(&endianness(ch));
	}

	encoded
}

/// Parse the leading run of ASCII digits in `text`
///
/// Leading whitespace is skipped. Anything after the digits (such as the "/12" in "3/12") is ignored.
/// Returns `None` if there are no digits, or the number doesn't fit in a `u32`.
pub(crate) fn leading_number(text: &str) -> Option<u32> {
	let text = text.trim_start();
	let end = text
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(text.len());

	text[..end].parse().ok()
}
