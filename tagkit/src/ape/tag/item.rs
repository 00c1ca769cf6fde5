use crate::ape::constants::{MAX_KEY_LEN, MIN_KEY_LEN};
use crate::error::Result;
use crate::macros::err;

use std::borrow::Cow;

const READ_ONLY_FLAG: u32 = 1;
const ITEM_TYPE_SHIFT: u32 = 1;
const ITEM_TYPE_MASK: u32 = 0b11;

/// The kind of data an [`ApeItem`] holds, taken from bits 1-2 of its flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApeItemType {
	/// UTF-8 text
	Text,
	/// Arbitrary binary data, such as a cover image
	Binary,
	/// A UTF-8 link to an external resource
	Locator,
	/// The reserved type (`3`)
	Reserved,
}

/// Represents an `APE` tag item
///
/// The value is kept as it was read. For the text accessors, it is assumed to be UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ApeItem {
	/// The raw item flags
	pub flags: u32,
	/// The raw item value
	pub value: Vec<u8>,
}

impl ApeItem {
	/// Create an [`ApeItem`] from its raw flags and value
	pub fn new(flags: u32, value: Vec<u8>) -> Self {
		Self { flags, value }
	}

	/// Create a text [`ApeItem`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::ape::{ApeItem, ApeItemType};
	///
	/// let item = ApeItem::text(String::from("Foo"));
	/// assert_eq!(item.item_type(), ApeItemType::Text);
	/// assert_eq!(item.as_text().as_deref(), Some("Foo"));
	/// ```
	pub fn text(value: String) -> Self {
		Self {
			flags: 0,
			value: value.into_bytes(),
		}
	}

	/// Whether the read-only flag is set
	pub fn read_only(&self) -> bool {
		self.flags & READ_ONLY_FLAG == READ_ONLY_FLAG
	}

	/// The type of the item's value
	pub fn item_type(&self) -> ApeItemType {
		match (self.flags >> ITEM_TYPE_SHIFT) & ITEM_TYPE_MASK {
			0 => ApeItemType::Text,
			1 => ApeItemType::Binary,
			2 => ApeItemType::Locator,
			_ => ApeItemType::Reserved,
		}
	}

	/// The value as text
	///
	/// Invalid UTF-8 sequences are replaced, and trailing NULs are removed.
	///
	/// This will return `None` for [`ApeItemType::Binary`] items.
	pub fn as_text(&self) -> Option<Cow<'_, str>> {
		if self.item_type() == ApeItemType::Binary {
			return None;
		}

		let end = self
			.value
			.iter()
			.rposition(|&b| b != 0)
			.map_or(0, |pos| pos + 1);

		Some(String::from_utf8_lossy(&self.value[..end]))
	}
}

/// Verify an item key, returning its normalized (lowercase) form
///
/// Keys must be between 1 and 255 bytes of printable ASCII.
pub(crate) fn normalize_key(key: &str) -> Result<String> {
	if !(MIN_KEY_LEN..=MAX_KEY_LEN).contains(&key.len()) {
		err!(InvalidArgument("APE item keys must be between 1 and 255 bytes"));
	}

	if !key.bytes().all(is_key_byte) {
		err!(InvalidArgument("APE item keys must be printable ASCII"));
	}

	Ok(key.to_ascii_lowercase())
}

pub(crate) fn is_key_byte(byte: u8) -> bool {
	(0x20..=0x7E).contains(&byte)
}

#[cfg(test)]
mod tests {
	use super::{ApeItem, ApeItemType, normalize_key};
	use crate::error::ErrorKind;

	#[test_log::test]
	fn item_flags() {
		let item = ApeItem::new(0b011, vec![0xFF, 0xD8]);
		assert!(item.read_only());
		assert_eq!(item.item_type(), ApeItemType::Binary);
		assert!(item.as_text().is_none());

		let item = ApeItem::new(0b100, b"https://example.com".to_vec());
		assert!(!item.read_only());
		assert_eq!(item.item_type(), ApeItemType::Locator);
		assert_eq!(item.as_text().as_deref(), Some("https://example.com"));
	}

	#[test_log::test]
	fn text_trims_nul() {
		let item = ApeItem::new(0, b"Foo\0\0".to_vec());
		assert_eq!(item.as_text().as_deref(), Some("Foo"));

		let item = ApeItem::new(0, vec![0]);
		assert_eq!(item.as_text().as_deref(), Some(""));
	}

	#[test_log::test]
	fn key_rules() {
		assert_eq!(normalize_key("Artist").unwrap(), "artist");
		assert_eq!(normalize_key("Cover Art (Front)").unwrap(), "cover art (front)");

		assert_eq!(normalize_key("X").unwrap(), "x");

		for bad in ["", "Caf\u{e9}", "Tab\tKey"] {
			let err = normalize_key(bad).unwrap_err();
			assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
		}

		assert!(normalize_key(&"k".repeat(256)).is_err());
	}
}
