use std::borrow::Cow;

/// Represents an `ilst` item
///
/// The value is the payload of the item's `data` atom, with the type and locale header removed.
/// Text items are UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Atom {
	/// The `mean.name` identifier of a freeform (`----`) item
	pub long_name: Option<String>,
	/// The raw item value
	pub data: Vec<u8>,
}

impl Atom {
	/// Create an [`Atom`] from its raw value
	pub fn new(data: Vec<u8>) -> Self {
		Self {
			long_name: None,
			data,
		}
	}

	/// Create a freeform [`Atom`]
	///
	/// `long_name` is the item's reverse DNS style name, such as `com.apple.iTunes.SUBTITLE`.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::mp4::Atom;
	///
	/// let atom = Atom::freeform(String::from("com.apple.iTunes.MOOD"), b"Calm".to_vec());
	/// assert_eq!(atom.long_name.as_deref(), Some("com.apple.iTunes.MOOD"));
	/// ```
	pub fn freeform(long_name: String, data: Vec<u8>) -> Self {
		Self {
			long_name: Some(long_name),
			data,
		}
	}

	/// Create a text [`Atom`]
	pub fn text(value: String) -> Self {
		Self::new(value.into_bytes())
	}

	/// The value as text
	///
	/// Invalid UTF-8 sequences are replaced.
	pub fn as_text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.data)
	}
}
