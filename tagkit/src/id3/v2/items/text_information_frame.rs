use crate::error::Result;
use crate::id3::v2::frame::content::split_encoding;
use crate::id3::v2::frame::verify_encoding_for_version;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::FrameFlags;
use crate::util::text::{TextEncoding, decode_text};

/// An `ID3v2` text frame
///
/// The text is kept as it was read, and is only decoded through [`TextInformationFrame::text`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextInformationFrame {
	/// The frame flags
	pub flags: FrameFlags,
	/// The encoding of the text
	pub encoding: TextEncoding,
	/// The encoded text, without the encoding byte
	pub value: Vec<u8>,
}

impl TextInformationFrame {
	/// Create a new [`TextInformationFrame`], encoding `value` with `encoding`
	///
	/// # Errors
	///
	/// * `value` can't be represented in `encoding`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::id3::v2::TextInformationFrame;
	/// use tagkit::TextEncoding;
	///
	/// # fn main() -> tagkit::error::Result<()> {
	/// let frame = TextInformationFrame::new(TextEncoding::Latin1, "Foo")?;
	/// assert_eq!(frame.value, b"Foo");
	/// assert_eq!(frame.text(), "Foo");
	///
	/// assert!(TextInformationFrame::new(TextEncoding::Latin1, "\u{65e5}").is_err());
	/// # Ok(()) }
	/// ```
	pub fn new(encoding: TextEncoding, value: &str) -> Result<Self> {
		Ok(Self {
			flags: FrameFlags::default(),
			encoding,
			value: encoding.encode(value, false)?,
		})
	}

	/// Decode the text
	///
	/// Anything that can't be decoded in the frame's encoding is replaced with U+FFFD.
	pub fn text(&self) -> String {
		decode_text(&self.value, self.encoding)
	}

	/// Read a [`TextInformationFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The content is empty
	/// * The encoding byte is invalid
	pub fn parse(content: &[u8], flags: FrameFlags) -> Result<Self> {
		let (encoding, content) = split_encoding(content)?;

		Ok(Self {
			flags,
			encoding,
			value: content.to_vec(),
		})
	}

	/// Convert a [`TextInformationFrame`] to a byte vec
	///
	/// NOTE: This does not include a frame header
	///
	/// # Errors
	///
	/// * The encoding is not supported by `version`
	pub fn as_bytes(&self, version: Id3v2Version) -> Result<Vec<u8>> {
		verify_encoding_for_version(self.encoding, version)?;

		let mut bytes = vec![self.encoding as u8];
		bytes.extend(&self.value);
		Ok(bytes)
	}
}
