use crate::error::Result;
use crate::id3::v2::frame::content::split_encoding;
use crate::id3::v2::frame::verify_encoding_for_version;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::FrameFlags;
use crate::util::text::{TextEncoding, decode_terminated, decode_text};

/// An extended `ID3v2` text frame
///
/// This is used in the `TXXX` frame, where the frames
/// are told apart by descriptions, rather than their [`FrameId`](crate::id3::v2::FrameId)s.
/// This means for each `ExtendedTextFrame` in the tag, the description
/// must be unique.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedTextFrame {
	/// The frame flags
	pub flags: FrameFlags,
	/// The encoding of the description and comment text
	pub encoding: TextEncoding,
	/// Unique content description
	pub description: String,
	/// The encoded content, see [`ExtendedTextFrame::text`]
	pub content: Vec<u8>,
}

impl ExtendedTextFrame {
	/// Create a new [`ExtendedTextFrame`], encoding `content` with `encoding`
	///
	/// # Errors
	///
	/// * `content` can't be represented in `encoding`
	pub fn new(encoding: TextEncoding, description: String, content: &str) -> Result<Self> {
		Ok(Self {
			flags: FrameFlags::default(),
			encoding,
			description,
			content: encoding.encode(content, false)?,
		})
	}

	/// Decode the content
	pub fn text(&self) -> String {
		decode_text(&self.content, self.encoding)
	}

	/// Read an [`ExtendedTextFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The encoding byte is invalid
	/// * The description is not terminated
	pub fn parse(content: &[u8], flags: FrameFlags) -> Result<Self> {
		let (encoding, content) = split_encoding(content)?;
		let (description, content) = decode_terminated(content, encoding)?;

		Ok(Self {
			flags,
			encoding,
			description,
			content: content.to_vec(),
		})
	}

	/// Convert an [`ExtendedTextFrame`] to a byte vec
	///
	/// NOTE: This does not include a frame header
	///
	/// # Errors
	///
	/// * The encoding is not supported by `version`
	/// * The description can't be represented in the encoding
	pub fn as_bytes(&self, version: Id3v2Version) -> Result<Vec<u8>> {
		verify_encoding_for_version(self.encoding, version)?;

		let mut bytes = vec![self.encoding as u8];
		bytes.extend(self.encoding.encode(&self.description, true)?);
		bytes.extend(&self.content);
		Ok(bytes)
	}
}
