use crate::error::Result;
use crate::id3::v2::frame::content::split_encoding;
use crate::id3::v2::frame::verify_encoding_for_version;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::FrameFlags;
use crate::util::text::{TextEncoding, decode_terminated, latin1_decode, latin1_encode};

/// An extended `ID3v2` URL frame
///
/// This is used in the `WXXX` frame, where the frames
/// are told apart by descriptions, rather than their [`FrameId`](crate::id3::v2::FrameId)s.
///
/// The encoding only applies to the description, the URL is always ISO-8859-1.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedUrlFrame {
	/// The frame flags
	pub flags: FrameFlags,
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// Unique content description
	pub description: String,
	/// The URL
	pub content: String,
}

impl ExtendedUrlFrame {
	/// Create a new [`ExtendedUrlFrame`]
	pub fn new(encoding: TextEncoding, description: String, content: String) -> Self {
		Self {
			flags: FrameFlags::default(),
			encoding,
			description,
			content,
		}
	}

	/// Read an [`ExtendedUrlFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The encoding byte is invalid
	/// * The description is not terminated
	/// * Unable to decode the description
	pub fn parse(content: &[u8], flags: FrameFlags) -> Result<Self> {
		let (encoding, content) = split_encoding(content)?;
		let (description, content) = decode_terminated(content, encoding)?;

		Ok(Self {
			flags,
			encoding,
			description,
			content: latin1_decode(content),
		})
	}

	/// Convert an [`ExtendedUrlFrame`] to a byte vec
	///
	/// NOTE: This does not include a frame header
	///
	/// # Errors
	///
	/// * The encoding is not supported by `version`
	/// * The description can't be represented in the encoding
	/// * The URL can't be represented in ISO-8859-1
	pub fn as_bytes(&self, version: Id3v2Version) -> Result<Vec<u8>> {
		verify_encoding_for_version(self.encoding, version)?;

		let mut bytes = vec![self.encoding as u8];
		bytes.extend(self.encoding.encode(&self.description, true)?);
		bytes.extend(latin1_encode(&self.content)?);
		Ok(bytes)
	}
}
