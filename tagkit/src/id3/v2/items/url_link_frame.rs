use crate::error::Result;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::FrameFlags;
use crate::util::text::{latin1_decode, latin1_encode};

/// An `ID3v2` URL frame
///
/// URLs are always ISO-8859-1.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UrlLinkFrame {
	/// The frame flags
	pub flags: FrameFlags,
	/// The URL
	pub content: String,
}

impl UrlLinkFrame {
	/// Create a new [`UrlLinkFrame`]
	pub fn new(content: String) -> Self {
		Self {
			flags: FrameFlags::default(),
			content,
		}
	}

	/// Read a [`UrlLinkFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	pub fn parse(content: &[u8], flags: FrameFlags) -> Self {
		Self {
			flags,
			content: latin1_decode(content),
		}
	}

	/// Convert a [`UrlLinkFrame`] to a byte vec
	///
	/// NOTE: This does not include a frame header
	///
	/// # Errors
	///
	/// The URL can't be represented in ISO-8859-1
	pub fn as_bytes(&self, _version: Id3v2Version) -> Result<Vec<u8>> {
		latin1_encode(&self.content)
	}
}
