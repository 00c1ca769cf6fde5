use crate::error::Result;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::FrameFlags;

/// A binary fallback for all unknown `ID3v2` frames
///
/// This is also used for compressed and encrypted frames, which are never decoded.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BinaryFrame {
	/// The frame flags
	pub flags: FrameFlags,
	/// The binary data
	pub data: Vec<u8>,
}

impl BinaryFrame {
	/// Create a new [`BinaryFrame`]
	pub fn new(data: Vec<u8>) -> Self {
		Self {
			flags: FrameFlags::default(),
			data,
		}
	}

	/// Convert a [`BinaryFrame`] to a byte vec
	///
	/// # Errors
	///
	/// This never fails, the signature matches the other frames
	#[allow(clippy::unnecessary_wraps)]
	pub fn as_bytes(&self, _version: Id3v2Version) -> Result<Vec<u8>> {
		Ok(self.data.clone())
	}
}
