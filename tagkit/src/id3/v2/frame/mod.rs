pub(super) mod content;
pub(super) mod header;
pub(super) mod read;

use super::header::Id3v2Version;
use super::items::{
	AttachedPictureFrame, BinaryFrame, CommentFrame, ExtendedTextFrame, ExtendedUrlFrame,
	TextInformationFrame, UrlLinkFrame,
};
use crate::error::Result;
use crate::macros::err;
use crate::util::text::TextEncoding;

use std::borrow::Cow;

macro_rules! define_frames {
	(
		$(#[$meta:meta])*
		pub enum Frame {
			$(
				$(#[$field_meta:meta])+
				$variant:ident($type:ty),
			)*
		}
	) => {
		$(#[$meta])*
		pub enum Frame {
			$(
				$(#[$field_meta])+
				$variant($type),
			)*
		}

		impl Frame {
			/// Get the flags for the frame
			pub fn flags(&self) -> FrameFlags {
				match self {
					$(
						Frame::$variant(frame) => frame.flags,
					)*
				}
			}

			/// Set the flags for the frame
			pub fn set_flags(&mut self, flags: FrameFlags) {
				match self {
					$(
						Frame::$variant(frame) => frame.flags = flags,
					)*
				}
			}

			/// Convert the frame content to bytes for the given `version`
			///
			/// NOTE: This does not include a frame header
			///
			/// # Errors
			///
			/// * The frame's text encoding is not supported by `version`
			/// * The content can't be represented in the frame's text encoding
			/// * The frame content is too large
			pub fn as_bytes(&self, version: Id3v2Version) -> Result<Vec<u8>> {
				let bytes = match self {
					$(
						Frame::$variant(frame) => frame.as_bytes(version)?,
					)*
				};

				if bytes.len() as u64 > u64::from(u32::MAX) {
					err!(TooMuchData);
				}

				Ok(bytes)
			}
		}

		$(
			impl From<$type> for Frame {
				fn from(value: $type) -> Self {
					Frame::$variant(value)
				}
			}
		)*
	}
}

define_frames! {
	/// Represents an `ID3v2` frame
	///
	/// The frame ID is not stored in the frame itself, it is the key the frame is stored under
	/// in an [`Id3v2Tag`](crate::id3::v2::Id3v2Tag).
	///
	/// Any frame without a dedicated decoder is kept as a [`Frame::Generic`], with its content
	/// preserved byte for byte.
	#[derive(Clone, Debug, PartialEq, Eq, Hash)]
	pub enum Frame {
		/// Represents a "T..." (excluding TXXX/TXX) frame
		Text(TextInformationFrame),
		/// Represents a "TXXX"/"TXX" frame
		UserText(ExtendedTextFrame),
		/// Represents a "W..." (excluding WXXX/WXX) frame
		Url(UrlLinkFrame),
		/// Represents a "WXXX"/"WXX" frame
		UserUrl(ExtendedUrlFrame),
		/// Represents a "COMM"/"COM" frame
		Comment(CommentFrame),
		/// Represents an "APIC"/"PIC" frame
		Picture(AttachedPictureFrame),
		/// Any other frame, kept as raw bytes
		Generic(BinaryFrame),
	}
}

impl Frame {
	/// The text encoding of the frame, if it has one
	pub fn encoding(&self) -> Option<TextEncoding> {
		match self {
			Frame::Text(f) => Some(f.encoding),
			Frame::UserText(f) => Some(f.encoding),
			Frame::UserUrl(f) => Some(f.encoding),
			Frame::Comment(f) => Some(f.encoding),
			Frame::Picture(f) => Some(f.encoding),
			Frame::Url(_) | Frame::Generic(_) => None,
		}
	}

	/// The primary text of the frame, for frames that carry one
	///
	/// * [`Frame::Text`]: the value
	/// * [`Frame::UserText`] and [`Frame::Comment`]: the content
	/// * [`Frame::Url`] and [`Frame::UserUrl`]: the URL
	pub fn text(&self) -> Option<Cow<'_, str>> {
		match self {
			Frame::Text(f) => Some(Cow::Owned(f.text())),
			Frame::UserText(f) => Some(Cow::Owned(f.text())),
			Frame::Url(f) => Some(Cow::Borrowed(&f.content)),
			Frame::UserUrl(f) => Some(Cow::Borrowed(&f.content)),
			Frame::Comment(f) => Some(Cow::Owned(f.text())),
			Frame::Picture(_) | Frame::Generic(_) => None,
		}
	}
}

/// The raw 16-bit flags of an ID3v2.3/ID3v2.4 frame
///
/// The layout of these bits differs between versions, so they are kept as-is and written back
/// unchanged. ID3v2.2 frames have no flags.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameFlags(u16);

impl FrameFlags {
	/// Create a `FrameFlags` from the raw bits
	pub const fn new(raw: u16) -> Self {
		Self(raw)
	}

	/// The raw bits
	pub const fn raw(self) -> u16 {
		self.0
	}

	/// Whether the frame content is compressed
	pub fn compressed(self, version: Id3v2Version) -> bool {
		match version {
			Id3v2Version::V2 => false,
			Id3v2Version::V3 => self.0 & 0x0080 != 0,
			Id3v2Version::V4 => self.0 & 0x0008 != 0,
		}
	}

	/// Whether the frame content is encrypted
	pub fn encrypted(self, version: Id3v2Version) -> bool {
		match version {
			Id3v2Version::V2 => false,
			Id3v2Version::V3 => self.0 & 0x0040 != 0,
			Id3v2Version::V4 => self.0 & 0x0004 != 0,
		}
	}

	/// The number of bytes that precede the frame content
	///
	/// These are the group identifier, encryption method, and data length fields.
	pub(crate) fn extra_header_len(self, version: Id3v2Version) -> u32 {
		let mut len = 0;
		match version {
			Id3v2Version::V2 => {},
			Id3v2Version::V3 => {
				// Decompressed size, encryption method, group
				if self.0 & 0x0080 != 0 {
					len += 4;
				}
				if self.0 & 0x0040 != 0 {
					len += 1;
				}
				if self.0 & 0x0020 != 0 {
					len += 1;
				}
			},
			Id3v2Version::V4 => {
				// Group, encryption method, data length indicator
				if self.0 & 0x0040 != 0 {
					len += 1;
				}
				if self.0 & 0x0004 != 0 {
					len += 1;
				}
				if self.0 & 0x0001 != 0 {
					len += 4;
				}
			},
		}

		len
	}

	/// Clear the bits describing the fields counted by [`FrameFlags::extra_header_len`]
	///
	/// Used once those fields have been stripped from the content.
	pub(crate) fn without_extra_fields(self, version: Id3v2Version) -> Self {
		match version {
			Id3v2Version::V2 => self,
			Id3v2Version::V3 => Self(self.0 & !0x00E0),
			Id3v2Version::V4 => Self(self.0 & !0x0045),
		}
	}
}

/// Verify that `encoding` can be used in a frame for the given `version`
///
/// UTF-16BE and UTF-8 were introduced in ID3v2.4.
pub(crate) fn verify_encoding_for_version(
	encoding: TextEncoding,
	version: Id3v2Version,
) -> Result<()> {
	if version != Id3v2Version::V4
		&& matches!(encoding, TextEncoding::UTF8 | TextEncoding::UTF16BE)
	{
		log::debug!(
			"{encoding:?} is not supported in ID3v2.{}",
			version.major()
		);
		err!(InvalidEncoding);
	}

	Ok(())
}
