use crate::error::Result;
use crate::id3::v2::frame::content::split_encoding;
use crate::id3::v2::frame::verify_encoding_for_version;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::FrameFlags;
use crate::macros::id3v2_err;
use crate::util::text::{TextEncoding, decode_terminated, decode_text};

/// An `ID3v2` comment frame
///
/// Similar to `TXXX` and `WXXX` frames, comments are told apart by their descriptions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommentFrame {
	/// The frame flags
	pub flags: FrameFlags,
	/// The encoding of the description and comment text
	pub encoding: TextEncoding,
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// Unique content description
	pub description: String,
	/// The encoded comment, see [`CommentFrame::text`]
	pub content: Vec<u8>,
}

impl CommentFrame {
	/// The language used for comments created through the setters
	pub const DEFAULT_LANGUAGE: [u8; 3] = *b"eng";

	/// Create a new [`CommentFrame`], encoding `content` with `encoding`
	///
	/// # Errors
	///
	/// * `content` can't be represented in `encoding`
	pub fn new(
		encoding: TextEncoding,
		language: [u8; 3],
		description: String,
		content: &str,
	) -> Result<Self> {
		Ok(Self {
			flags: FrameFlags::default(),
			encoding,
			language,
			description,
			content: encoding.encode(content, false)?,
		})
	}

	/// Decode the comment
	pub fn text(&self) -> String {
		decode_text(&self.content, self.encoding)
	}

	/// Read a [`CommentFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The encoding byte is invalid
	/// * There isn't room for the language code
	/// * The description is not terminated
	pub fn parse(content: &[u8], flags: FrameFlags) -> Result<Self> {
		let (encoding, content) = split_encoding(content)?;

		let Some((language, content)) = content.split_first_chunk::<3>() else {
			id3v2_err!(BadFrameLength);
		};

		let (description, content) = decode_terminated(content, encoding)?;

		Ok(Self {
			flags,
			encoding,
			language: *language,
			description,
			content: content.to_vec(),
		})
	}

	/// Convert a [`CommentFrame`] to a byte vec
	///
	/// NOTE: This does not include a frame header
	///
	/// # Errors
	///
	/// * The encoding is not supported by `version`
	/// * `language` contains invalid characters (Only `'a'..='z'` and `'A'..='Z'` allowed)
	/// * The description can't be represented in the encoding
	pub fn as_bytes(&self, version: Id3v2Version) -> Result<Vec<u8>> {
		verify_encoding_for_version(self.encoding, version)?;

		if self.language.iter().any(|c| !c.is_ascii_alphabetic()) {
			id3v2_err!(InvalidLanguage(self.language));
		}

		let mut bytes = vec![self.encoding as u8];
		bytes.extend(self.language);
		bytes.extend(self.encoding.encode(&self.description, true)?);
		bytes.extend(&self.content);
		Ok(bytes)
	}
}
