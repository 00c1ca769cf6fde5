use super::frame::read::ParsedFrame;
use super::header::Id3v2Header;
use super::tag::Id3v2Tag;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::err;
use crate::util::io::SeekStreamLen;

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

pub(crate) fn parse_id3v2<R>(
	bytes: &mut R,
	header: Id3v2Header,
	parse_options: ParseOptions,
) -> Result<Id3v2Tag>
where
	R: Read,
{
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	let mut tag = Id3v2Tag::new(header.version);
	let mut remaining = header.frames_size();

	while remaining > 0 {
		match ParsedFrame::read(bytes, header.version, &mut remaining, parse_options)? {
			ParsedFrame::Next(id, frame) => tag.insert_frame(id, frame),
			// Frame content was ignored, due to errors or `ParseOptions::read_cover_art`
			ParsedFrame::Skip => {},
			// Padding, or no room for another frame
			ParsedFrame::Eof => break,
		}
	}

	Ok(tag)
}

impl Id3v2Tag {
	/// Read an `Id3v2Tag` from the start of `reader`
	///
	/// # Errors
	///
	/// * [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound), there is no "ID3" marker
	/// * [`ErrorKind::SizeMismatch`](crate::error::ErrorKind::SizeMismatch), the tag claims to
	///   be larger than the stream
	/// * Any header error, see [`Id3v2ErrorKind`](crate::error::Id3v2ErrorKind)
	/// * With [`ParsingMode::Strict`](crate::config::ParsingMode::Strict), any frame error
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		reader.rewind()?;

		let stream_len = reader.stream_len_hack()?;
		if stream_len < 10 {
			err!(NotFound);
		}

		let header = Id3v2Header::parse(reader)?;
		if header.full_tag_size() > stream_len {
			log::debug!(
				"ID3v2 tag claims a size of {}, stream is only {} bytes",
				header.full_tag_size(),
				stream_len
			);
			err!(SizeMismatch);
		}

		let tag = parse_id3v2(reader, header, parse_options)?;

		// Leave the reader at the end of the tag, past any padding
		reader.seek(SeekFrom::Start(header.full_tag_size()))?;

		Ok(tag)
	}

	/// Read an `Id3v2Tag` from the file at `path`
	///
	/// # Errors
	///
	/// See [`Id3v2Tag::read_from`]
	pub fn read_from_path<P>(path: P, parse_options: ParseOptions) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let mut file = File::open(path)?;
		Self::read_from(&mut file, parse_options)
	}

	/// Parse a complete tag, starting with its header
	///
	/// # Errors
	///
	/// See [`Id3v2Tag::read_from`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::config::ParseOptions;
	/// use tagkit::id3::v2::{Id3v2Tag, Id3v2Version};
	/// use tagkit::prelude::*;
	///
	/// # fn main() -> tagkit::error::Result<()> {
	/// let mut tag = Id3v2Tag::new(Id3v2Version::V3);
	/// tag.set_title(String::from("Foo title"))?;
	///
	/// let bytes = tag.as_bytes()?;
	/// let parsed = Id3v2Tag::parse(&bytes, ParseOptions::new())?;
	/// assert_eq!(parsed.title().as_deref(), Some("Foo title"));
	/// # Ok(()) }
	/// ```
	pub fn parse(bytes: &[u8], parse_options: ParseOptions) -> Result<Self> {
		Self::read_from(&mut Cursor::new(bytes), parse_options)
	}
}
