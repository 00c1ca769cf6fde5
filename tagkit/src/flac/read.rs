use super::block::{BLOCK_ID_PICTURE, BLOCK_ID_VORBIS_COMMENTS, Block};
use super::tag::{FlacTag, verify_key};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::macros::{err, parse_mode_choice};
use crate::picture::Picture;

use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

const FLAC_MARKER: &[u8; 4] = b"fLaC";

// The block is fully in memory, running out of it is a size error rather than an I/O one
fn read_u32(reader: &mut &[u8]) -> Result<u32> {
	let remaining: &[u8] = *reader;
	let Some((bytes, rest)) = remaining.split_first_chunk::<4>() else {
		log::debug!("Vorbis comment block ends in the middle of a length");
		err!(SizeMismatch);
	};

	*reader = rest;
	Ok(LittleEndian::read_u32(bytes))
}

// [u32 LE length][bytes], with the length checked against what's left
fn read_field<'a>(reader: &mut &'a [u8]) -> Result<&'a [u8]> {
	let len = read_u32(reader)? as usize;
	if len > reader.len() {
		err!(SizeMismatch);
	}

	let remaining: &'a [u8] = *reader;
	let (field, rest) = remaining.split_at(len);
	*reader = rest;

	Ok(field)
}

// `None` when the field should be discarded
fn decode_field(bytes: &[u8], parse_mode: ParsingMode) -> Result<Option<Cow<'_, str>>> {
	match std::str::from_utf8(bytes) {
		Ok(text) => Ok(Some(Cow::Borrowed(text))),
		Err(e) => {
			parse_mode_choice!(
				parse_mode,
				STRICT: return Err(e.into()),
				RELAXED: {
					log::warn!("Vorbis comment field is not valid UTF-8, discarding");
					return Ok(None);
				},
				DEFAULT: log::warn!("Vorbis comment field is not valid UTF-8, decoding lossily")
			);

			Ok(Some(String::from_utf8_lossy(bytes)))
		},
	}
}

/// Parse a `VORBIS_COMMENT` block body into `tag`
pub(crate) fn read_comments(
	tag: &mut FlacTag,
	mut content: &[u8],
	parse_mode: ParsingMode,
) -> Result<()> {
	let reader = &mut content;

	let vendor = read_field(reader)?;
	tag.vendor = decode_field(vendor, parse_mode)?
		.map(Cow::into_owned)
		.unwrap_or_default();

	let number_of_items = read_u32(reader)?;

	// Every comment needs at least 4 bytes for its length
	if number_of_items as usize > reader.len() >> 2 {
		err!(SizeMismatch);
	}

	for _ in 0..number_of_items {
		let comment = read_field(reader)?;

		// KEY=VALUE
		let Some(separator) = comment.iter().position(|&b| b == b'=') else {
			log::warn!("No separator found in field, discarding");
			continue;
		};

		let (key, value) = (&comment[..separator], &comment[separator + 1..]);
		if !verify_key(key) {
			parse_mode_choice!(
				parse_mode,
				STRICT: err!(TextDecode("Vorbis comment has an invalid field name")),
				DEFAULT: {
					log::warn!("Vorbis comment has an invalid field name, discarding");
					continue;
				}
			);
		}

		// Keys are verified to be ASCII
		let key = String::from_utf8_lossy(key).to_ascii_lowercase();
		let Some(value) = decode_field(value, parse_mode)? else {
			continue;
		};

		tag.items.insert(key, value.into_owned());
	}

	if !reader.is_empty() {
		log::debug!("Vorbis comment block has {} trailing bytes", reader.len());
	}

	Ok(())
}

pub(crate) fn read_from<R>(data: &mut R, parse_options: ParseOptions) -> Result<FlacTag>
where
	R: Read + Seek,
{
	let mut marker = [0; 4];
	if data.read_exact(&mut marker).is_err() || &marker != FLAC_MARKER {
		log::debug!("Stream missing \"fLaC\" marker");
		err!(NotFound);
	}

	log::debug!("Stream verified to be FLAC");

	let parse_mode = parse_options.parsing_mode;

	let mut tag = FlacTag::default();
	let mut found_comments = false;
	let mut found_pictures = false;

	loop {
		let block = Block::read(data, |block_type| {
			block_type == BLOCK_ID_VORBIS_COMMENTS
				|| (block_type == BLOCK_ID_PICTURE && parse_options.read_cover_art)
		})?;

		match block.ty {
			BLOCK_ID_VORBIS_COMMENTS => {
				log::debug!("Encountered a Vorbis Comments block, parsing");

				// Only one is allowed per stream, we keep adding to the same tag regardless
				if found_comments {
					log::warn!("Stream has multiple Vorbis Comments blocks");
				}

				read_comments(&mut tag, &block.content, parse_mode)?;
				found_comments = true;
			},
			BLOCK_ID_PICTURE => {
				found_pictures = true;

				if !parse_options.read_cover_art {
					log::debug!("Skipping FLAC picture block");
				} else {
					log::debug!("Encountered a FLAC picture block, parsing");

					match Picture::from_flac_bytes(&block.content, parse_mode) {
						Ok(picture) => tag.pictures.push(picture),
						Err(e) => {
							if parse_mode == ParsingMode::Strict {
								return Err(e);
							}

							log::warn!("Unable to read FLAC picture block, discarding");
						},
					}
				}
			},
			_ => {},
		}

		if block.last {
			break;
		}
	}

	if !found_comments && !found_pictures {
		log::debug!("FLAC stream has no Vorbis Comments or picture blocks");
		err!(NotFound);
	}

	Ok(tag)
}

impl FlacTag {
	/// Read the metadata from a FLAC stream
	///
	/// The reader is rewound first, and is left after the last metadata block.
	///
	/// # Errors
	///
	/// * [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound): The stream is not FLAC, or has no Vorbis
	///   Comments or picture blocks
	/// * [`ErrorKind::SizeMismatch`](crate::error::ErrorKind::SizeMismatch): A block, or a field within a block,
	///   claims more data than available
	/// * A field or picture is invalid, with [`ParsingMode::Strict`]
	/// * [`std::io::Error`]
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		reader.seek(SeekFrom::Start(0))?;
		read_from(reader, parse_options)
	}

	/// Read the metadata from a FLAC file
	///
	/// # Errors
	///
	/// See [`FlacTag::read_from`]
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use tagkit::config::ParseOptions;
	/// use tagkit::flac::FlacTag;
	///
	/// # fn main() -> tagkit::error::Result<()> {
	/// let flac_tag = FlacTag::read_from_path("test.flac", ParseOptions::new())?;
	/// println!("Vendor: {}", flac_tag.vendor());
	/// # Ok(()) }
	/// ```
	pub fn read_from_path<P>(path: P, parse_options: ParseOptions) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let mut file = File::open(path)?;
		Self::read_from(&mut file, parse_options)
	}
}

#[cfg(test)]
mod tests {
	use crate::config::{ParseOptions, ParsingMode};
	use crate::error::ErrorKind;
	use crate::flac::FlacTag;
	use crate::picture::{MimeType, Picture, PictureType};
	use crate::tag::Accessor;
	use crate::util::text::TextEncoding;

	use std::io::Cursor;

	fn block(ty: u8, last: bool, content: &[u8]) -> Vec<u8> {
		let mut block = vec![ty | if last { 0x80 } else { 0 }];
		block.extend(&(content.len() as u32).to_be_bytes()[1..]);
		block.extend(content);
		block
	}

	fn comments(vendor: &[u8], fields: &[&[u8]]) -> Vec<u8> {
		let mut content = Vec::new();
		content.extend((vendor.len() as u32).to_le_bytes());
		content.extend(vendor);
		content.extend((fields.len() as u32).to_le_bytes());
		for field in fields {
			content.extend((field.len() as u32).to_le_bytes());
			content.extend(*field);
		}
		content
	}

	fn stream(blocks: &[Vec<u8>]) -> Cursor<Vec<u8>> {
		let mut data = b"fLaC".to_vec();
		// STREAMINFO
		data.extend(block(0, false, &[0; 34]));
		for b in blocks {
			data.extend(b);
		}
		// Some audio data
		data.extend([0xFF, 0xF8, 0x00]);
		Cursor::new(data)
	}

	fn strict() -> ParseOptions {
		ParseOptions::new().parsing_mode(ParsingMode::Strict)
	}

	#[test_log::test]
	fn read_comments_and_pictures() {
		let picture = Picture::unchecked(vec![0xFF, 0xD8, 0xFF])
			.pic_type(PictureType::CoverFront)
			.mime_type(MimeType::Jpeg)
			.description("Front")
			.description_encoding(TextEncoding::UTF8)
			.build();

		let mut data = stream(&[
			block(
				4,
				false,
				&comments(
					b"reference libFLAC 1.4.3",
					&[b"TITLE=Foo title", b"Artist=Foo", b"ARTIST=Bar", b"TRACKNUMBER=2/9", b"junk"],
				),
			),
			block(6, false, &picture.as_flac_bytes().unwrap()),
			block(1, true, &[0; 16]),
		]);

		let tag = FlacTag::read_from(&mut data, strict()).unwrap();
		assert_eq!(tag.vendor(), "reference libFLAC 1.4.3");
		assert_eq!(tag.title().as_deref(), Some("Foo title"));
		assert_eq!(tag.get_all("artist"), ["Foo", "Bar"]);
		assert_eq!(tag.track(), Some(2));
		assert_eq!(tag.len(), 4);
		assert_eq!(tag.pictures(), [picture]);

		let tag = FlacTag::read_from(&mut data, strict().read_cover_art(false)).unwrap();
		assert!(tag.pictures().is_empty());
		assert_eq!(tag.len(), 4);
	}

	#[test_log::test]
	fn value_with_separator() {
		let mut data = stream(&[block(4, true, &comments(b"", &[b"COMMENT=a=b"]))]);

		let tag = FlacTag::read_from(&mut data, strict()).unwrap();
		assert_eq!(tag.comment().as_deref(), Some("a=b"));
	}

	#[test_log::test]
	fn only_padding() {
		let mut data = stream(&[block(1, true, &[0; 8])]);

		let err = FlacTag::read_from(&mut data, strict()).unwrap_err();
		assert!(err.is_not_found());
	}

	#[test_log::test]
	fn not_flac() {
		let err = FlacTag::read_from(&mut Cursor::new(b"OggS".to_vec()), strict()).unwrap_err();
		assert!(err.is_not_found());

		let err = FlacTag::read_from(&mut Cursor::new(Vec::new()), strict()).unwrap_err();
		assert!(err.is_not_found());
	}

	#[test_log::test]
	fn invalid_utf8() {
		let mut data = stream(&[block(4, true, &comments(b"", &[b"TITLE=Caf\xE9"]))]);

		let err = FlacTag::read_from(&mut data, strict()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::StrFromUtf8(_)));

		let tag = FlacTag::read_from(
			&mut data,
			ParseOptions::new().parsing_mode(ParsingMode::BestAttempt),
		)
		.unwrap();
		assert_eq!(tag.title().as_deref(), Some("Caf\u{FFFD}"));

		let tag = FlacTag::read_from(
			&mut data,
			ParseOptions::new().parsing_mode(ParsingMode::Relaxed),
		)
		.unwrap();
		assert!(tag.title().is_none());
	}

	#[test_log::test]
	fn truncated_length() {
		// The vendor, followed by 2 bytes of the comment count
		let mut content = comments(b"vendor", &[]);
		content.truncate(content.len() - 2);

		let mut data = stream(&[block(4, true, &content)]);

		let err = FlacTag::read_from(&mut data, strict()).unwrap_err();
		assert!(!err.is_io());
		assert!(matches!(err.kind(), ErrorKind::SizeMismatch));
	}

	#[test_log::test]
	fn default_options_keep_the_tag() {
		let mut data = stream(&[block(
			4,
			true,
			&comments(b"", &[b"TITLE=Caf\xE9", b"AR\x01TIST=Bad key", b"ALBUM=Foo album"]),
		)]);

		let tag = FlacTag::read_from(&mut data, ParseOptions::new()).unwrap();
		assert_eq!(tag.title().as_deref(), Some("Caf\u{FFFD}"));
		assert_eq!(tag.album().as_deref(), Some("Foo album"));
		assert_eq!(tag.len(), 2);
	}

	#[test_log::test]
	fn field_longer_than_block() {
		let mut content = comments(b"", &[b"TITLE=Foo"]);
		// Claim a 255 byte field
		content[8] = 0xFF;

		let mut data = stream(&[block(4, true, &content)]);

		let err = FlacTag::read_from(&mut data, strict()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::SizeMismatch));
	}

	#[test_log::test]
	fn bad_picture_type() {
		let mut picture = Picture::unchecked(vec![1, 2, 3])
			.build()
			.as_flac_bytes()
			.unwrap();
		picture[3] = 21;

		let mut data = stream(&[block(6, true, &picture)]);

		let err = FlacTag::read_from(&mut data, strict()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::NotAPicture));

		// Still counts as metadata, even though the picture was discarded
		let tag = FlacTag::read_from(
			&mut data,
			ParseOptions::new().parsing_mode(ParsingMode::Relaxed),
		)
		.unwrap();
		assert!(tag.pictures().is_empty());
	}
}
