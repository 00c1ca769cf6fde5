use super::ApeTag;
use super::item::{ApeItem, ApeItemType, is_key_byte};
use crate::ape::constants::{
	APE_FOOTER_SIZE, APE_PICTURE_KEY_PREFIX, APE_PREAMBLE, APE_VERSION, MIN_KEY_LEN,
};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v1::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};
use crate::macros::{decode_err, err, parse_mode_choice};
use crate::util::alloc::read_exact_vec;
use crate::util::io::seek_from_end;

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};

// The size of an item's value size and flags
const ITEM_HEADER_SIZE: u32 = 8;

#[derive(Copy, Clone, Debug)]
pub(crate) struct ApeFooter {
	pub(crate) size: u32,
	pub(crate) item_count: u32,
	/// The stream position directly after the footer
	pub(crate) end: u64,
}

/// Search for the footer at the end of the stream, or right before an ID3v1 tag
fn find_footer<R>(reader: &mut R) -> Result<bool>
where
	R: Read + Seek,
{
	let footer_size = u64::from(APE_FOOTER_SIZE);

	if check_preamble(reader, footer_size)? {
		log::debug!("Found an APE tag footer at the end of the stream");
		return Ok(true);
	}

	if !seek_from_end(reader, ID3V1_TAG_SIZE)? {
		return Ok(false);
	}

	let mut id3v1_marker = [0; 3];
	reader.read_exact(&mut id3v1_marker)?;

	if id3v1_marker != ID3V1_TAG_MARKER {
		return Ok(false);
	}

	if check_preamble(reader, ID3V1_TAG_SIZE + footer_size)? {
		log::debug!("Found an APE tag footer preceding an ID3v1 tag");
		return Ok(true);
	}

	Ok(false)
}

fn check_preamble<R>(reader: &mut R, offset: u64) -> Result<bool>
where
	R: Read + Seek,
{
	if !seek_from_end(reader, offset)? {
		return Ok(false);
	}

	let mut preamble = [0; 8];
	reader.read_exact(&mut preamble)?;

	Ok(&preamble == APE_PREAMBLE)
}

/// Read the footer, with the reader positioned directly after the preamble
pub(crate) fn read_ape_footer<R>(reader: &mut R) -> Result<ApeFooter>
where
	R: Read + Seek,
{
	let version = reader.read_u32::<LittleEndian>()?;
	if version != APE_VERSION {
		log::debug!("Found an APE tag with an unsupported version: {version}");
		err!(FakeTag);
	}

	let size = reader.read_u32::<LittleEndian>()?;
	let item_count = reader.read_u32::<LittleEndian>()?;

	// Flags and reserved bytes, nothing here depends on them
	reader.seek(SeekFrom::Current(12))?;

	let end = reader.stream_position()?;

	// The size includes the footer, but not the header
	if size < APE_FOOTER_SIZE || u64::from(size) > end {
		log::debug!("APE tag size ({size}) doesn't fit in the stream");
		err!(SizeMismatch);
	}

	Ok(ApeFooter {
		size,
		item_count,
		end,
	})
}

pub(crate) fn parse_ape_items(
	mut content: &[u8],
	footer: ApeFooter,
	parse_options: ParseOptions,
) -> Result<ApeTag> {
	let parse_mode = parse_options.parsing_mode;

	let mut tag = ApeTag::default();
	let mut remaining = footer.size;
	let mut item_count = 0;

	while remaining > APE_FOOTER_SIZE {
		let Some((item_header, rest)) = content.split_first_chunk::<8>() else {
			log::debug!("APE tag ends in the middle of an item header");
			err!(SizeMismatch);
		};
		content = rest;

		let value_size = LittleEndian::read_u32(&item_header[..4]);
		let flags = LittleEndian::read_u32(&item_header[4..]);

		let Some(key_len) = content.iter().position(|&b| b == 0) else {
			decode_err!(@BAIL Ape, "APE tag item key is not terminated");
		};

		// The item must leave room for the footer
		let Some(new_remaining) = u32::try_from(key_len + 1)
			.ok()
			.and_then(|key_size| remaining.checked_sub(ITEM_HEADER_SIZE + key_size))
			.and_then(|r| r.checked_sub(value_size))
			.filter(|r| *r >= APE_FOOTER_SIZE)
		else {
			err!(SizeMismatch);
		};

		remaining = new_remaining;

		let key = &content[..key_len];
		content = &content[key_len + 1..];

		let Some((value, rest)) = content.split_at_checked(value_size as usize) else {
			err!(SizeMismatch);
		};
		content = rest;
		item_count += 1;

		if key.len() < MIN_KEY_LEN || !key.iter().copied().all(is_key_byte) {
			parse_mode_choice!(
				parse_mode,
				STRICT: decode_err!(@BAIL Ape, "APE tag item contains an illegal key"),
				DEFAULT: {
					log::warn!("APE tag item contains an illegal key, discarding");
					continue;
				}
			);
		}

		// Keys are printable ASCII, already verified
		let key = String::from_utf8_lossy(key).to_ascii_lowercase();
		let item = ApeItem::new(flags, value.to_vec());

		if !parse_options.read_cover_art
			&& item.item_type() == ApeItemType::Binary
			&& key.starts_with(APE_PICTURE_KEY_PREFIX)
		{
			log::debug!("Skipping APE picture item '{key}'");
			continue;
		}

		tag.items.insert(key, item);
	}

	if item_count != footer.item_count {
		log::warn!(
			"APE tag claims {} items, found {item_count}",
			footer.item_count
		);
	}

	Ok(tag)
}

impl ApeTag {
	/// Read an [`ApeTag`] from a reader
	///
	/// The footer is searched for at the end of the stream, and then directly before a trailing
	/// ID3v1 tag.
	///
	/// # Errors
	///
	/// * [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound): No footer could be found
	/// * [`ErrorKind::FakeTag`](crate::error::ErrorKind::FakeTag): The tag is not APEv2
	/// * [`ErrorKind::SizeMismatch`](crate::error::ErrorKind::SizeMismatch): The tag, or one of its items, claims more data than available
	/// * An item has an invalid key
	/// * [`std::io::Error`]
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use tagkit::ape::ApeTag;
	/// use tagkit::config::ParseOptions;
	/// use std::fs::File;
	///
	/// # fn main() -> tagkit::error::Result<()> {
	/// let mut file = File::open("test.mp3")?;
	/// let ape_tag = ApeTag::read_from(&mut file, ParseOptions::new())?;
	/// # Ok(()) }
	/// ```
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		// The reader is left directly after the preamble
		if !find_footer(reader)? {
			err!(NotFound);
		}

		let footer = read_ape_footer(reader)?;

		let items_start = footer.end - u64::from(footer.size);
		reader.seek(SeekFrom::Start(items_start))?;

		let content = read_exact_vec(reader, u64::from(footer.size - APE_FOOTER_SIZE))?;
		let tag = parse_ape_items(&content, footer, parse_options)?;

		reader.seek(SeekFrom::Start(footer.end))?;
		Ok(tag)
	}

	/// Read an [`ApeTag`] from a file path
	///
	/// # Errors
	///
	/// See [`ApeTag::read_from`]
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
	use crate::ape::{ApeItem, ApeTag};
	use crate::config::{ParseOptions, ParsingMode};
	use crate::error::ErrorKind;
	use crate::tag::Accessor;

	use std::io::Cursor;

	fn build_ape_tag(items: &[(&str, u32, &[u8])]) -> Vec<u8> {
		let mut body = Vec::new();
		for (key, flags, value) in items {
			body.extend((value.len() as u32).to_le_bytes());
			body.extend(flags.to_le_bytes());
			body.extend(key.as_bytes());
			body.push(0);
			body.extend(*value);
		}

		let size = body.len() as u32 + 32;

		let mut tag = body;
		tag.extend(b"APETAGEX");
		tag.extend(2000_u32.to_le_bytes());
		tag.extend(size.to_le_bytes());
		tag.extend((items.len() as u32).to_le_bytes());
		tag.extend(0_u32.to_le_bytes());
		tag.extend([0; 8]);
		tag
	}

	fn read(bytes: Vec<u8>) -> crate::error::Result<ApeTag> {
		ApeTag::read_from(&mut Cursor::new(bytes), ParseOptions::new())
	}

	#[test_log::test]
	fn read_footer_at_end() {
		let mut file = vec![0xFF; 100];
		file.extend(build_ape_tag(&[
			("Title", 0, b"Foo title"),
			("Artist", 0, b"Foo"),
			("ARTIST", 0, b"Bar"),
			("Year", 0, b"2001"),
			("Track", 0, b"4/10"),
		]));

		let tag = read(file).unwrap();
		assert_eq!(tag.title().as_deref(), Some("Foo title"));
		assert_eq!(tag.date().as_deref(), Some("2001"));
		assert_eq!(tag.track(), Some(4));
		assert_eq!(tag.items("artist").len(), 2);
		assert_eq!(tag.artist().as_deref(), Some("Foo"));
	}

	#[test_log::test]
	fn read_footer_before_id3v1() {
		let mut file = build_ape_tag(&[("Album", 0, b"Baz album")]);
		let mut id3v1 = vec![0; 128];
		id3v1[..3].copy_from_slice(b"TAG");
		file.extend(id3v1);

		let tag = read(file).unwrap();
		assert_eq!(tag.album().as_deref(), Some("Baz album"));
	}

	#[test_log::test]
	fn no_footer() {
		let err = read(vec![0; 200]).unwrap_err();
		assert!(err.is_not_found());

		let err = read(vec![0; 10]).unwrap_err();
		assert!(err.is_not_found());
	}

	#[test_log::test]
	fn wrong_version() {
		let mut file = build_ape_tag(&[("Title", 0, b"Foo")]);
		let version_pos = file.len() - 24;
		file[version_pos..version_pos + 4].copy_from_slice(&1000_u32.to_le_bytes());

		let err = read(file).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::FakeTag));
	}

	#[test_log::test]
	fn size_larger_than_stream() {
		let mut file = build_ape_tag(&[("Title", 0, b"Foo")]);
		let size_pos = file.len() - 20;
		file[size_pos..size_pos + 4].copy_from_slice(&5000_u32.to_le_bytes());

		let err = read(file).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::SizeMismatch));
	}

	#[test_log::test]
	fn item_larger_than_tag() {
		let mut file = build_ape_tag(&[("Title", 0, b"Foo")]);
		// Claim a 100 byte value
		file[0] = 100;

		let err = read(file).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::SizeMismatch));
	}

	#[test_log::test]
	fn single_character_key() {
		let tag = read(build_ape_tag(&[("X", 0, b"Foo")])).unwrap();
		assert_eq!(tag.item("x", 0).and_then(ApeItem::as_text).as_deref(), Some("Foo"));
	}

	#[test_log::test]
	fn illegal_key_by_parsing_mode() {
		let file = build_ape_tag(&[("Tab\tKey", 0, b"Foo"), ("Title", 0, b"Bar")]);

		let err = ApeTag::read_from(
			&mut Cursor::new(file.clone()),
			ParseOptions::new().parsing_mode(ParsingMode::Strict),
		)
		.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::FileDecoding(_)));

		let tag = read(file).unwrap();
		assert_eq!(tag.len(), 1);
		assert_eq!(tag.title().as_deref(), Some("Bar"));
	}

	#[test_log::test]
	fn truncated_item_header() {
		let mut file = vec![0xFF; 64];
		// 4 bytes of an 8 byte item header
		file.extend([3, 0, 0, 0]);
		file.extend(b"APETAGEX");
		file.extend(2000_u32.to_le_bytes());
		file.extend(36_u32.to_le_bytes());
		file.extend(1_u32.to_le_bytes());
		file.extend([0; 12]);

		let err = read(file).unwrap_err();
		assert!(!err.is_io());
		assert!(matches!(err.kind(), ErrorKind::SizeMismatch));
	}

	#[test_log::test]
	fn skip_cover_art() {
		let file = build_ape_tag(&[
			("Cover Art (Front)", 0b10, b"cover.jpg\0\xFF\xD8"),
			("Title", 0, b"Foo"),
		]);

		let tag = read(file.clone()).unwrap();
		assert_eq!(tag.len(), 2);

		let tag =
			ApeTag::read_from(&mut Cursor::new(file), ParseOptions::new().read_cover_art(false))
				.unwrap();
		assert_eq!(tag.len(), 1);
		assert!(tag.items("cover art (front)").is_empty());
	}
}
