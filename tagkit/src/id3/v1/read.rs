use super::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE, NO_GENRE, YEAR_FIELD_LEN};
use super::tag::Id3v1Tag;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::macros::err;
use crate::util::io::seek_from_end;
use crate::util::text::latin1_decode;

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

impl Id3v1Tag {
	/// Read an `Id3v1Tag` from the last 128 bytes of `reader`
	///
	/// # Errors
	///
	/// * [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound), the stream is too short or
	///   has no "TAG" marker
	/// * The year is malformed, with [`ParsingMode::Strict`]
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		if !seek_from_end(reader, ID3V1_TAG_SIZE)? {
			log::debug!("Stream is too short to contain an ID3v1 tag");
			err!(NotFound);
		}

		let mut buf = [0; ID3V1_TAG_SIZE as usize];
		reader.read_exact(&mut buf)?;

		if buf[..3] != ID3V1_TAG_MARKER {
			err!(NotFound);
		}

		log::debug!("Found an ID3v1 tag, parsing");
		Self::parse(buf, parse_options.parsing_mode)
	}

	/// Read an `Id3v1Tag` from the file at `path`
	///
	/// # Errors
	///
	/// See [`Id3v1Tag::read_from`]
	pub fn read_from_path<P>(path: P, parse_options: ParseOptions) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let mut file = File::open(path)?;
		Self::read_from(&mut file, parse_options)
	}

	/// Parse a complete 128 byte tag, including the "TAG" marker
	///
	/// # Errors
	///
	/// * [`ErrorKind::FakeTag`](crate::error::ErrorKind::FakeTag), the marker is missing
	/// * The year is malformed, with [`ParsingMode::Strict`]
	pub fn parse(reader: [u8; 128], parse_mode: ParsingMode) -> Result<Self> {
		if reader[..3] != ID3V1_TAG_MARKER {
			err!(FakeTag);
		}

		let mut tag = Self::default();

		let reader = &reader[3..];

		tag.title = decode_text(&reader[..30]);
		tag.artist = decode_text(&reader[30..60]);
		tag.album = decode_text(&reader[60..90]);

		tag.year = parse_year(&reader[90..94], parse_mode)?;

		// A NUL 28 bytes into the comment marks ID3v1.1, the final byte is then the track
		// number. A track number of 0 is treated as unset.
		let range = if reader[122] == 0 {
			tag.track = (reader[123] != 0).then_some(reader[123]);

			94_usize..122
		} else {
			94..124
		};

		tag.comment = decode_text(&reader[range]);

		if reader[124] != NO_GENRE {
			tag.genre = Some(reader[124]);
		}

		Ok(tag)
	}
}

fn decode_text(data: &[u8]) -> Option<String> {
	let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
	if end == 0 {
		return None;
	}

	if data[end..].iter().any(|b| *b != b'\0') {
		log::warn!("ID3v1 text field contains trailing junk, skipping");
	}

	Some(latin1_decode(&data[..end]))
}

// The year is kept as-is, only `ParsingMode::Strict` requires it to be 4 digits
fn parse_year(input: &[u8], parse_mode: ParsingMode) -> Result<Option<String>> {
	let Some(year) = decode_text(input) else {
		return Ok(None);
	};

	if year.len() != YEAR_FIELD_LEN || !year.bytes().all(|b| b.is_ascii_digit()) {
		if parse_mode == ParsingMode::Strict {
			err!(TextDecode("ID3v1 year field is not 4 ASCII digits"));
		}

		log::warn!("ID3v1 year is not 4 digits: {year:?}");
	}

	Ok(Some(year))
}

#[cfg(test)]
mod tests {
	use crate::config::{ParseOptions, ParsingMode};
	use crate::error::ErrorKind;
	use crate::id3::v1::Id3v1Tag;
	use crate::tag::Accessor;

	use std::io::Cursor;

	fn raw_tag(year: &[u8; 4], comment: &[u8], genre: u8) -> [u8; 128] {
		let mut raw = [0; 128];
		raw[..3].copy_from_slice(b"TAG");
		raw[3..8].copy_from_slice(b"Title");
		raw[33..39].copy_from_slice(b"Artist");
		raw[63..68].copy_from_slice(b"Album");
		raw[93..97].copy_from_slice(year);
		raw[97..97 + comment.len()].copy_from_slice(comment);
		raw[127] = genre;
		raw
	}

	#[test_log::test]
	fn parse_v1_0() {
		let raw = raw_tag(b"2001", b"A comment", 17);
		let tag = Id3v1Tag::parse(raw, ParsingMode::Strict).unwrap();

		assert_eq!(tag.title().as_deref(), Some("Title"));
		assert_eq!(tag.artist().as_deref(), Some("Artist"));
		assert_eq!(tag.album().as_deref(), Some("Album"));
		assert_eq!(tag.date().as_deref(), Some("2001"));
		assert_eq!(tag.comment().as_deref(), Some("A comment"));
		assert_eq!(tag.genre().as_deref(), Some("Rock"));
		assert!(tag.track().is_none());
	}

	#[test_log::test]
	fn parse_v1_1() {
		let mut comment = [0; 30];
		comment[..4].copy_from_slice(b"Test");
		comment[29] = 7;

		let raw = raw_tag(b"\0\0\0\0", &comment, 255);
		let tag = Id3v1Tag::parse(raw, ParsingMode::Strict).unwrap();

		assert_eq!(tag.track(), Some(7));
		assert_eq!(tag.comment().as_deref(), Some("Test"));
		assert!(tag.date().is_none());
		assert!(tag.genre_index().is_none());
	}

	#[test_log::test]
	fn bad_year() {
		let raw = raw_tag(b"19x1", b"", 0);

		let err = Id3v1Tag::parse(raw, ParsingMode::Strict).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::TextDecode(_)));

		let tag = Id3v1Tag::parse(raw, ParsingMode::BestAttempt).unwrap();
		assert_eq!(tag.date().as_deref(), Some("19x1"));
		assert_eq!(tag.title().as_deref(), Some("Title"));
	}

	#[test_log::test]
	fn short_year_with_default_options() {
		let mut file = vec![0xFF; 64];
		file.extend(raw_tag(b"199 ", b"", 255));

		let tag = Id3v1Tag::read_from(&mut Cursor::new(file), ParseOptions::new()).unwrap();
		assert_eq!(tag.date().as_deref(), Some("199 "));
		assert_eq!(tag.artist().as_deref(), Some("Artist"));
	}

	#[test_log::test]
	fn zero_track_is_unset() {
		let mut comment = [0; 30];
		comment[..4].copy_from_slice(b"Test");

		let tag = Id3v1Tag::parse(raw_tag(b"2001", &comment, 255), ParsingMode::Strict).unwrap();
		assert!(tag.track().is_none());
		assert_eq!(tag.comment().as_deref(), Some("Test"));

		// Without the NUL at byte 28, the final two bytes are comment text
		let comment = *b"The comment fills all 30 bytes";
		let tag = Id3v1Tag::parse(raw_tag(b"2001", &comment, 255), ParsingMode::Strict).unwrap();
		assert!(tag.track().is_none());
		assert_eq!(tag.comment().as_deref(), Some("The comment fills all 30 bytes"));
	}

	#[test_log::test]
	fn not_found() {
		let err = Id3v1Tag::read_from(&mut Cursor::new(vec![0; 50]), ParseOptions::new())
			.unwrap_err();
		assert!(err.is_not_found());

		let err = Id3v1Tag::read_from(&mut Cursor::new(vec![0; 200]), ParseOptions::new())
			.unwrap_err();
		assert!(err.is_not_found());
	}

	#[test_log::test]
	fn read_from_end() {
		let mut file = vec![0xFF; 172];
		file.extend(raw_tag(b"2001", b"", 0));

		let tag = Id3v1Tag::read_from(&mut Cursor::new(file), ParseOptions::new()).unwrap();
		assert_eq!(tag.genre().as_deref(), Some("Blues"));
	}
}
