use crate::util::{ape, id3v1, id3v2, temp_file};

use tagkit::config::{ParseOptions, ParsingMode};
use tagkit::error::{ErrorKind, Id3v2ErrorKind};
use tagkit::id3::v1::Id3v1Tag;
use tagkit::id3::v2::{Id3v2Tag, Id3v2Version};
use tagkit::prelude::*;
use tagkit::{TextEncoding, read_from_path};

use std::io::Cursor;

fn id3v1_file() -> Vec<u8> {
	let mut content = vec![0xFF; 172];
	content.extend(id3v1("Test Song", "Test Artist", 5));
	assert_eq!(content.len(), 300);
	content
}

#[test_log::test]
fn id3v1_end_to_end() {
	let file = temp_file(".mp3", &id3v1_file());

	let tag = read_from_path(file.path()).unwrap();
	assert_eq!(tag.tag_type(), TagType::Id3v1);
	assert_eq!(tag.title().as_deref(), Some("Test Song"));
	assert_eq!(tag.artist().as_deref(), Some("Test Artist"));
	assert_eq!(tag.track(), Some(5));

	let Tag::Id3v1(mut v1_tag) = tag else {
		unreachable!()
	};

	v1_tag.set_title(String::from("Other Song")).unwrap();
	v1_tag.set_track(7).unwrap();
	v1_tag.write_to_path(file.path()).unwrap();

	// Overwritten in place
	assert_eq!(std::fs::metadata(file.path()).unwrap().len(), 300);

	let tag = Id3v1Tag::read_from_path(file.path(), ParseOptions::new()).unwrap();
	assert_eq!(tag.title().as_deref(), Some("Other Song"));
	assert_eq!(tag.artist().as_deref(), Some("Test Artist"));
	assert_eq!(tag.track(), Some(7));
}

#[test_log::test]
fn id3v1_append() {
	let file = temp_file(".mp3", &[0xFF; 64]);

	let mut tag = Id3v1Tag::new();
	tag.set_album(String::from("Foo album")).unwrap();
	tag.write_to_path(file.path()).unwrap();

	assert_eq!(std::fs::metadata(file.path()).unwrap().len(), 64 + 128);

	let tag = Id3v1Tag::read_from_path(file.path(), ParseOptions::new()).unwrap();
	assert_eq!(tag.album().as_deref(), Some("Foo album"));
}

#[test_log::test]
fn id3v1_bytes() {
	let mut tag = Id3v1Tag::new();
	tag.set_title(String::from("Foo title")).unwrap();
	tag.set_comment(String::from("Bar comment")).unwrap();
	tag.set_genre_index(17);
	tag.set_track(12).unwrap();

	let parsed = Id3v1Tag::parse(tag.as_bytes(), ParsingMode::Strict).unwrap();
	assert_eq!(parsed, tag);
	assert_eq!(parsed.genre().as_deref(), Some("Rock"));
}

#[test_log::test]
fn id3v2_versions() {
	for version in [Id3v2Version::V2, Id3v2Version::V3, Id3v2Version::V4] {
		let mut tag = Id3v2Tag::new(version);
		tag.set_title_with_encoding(String::from("Foo title"), TextEncoding::Latin1)
			.unwrap();
		tag.set_artist_with_encoding(String::from("Bär artist"), TextEncoding::UTF16)
			.unwrap();
		tag.set_track(3).unwrap();

		let utf8 = tag.set_album_with_encoding(String::from("Baz album"), TextEncoding::UTF8);
		if version == Id3v2Version::V4 {
			utf8.unwrap();
		} else {
			assert!(matches!(utf8.unwrap_err().kind(), ErrorKind::InvalidEncoding));
		}

		let bytes = tag.as_bytes().unwrap();
		assert_eq!(&bytes[..3], b"ID3");
		assert_eq!(bytes[3], version.major());

		let parsed = Id3v2Tag::parse(&bytes, ParseOptions::new()).unwrap();
		assert_eq!(parsed.version(), version);
		assert_eq!(parsed.title().as_deref(), Some("Foo title"), "{version:?}");
		assert_eq!(parsed.artist().as_deref(), Some("Bär artist"), "{version:?}");
		assert_eq!(parsed.track(), Some(3), "{version:?}");

		let album = parsed.album();
		if version == Id3v2Version::V4 {
			assert_eq!(album.as_deref(), Some("Baz album"));
		} else {
			assert!(album.is_none());
		}
	}
}

#[test_log::test]
fn id3v2_truncated_tag() {
	let mut raw = id3v2(3, &[("TIT2", b"\x00Foo title")]);
	raw.truncate(raw.len() - 4);

	let err = Id3v2Tag::parse(&raw, ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::SizeMismatch));
}

#[test_log::test]
fn id3v2_oversized_frame() {
	let mut raw = id3v2(3, &[("TIT2", b"\x00Foo title")]);
	// The frame size, past the end of the tag
	raw[17] = 0x40;

	for mode in [ParsingMode::Strict, ParsingMode::BestAttempt] {
		let err =
			Id3v2Tag::parse(&raw, ParseOptions::new().parsing_mode(mode)).unwrap_err();

		let ErrorKind::Id3v2(id3v2_err) = err.kind() else {
			panic!("Expected an ID3v2 error, got {err:?}");
		};
		assert!(matches!(id3v2_err.kind(), Id3v2ErrorKind::BadFrameLength));
	}
}

#[test_log::test]
fn id3v2_before_audio() {
	let mut content = id3v2(4, &[("TIT2", b"\x03Foo title"), ("TPE1", b"\x03Bar artist")]);
	content.extend([0xFF; 256]);
	content.extend(id3v1("Other title", "", 0));

	let mut reader = Cursor::new(content);
	let tag = Id3v2Tag::read_from(&mut reader, ParseOptions::new()).unwrap();
	assert_eq!(tag.len(), 2);
	assert_eq!(tag.title().as_deref(), Some("Foo title"));

	// Both tags are independent
	let v1_tag = Id3v1Tag::read_from(&mut reader, ParseOptions::new()).unwrap();
	assert_eq!(v1_tag.title().as_deref(), Some("Other title"));
	assert_eq!(v1_tag.track(), None);
}

#[test_log::test]
fn malformed_fields_with_default_options() {
	let mut content = id3v2(
		3,
		&[
			// Odd length UTF-16
			("TIT2", b"\x01\xFF\xFEH\x00i\x00\x00"),
			("TPE1", b"\x00Bar artist"),
		],
	);
	content.extend([0xFF; 64]);

	let file = temp_file(".mp3", &content);
	let tag = read_from_path(file.path()).unwrap();
	assert_eq!(tag.tag_type(), TagType::Id3v2);
	assert_eq!(tag.title().as_deref(), Some("Hi"));
	assert_eq!(tag.artist().as_deref(), Some("Bar artist"));

	let content = id3v2(4, &[("TIT2", b"\x03Caf\xE9"), ("TALB", b"\x03Baz album")]);
	let tag = Id3v2Tag::parse(&content, ParseOptions::new()).unwrap();
	assert_eq!(tag.title().as_deref(), Some("Caf\u{FFFD}"));
	assert_eq!(tag.album().as_deref(), Some("Baz album"));

	// A year with only 3 digits
	let mut v1 = id3v1("Test Song", "", 0);
	v1[93..97].copy_from_slice(b"199 ");
	let mut content = vec![0xFF; 64];
	content.extend(v1);

	let file = temp_file(".mp3", &content);
	let tag = read_from_path(file.path()).unwrap();
	assert_eq!(tag.tag_type(), TagType::Id3v1);
	assert_eq!(tag.title().as_deref(), Some("Test Song"));
	assert_eq!(tag.date().as_deref(), Some("199 "));
}

#[test_log::test]
fn truncated_ape_falls_back_to_id3v1() {
	let mut malformed = ape(&[("Title", b"Foo title")]);
	// Cut the item off right after its size and flags
	let item_len = malformed.len() - 32;
	malformed.drain(8..item_len);
	let size = (malformed.len() as u32).to_le_bytes();
	let size_pos = malformed.len() - 20;
	malformed[size_pos..size_pos + 4].copy_from_slice(&size);

	let mut content = vec![0xFF; 64];
	content.extend(malformed);
	content.extend(id3v1("Test Song", "Test Artist", 5));

	let file = temp_file(".mp3", &content);
	let tag = read_from_path(file.path()).unwrap();
	assert_eq!(tag.tag_type(), TagType::Id3v1);
	assert_eq!(tag.title().as_deref(), Some("Test Song"));
}
