use crate::util::{
	FLAC_STREAMINFO, FLAC_VORBIS_COMMENT, ape, flac, id3v1, id3v2, m4a, temp_file, text_item,
	vorbis_comments,
};

use tagkit::config::{ParseOptions, ParsingMode};
use tagkit::error::ErrorKind;
use tagkit::prelude::*;
use tagkit::{read_from_path, read_from_path_with_options};

fn mpeg(with_id3v2: bool, with_ape: bool) -> Vec<u8> {
	let mut content = Vec::new();
	if with_id3v2 {
		content.extend(id3v2(3, &[("TIT2", b"\x00ID3v2 title")]));
	}

	content.extend([0xFF; 128]);

	if with_ape {
		content.extend(ape(&[("Title", b"APE title")]));
	}

	content.extend(id3v1("ID3v1 title", "", 0));
	content
}

#[test_log::test]
fn mpeg_priority() {
	let file = temp_file(".mp3", &mpeg(true, true));
	let tag = read_from_path(file.path()).unwrap();
	assert_eq!(tag.tag_type(), TagType::Id3v2);
	assert_eq!(tag.title().as_deref(), Some("ID3v2 title"));

	let file = temp_file(".mp3", &mpeg(false, true));
	let tag = read_from_path(file.path()).unwrap();
	assert_eq!(tag.tag_type(), TagType::Ape);
	assert_eq!(tag.title().as_deref(), Some("APE title"));

	let file = temp_file(".mp3", &mpeg(false, false));
	let tag = read_from_path(file.path()).unwrap();
	assert_eq!(tag.tag_type(), TagType::Id3v1);
	assert_eq!(tag.title().as_deref(), Some("ID3v1 title"));
}

#[test_log::test]
fn mpeg_without_tags() {
	let file = temp_file(".mp3", &[0xFF; 512]);
	let err = read_from_path(file.path()).unwrap_err();
	assert!(err.is_not_found());
}

#[test_log::test]
fn extension_case() {
	let content = flac(&[
		(FLAC_STREAMINFO, vec![0; 34]),
		(FLAC_VORBIS_COMMENT, vorbis_comments("", &["TITLE=Foo title"])),
	]);

	let file = temp_file(".FLAC", &content);
	let tag = read_from_path(file.path()).unwrap();
	assert_eq!(tag.tag_type(), TagType::Flac);
	assert_eq!(tag.title().as_deref(), Some("Foo title"));

	let file = temp_file(".M4A", &m4a(b"M4A ", &[text_item(b"\xA9nam", "Bar title")]));
	let tag = read_from_path_with_options(
		file.path(),
		ParseOptions::new().parsing_mode(ParsingMode::Strict),
	)
	.unwrap();
	assert_eq!(tag.tag_type(), TagType::M4a);
	assert_eq!(tag.title().as_deref(), Some("Bar title"));
}

#[test_log::test]
fn unknown_format() {
	let file = temp_file(".ogg", b"OggS");
	let err = read_from_path(file.path()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnknownFormat));

	// Never opened
	let err = read_from_path("missing.wav").unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnknownFormat));

	let err = read_from_path("missing.mp3").unwrap_err();
	assert!(err.is_io());
}
