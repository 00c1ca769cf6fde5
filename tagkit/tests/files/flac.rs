use crate::util::{
	FLAC_PADDING, FLAC_STREAMINFO, FLAC_VORBIS_COMMENT, flac, temp_file, vorbis_comments,
};

use tagkit::config::ParseOptions;
use tagkit::flac::FlacTag;
use tagkit::prelude::*;
use tagkit::read_from_path;

use std::io::Cursor;

#[test_log::test]
fn vorbis_comments_from_file() {
	let content = flac(&[
		(FLAC_STREAMINFO, vec![0; 34]),
		(
			FLAC_VORBIS_COMMENT,
			vorbis_comments(
				"tagkit",
				&["TITLE=Foo title", "Artist=Foo artist", "ARTIST=Bar artist", "TRACKNUMBER=9"],
			),
		),
		(FLAC_PADDING, vec![0; 64]),
	]);

	let file = temp_file(".flac", &content);
	let tag = FlacTag::read_from_path(file.path(), ParseOptions::new()).unwrap();

	assert_eq!(tag.vendor(), "tagkit");
	assert_eq!(tag.len(), 4);
	assert_eq!(tag.title().as_deref(), Some("Foo title"));
	assert_eq!(tag.get_all("ARTIST"), ["Foo artist", "Bar artist"]);
	assert_eq!(tag.track(), Some(9));
	assert!(tag.pictures().is_empty());
}

#[test_log::test]
fn only_padding() {
	let content = flac(&[(FLAC_STREAMINFO, vec![0; 34]), (FLAC_PADDING, vec![0; 16])]);

	let err = FlacTag::read_from(&mut Cursor::new(content), ParseOptions::new()).unwrap_err();
	assert!(err.is_not_found());
}

#[test_log::test]
fn malformed_comments_with_default_options() {
	let comments: [&[u8]; 3] = [b"TITLE=Caf\xE9", b"AR\x01TIST=Bad key", b"ALBUM=Foo album"];
	let content = flac(&[
		(FLAC_STREAMINFO, vec![0; 34]),
		(FLAC_VORBIS_COMMENT, vorbis_comments("tagkit", &comments)),
	]);

	let file = temp_file(".flac", &content);
	let tag = read_from_path(file.path()).unwrap();
	assert_eq!(tag.tag_type(), TagType::Flac);
	assert_eq!(tag.title().as_deref(), Some("Caf\u{FFFD}"));
	assert_eq!(tag.album().as_deref(), Some("Foo album"));
	assert!(tag.artist().is_none());
}
