use crate::util::{atom, m4a, temp_file, text_item};

use tagkit::config::ParseOptions;
use tagkit::error::ErrorKind;
use tagkit::mp4::M4aTag;
use tagkit::mp4::constants::{ARTIST, DISC_NUMBER};
use tagkit::picture::MimeType;
use tagkit::prelude::*;

use std::io::Cursor;

#[test_log::test]
fn read_file() {
	let mut disk = vec![0, 0, 0, 0, 0, 0, 0, 0];
	disk.extend([0, 0, 0, 1, 0, 2]);

	let content = m4a(
		b"M4A ",
		&[
			text_item(b"\xA9nam", "Foo title"),
			text_item(b"\xA9ART", "Foo artist"),
			text_item(b"\xA9alb", "Foo album"),
			atom(b"disk", &atom(b"data", &disk)),
		],
	);

	let file = temp_file(".m4a", &content);
	let mut tag = M4aTag::read_from_path(file.path(), ParseOptions::new()).unwrap();

	assert_eq!(tag.len(), 4);
	assert_eq!(tag.title().as_deref(), Some("Foo title"));
	assert_eq!(tag.atom(ARTIST, 0).unwrap().as_text(), "Foo artist");
	assert_eq!(tag.album().as_deref(), Some("Foo album"));
	assert_eq!(tag.disc(), Some(1));

	// The disc total is kept
	tag.set_disc(2).unwrap();
	assert_eq!(tag.disc(), Some(2));
	assert_eq!(tag.atom(DISC_NUMBER, 0).unwrap().data, [0, 0, 0, 2, 0, 2]);
}

#[test_log::test]
fn wrong_major_brand() {
	let content = m4a(b"MP42", &[text_item(b"\xA9nam", "Foo title")]);

	let err = M4aTag::read_from(&mut Cursor::new(content), ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::BadAtom(_)));
}

#[test_log::test]
fn empty_ilst() {
	let tag = M4aTag::read_from(&mut Cursor::new(m4a(b"M4A ", &[])), ParseOptions::new()).unwrap();
	assert!(tag.is_empty());
}

#[test_log::test]
fn png_cover_without_type_indicator() {
	let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
	png.extend([0, 0, 0, 0x0D, b'I', b'H', b'D', b'R']);

	// Type indicator 0, so the format has to come from the data itself
	let mut data = vec![0; 8];
	data.extend(&png);

	let content = m4a(b"M4A ", &[atom(b"covr", &atom(b"data", &data))]);
	let tag = M4aTag::read_from(&mut Cursor::new(content), ParseOptions::new()).unwrap();

	let [cover] = tag.pictures() else {
		panic!("Expected a single picture, got {:?}", tag.pictures());
	};
	assert_eq!(cover.mime_type(), Some(&MimeType::Png));
	assert_eq!(cover.data(), png);
}
