use crate::util::{ape, id3v1, temp_file};

use tagkit::ape::ApeTag;
use tagkit::config::ParseOptions;
use tagkit::error::ErrorKind;
use tagkit::prelude::*;

use std::io::Cursor;

#[test_log::test]
fn keys_are_case_insensitive() {
	let mut content = vec![0xFF; 100];
	content.extend(ape(&[
		("Artist", b"Foo artist"),
		("Title", b"Foo title"),
		("ARTIST", b"Bar artist"),
	]));

	let tag = ApeTag::read_from(&mut Cursor::new(content), ParseOptions::new()).unwrap();
	assert_eq!(tag.len(), 3);

	let artists = tag
		.items("artist")
		.iter()
		.map(|item| item.as_text().unwrap().into_owned())
		.collect::<Vec<_>>();
	assert_eq!(artists, ["Foo artist", "Bar artist"]);

	assert_eq!(tag.artist().as_deref(), Some("Foo artist"));
	assert_eq!(tag.get_text("TITLE").as_deref(), Some("Foo title"));
}

#[test_log::test]
fn before_id3v1() {
	let mut content = vec![0xFF; 100];
	content.extend(ape(&[("Album", b"Foo album"), ("Track", b"4/12")]));
	content.extend(id3v1("Other title", "", 0));

	let file = temp_file(".mp3", &content);
	let tag = ApeTag::read_from_path(file.path(), ParseOptions::new()).unwrap();
	assert_eq!(tag.album().as_deref(), Some("Foo album"));
	assert_eq!(tag.track(), Some(4));
	assert!(tag.title().is_none());
}

#[test_log::test]
fn item_larger_than_tag() {
	let mut content = ape(&[("Title", b"Foo title")]);
	// The value size, claiming more than the tag holds
	content[0] = 0xF0;

	let err = ApeTag::read_from(&mut Cursor::new(content), ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::SizeMismatch));
}

#[test_log::test]
fn no_tag() {
	let err = ApeTag::read_from(&mut Cursor::new(vec![0; 64]), ParseOptions::new()).unwrap_err();
	assert!(err.is_not_found());
}
