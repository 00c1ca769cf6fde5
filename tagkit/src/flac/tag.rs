use crate::error::Result;
use crate::macros::err;
use crate::picture::{Picture, PictureType};
use crate::tag::Accessor;
use crate::tag::accessor::impl_text_accessors;
use crate::util::multimap::MultiMap;
use crate::util::text::leading_number;

use std::borrow::Cow;

const TITLE_KEY: &str = "title";
const ARTIST_KEY: &str = "artist";
const ALBUM_KEY: &str = "album";
const COMMENT_KEY: &str = "comment";
const DATE_KEY: &str = "date";
const GENRE_KEY: &str = "genre";
const TRACK_KEY: &str = "tracknumber";
const DISC_KEY: &str = "discnumber";

/// The metadata of a FLAC stream
///
/// This holds the Vorbis comments (`VORBIS_COMMENT` block) and every `PICTURE` block.
///
/// ## Item storage
///
/// Field names are case-insensitive, and are stored lowercased. A field may hold multiple values,
/// kept in the order they were read.
#[derive(Default, PartialEq, Eq, Debug, Clone)]
pub struct FlacTag {
	/// An identifier for the encoding software
	pub(crate) vendor: String,
	/// A collection of key-value pairs
	pub(crate) items: MultiMap<String, String>,
	/// A collection of all pictures
	pub(crate) pictures: Vec<Picture>,
}

impl FlacTag {
	/// Create a new empty `FlacTag`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::flac::FlacTag;
	///
	/// let flac_tag = FlacTag::new();
	/// assert!(flac_tag.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the vendor string
	pub fn vendor(&self) -> &str {
		&self.vendor
	}

	/// Sets the vendor string
	pub fn set_vendor(&mut self, vendor: String) {
		self.vendor = vendor
	}

	/// The number of fields, not including pictures
	pub fn len(&self) -> usize {
		self.items.value_count()
	}

	/// Whether the tag has no fields and no pictures
	pub fn is_empty(&self) -> bool {
		self.items.is_empty() && self.pictures.is_empty()
	}

	/// Iterate over every key and value pair, in order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.items
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// Get the first value of `key`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::flac::FlacTag;
	///
	/// # fn main() -> tagkit::error::Result<()> {
	/// let mut flac_tag = FlacTag::new();
	/// flac_tag.insert("ARTIST", String::from("Foo artist"))?;
	///
	/// assert_eq!(flac_tag.get("artist"), Some("Foo artist"));
	/// # Ok(()) }
	/// ```
	pub fn get(&self, key: &str) -> Option<&str> {
		self.get_all(key).first().map(String::as_str)
	}

	/// Get every value of `key`, in order
	pub fn get_all(&self, key: &str) -> &[String] {
		self.items.get_all(key.to_ascii_lowercase().as_str())
	}

	/// Append a value to `key`
	///
	/// # Errors
	///
	/// `key` is empty, or contains characters outside of ASCII `0x20..=0x7D`, or contains `'='`
	pub fn insert(&mut self, key: &str, value: String) -> Result<()> {
		let key = normalize_key(key)?;
		self.items.insert(key, value);
		Ok(())
	}

	/// Replace the value of `key` at `index`
	///
	/// Returns the old value, or gives `value` back as an `Err` if there is nothing at `index`.
	pub fn replace(
		&mut self,
		key: &str,
		index: usize,
		value: String,
	) -> std::result::Result<String, String> {
		self.items
			.replace_at(key.to_ascii_lowercase().as_str(), index, value)
	}

	/// Remove values from `key`
	///
	/// With an `index`, only that value is removed, otherwise every value of `key` is.
	pub fn remove(&mut self, key: &str, index: Option<usize>) -> Vec<String> {
		self.items
			.remove_at(key.to_ascii_lowercase().as_str(), index)
	}

	/// Get the first value of `key`
	pub fn get_text(&self, key: &str) -> Option<Cow<'_, str>> {
		self.get(key).map(Cow::Borrowed)
	}

	/// Replace the first value of `key`, or add one
	///
	/// # Errors
	///
	/// See [`FlacTag::insert`]
	pub fn set_text(&mut self, key: &str, value: String) -> Result<()> {
		let key = normalize_key(key)?;
		self.items.set(key, value);
		Ok(())
	}

	/// Remove every value of `key`
	pub fn remove_text(&mut self, key: &str) {
		self.remove(key, None);
	}

	/// Every picture, in the order they were read
	pub fn pictures(&self) -> &[Picture] {
		&self.pictures
	}

	/// Get the picture at `index`, counting only pictures matching `filter`
	///
	/// A `filter` of `None` matches every picture.
	pub fn picture(&self, filter: Option<PictureType>, index: usize) -> Option<&Picture> {
		self.pictures
			.iter()
			.filter(|picture| picture.pic_type.matches(filter))
			.nth(index)
	}

	/// Append a picture
	pub fn add_picture(&mut self, picture: Picture) {
		self.pictures.push(picture);
	}

	/// Remove the picture at `index`, counting only pictures matching `filter`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::flac::FlacTag;
	/// use tagkit::picture::{Picture, PictureType};
	///
	/// let mut flac_tag = FlacTag::new();
	/// flac_tag.add_picture(Picture::unchecked(vec![1]).pic_type(PictureType::Artist).build());
	/// flac_tag.add_picture(Picture::unchecked(vec![2]).pic_type(PictureType::CoverFront).build());
	///
	/// let cover = flac_tag.remove_picture(Some(PictureType::CoverFront), 0);
	/// assert_eq!(cover.map(|p| p.into_data()), Some(vec![2]));
	/// assert_eq!(flac_tag.pictures().len(), 1);
	/// ```
	pub fn remove_picture(&mut self, filter: Option<PictureType>, index: usize) -> Option<Picture> {
		let pos = self
			.pictures
			.iter()
			.enumerate()
			.filter(|(_, picture)| picture.pic_type.matches(filter))
			.nth(index)
			.map(|(pos, _)| pos)?;

		Some(self.pictures.remove(pos))
	}

	fn number(&self, key: &str) -> Option<u32> {
		leading_number(self.get(key)?)
	}
}

impl Accessor for FlacTag {
	impl_text_accessors! {
		title   => TITLE_KEY,
		artist  => ARTIST_KEY,
		album   => ALBUM_KEY,
		genre   => GENRE_KEY,
		comment => COMMENT_KEY,
		date    => DATE_KEY,
	}

	fn track(&self) -> Option<u32> {
		self.number(TRACK_KEY)
	}

	fn set_track(&mut self, value: u32) -> Result<()> {
		self.set_text(TRACK_KEY, value.to_string())
	}

	fn remove_track(&mut self) {
		self.remove_text(TRACK_KEY);
	}

	fn disc(&self) -> Option<u32> {
		self.number(DISC_KEY)
	}

	fn set_disc(&mut self, value: u32) -> Result<()> {
		self.set_text(DISC_KEY, value.to_string())
	}

	fn remove_disc(&mut self) {
		self.remove_text(DISC_KEY);
	}
}

// A case-insensitive field name that may consist of ASCII 0x20 through 0x7D, 0x3D ('=') excluded.
pub(crate) fn verify_key(key: &[u8]) -> bool {
	if key.is_empty() {
		return false;
	}

	key.iter()
		.all(|byte| (0x20..=0x7D).contains(byte) && *byte != b'=')
}

fn normalize_key(key: &str) -> Result<String> {
	if !verify_key(key.as_bytes()) {
		err!(InvalidArgument("Vorbis comment field names must be ASCII 0x20..=0x7D, excluding '='"));
	}

	Ok(key.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
	use crate::error::ErrorKind;
	use crate::flac::FlacTag;
	use crate::picture::{Picture, PictureType};
	use crate::tag::Accessor;

	#[test_log::test]
	fn case_insensitive_keys() {
		let mut tag = FlacTag::new();
		tag.insert("ARTIST", String::from("Foo")).unwrap();
		tag.insert("Artist", String::from("Bar")).unwrap();

		assert_eq!(tag.get_all("artist"), ["Foo", "Bar"]);
		assert_eq!(tag.artist().as_deref(), Some("Foo"));
		assert_eq!(tag.iter().next(), Some(("artist", "Foo")));

		assert_eq!(tag.replace("ARTIST", 1, String::from("Baz")), Ok(String::from("Bar")));
		assert_eq!(tag.remove("artist", Some(0)), vec![String::from("Foo")]);
		assert_eq!(tag.get("artist"), Some("Baz"));
	}

	#[test_log::test]
	fn invalid_keys() {
		let mut tag = FlacTag::new();
		for key in ["", "A=B", "Caf\u{e9}", "~"] {
			let err = tag.insert(key, String::new()).unwrap_err();
			assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
		}

		assert!(tag.is_empty());
	}

	#[test_log::test]
	fn numbers() {
		let mut tag = FlacTag::new();
		tag.insert("TRACKNUMBER", String::from("3/12")).unwrap();
		tag.insert("DISCNUMBER", String::from("none")).unwrap();

		assert_eq!(tag.track(), Some(3));
		assert_eq!(tag.disc(), None);

		tag.set_disc(2).unwrap();
		assert_eq!(tag.get("discnumber"), Some("2"));

		tag.remove_track();
		assert!(tag.track().is_none());
	}

	#[test_log::test]
	fn picture_filter() {
		let mut tag = FlacTag::new();
		for (data, pic_type) in [
			(1, PictureType::CoverFront),
			(2, PictureType::Artist),
			(3, PictureType::CoverFront),
		] {
			tag.add_picture(Picture::unchecked(vec![data]).pic_type(pic_type).build());
		}

		let second_cover = tag.picture(Some(PictureType::CoverFront), 1).unwrap();
		assert_eq!(second_cover.data(), [3]);
		assert_eq!(tag.picture(None, 1).unwrap().data(), [2]);
		assert!(tag.picture(Some(PictureType::Band), 0).is_none());
	}
}
