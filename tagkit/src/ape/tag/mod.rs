pub(crate) mod item;
pub(crate) mod read;

use crate::ape::tag::item::{ApeItem, normalize_key};
use crate::error::Result;
use crate::tag::Accessor;
use crate::tag::accessor::impl_text_accessors;
use crate::util::multimap::MultiMap;
use crate::util::text::leading_number;

use std::borrow::Cow;

const TITLE_KEY: &str = "title";
const ARTIST_KEY: &str = "artist";
const ALBUM_KEY: &str = "album";
const COMMENT_KEY: &str = "comment";
const DATE_KEY: &str = "year";
const GENRE_KEY: &str = "genre";
const TRACK_KEYS: [&str; 2] = ["track", "tracknumber"];
const DISC_KEYS: [&str; 2] = ["disc", "discnumber"];

/// ## Item storage
///
/// `APE` isn't a very strict format. An [`ApeItem`] is only restricted by its key, which must be
/// 2 to 255 bytes of printable ASCII.
///
/// Keys are lowercased when read, and every method taking a key lowercases it as well, so lookups
/// are not case-sensitive. A key may hold multiple items, kept in the order they were read.
///
/// ## Accessors
///
/// | Accessor | Key(s)                   |
/// |----------|--------------------------|
/// | title    | `title`                  |
/// | artist   | `artist`                 |
/// | album    | `album`                  |
/// | comment  | `comment`                |
/// | date     | `year`                   |
/// | genre    | `genre`                  |
/// | track    | `track`, `tracknumber`   |
/// | disc     | `disc`, `discnumber`     |
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct ApeTag {
	pub(crate) items: MultiMap<String, ApeItem>,
}

impl ApeTag {
	/// Create a new empty `ApeTag`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::ape::ApeTag;
	///
	/// let ape_tag = ApeTag::new();
	/// assert!(ape_tag.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// The number of items in the tag
	pub fn len(&self) -> usize {
		self.items.value_count()
	}

	/// Whether the tag has no items
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Every item under `key`, in order
	pub fn items(&self, key: &str) -> &[ApeItem] {
		self.items.get_all(key.to_ascii_lowercase().as_str())
	}

	/// Get the item under `key` at `index`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::ape::ApeTag;
	/// use tagkit::prelude::*;
	///
	/// # fn main() -> tagkit::error::Result<()> {
	/// let mut ape_tag = ApeTag::new();
	/// ape_tag.set_title(String::from("Foo title"))?;
	///
	/// // Keys are not case-sensitive
	/// let title = ape_tag.item("Title", 0);
	/// assert!(title.is_some());
	/// # Ok(()) }
	/// ```
	pub fn item(&self, key: &str, index: usize) -> Option<&ApeItem> {
		self.items(key).get(index)
	}

	/// Append an item under `key`
	///
	/// # Errors
	///
	/// `key` is not 2 to 255 bytes of printable ASCII
	pub fn insert(&mut self, key: &str, item: ApeItem) -> Result<()> {
		let key = normalize_key(key)?;
		self.items.insert(key, item);
		Ok(())
	}

	/// Replace the item under `key` at `index`
	///
	/// Returns the old item, or gives `item` back as an `Err` if there is nothing at `index`.
	pub fn replace(
		&mut self,
		key: &str,
		index: usize,
		item: ApeItem,
	) -> std::result::Result<ApeItem, ApeItem> {
		self.items
			.replace_at(key.to_ascii_lowercase().as_str(), index, item)
	}

	/// Remove items under `key`
	///
	/// With an `index`, only that item is removed, otherwise every item under `key` is.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::ape::{ApeItem, ApeTag};
	///
	/// # fn main() -> tagkit::error::Result<()> {
	/// let mut ape_tag = ApeTag::new();
	/// ape_tag.insert("Artist", ApeItem::text(String::from("Foo")))?;
	/// ape_tag.insert("ARTIST", ApeItem::text(String::from("Bar")))?;
	/// assert_eq!(ape_tag.items("artist").len(), 2);
	///
	/// ape_tag.remove("artist", Some(0));
	/// assert_eq!(ape_tag.items("artist").len(), 1);
	///
	/// ape_tag.remove("artist", None);
	/// assert!(ape_tag.is_empty());
	/// # Ok(()) }
	/// ```
	pub fn remove(&mut self, key: &str, index: Option<usize>) -> Vec<ApeItem> {
		self.items
			.remove_at(key.to_ascii_lowercase().as_str(), index)
	}

	/// Iterate over every key and item pair, in order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ApeItem)> {
		self.items.iter().map(|(key, item)| (key.as_str(), item))
	}

	/// Get the first item under `key` as text
	pub fn get_text(&self, key: &str) -> Option<Cow<'_, str>> {
		self.item(key, 0).and_then(ApeItem::as_text)
	}

	/// Replace the first item under `key` with a text item, or add one
	///
	/// # Errors
	///
	/// `key` is not 2 to 255 bytes of printable ASCII
	pub fn set_text(&mut self, key: &str, value: String) -> Result<()> {
		let key = normalize_key(key)?;
		self.items.set(key, ApeItem::text(value));
		Ok(())
	}

	/// Remove every item under `key`
	pub fn remove_text(&mut self, key: &str) {
		self.remove(key, None);
	}

	fn number(&self, keys: [&str; 2]) -> Option<u32> {
		let item = keys.into_iter().find_map(|key| self.item(key, 0))?;
		leading_number(&item.as_text()?)
	}

	fn set_number(&mut self, keys: [&str; 2], value: u32) {
		// Only one of the keys should end up in the tag
		self.remove(keys[1], None);
		self.items
			.set(String::from(keys[0]), ApeItem::text(value.to_string()));
	}
}

impl Accessor for ApeTag {
	impl_text_accessors! {
		title   => TITLE_KEY,
		artist  => ARTIST_KEY,
		album   => ALBUM_KEY,
		genre   => GENRE_KEY,
		comment => COMMENT_KEY,
		date    => DATE_KEY,
	}

	fn track(&self) -> Option<u32> {
		self.number(TRACK_KEYS)
	}

	fn set_track(&mut self, value: u32) -> Result<()> {
		self.set_number(TRACK_KEYS, value);
		Ok(())
	}

	fn remove_track(&mut self) {
		for key in TRACK_KEYS {
			self.remove(key, None);
		}
	}

	fn disc(&self) -> Option<u32> {
		self.number(DISC_KEYS)
	}

	fn set_disc(&mut self, value: u32) -> Result<()> {
		self.set_number(DISC_KEYS, value);
		Ok(())
	}

	fn remove_disc(&mut self) {
		for key in DISC_KEYS {
			self.remove(key, None);
		}
	}
}
