use super::constants::{GENRES, NO_GENRE, TEXT_FIELD_LEN, V1_1_COMMENT_LEN, YEAR_FIELD_LEN};
use crate::error::Result;
use crate::macros::err;
use crate::tag::Accessor;
use crate::util::text::TextEncoding;

use std::borrow::Cow;

macro_rules! impl_accessor {
	($($name:ident => $max_len:expr,)+) => {
		paste::paste! {
			$(
				fn $name(&self) -> Option<Cow<'_, str>> {
					self.$name.as_deref().map(Cow::Borrowed)
				}

				fn [<set_ $name>](&mut self, value: String) -> Result<()> {
					let value = verify_field(value, $max_len)?;
					self.$name = value;
					Ok(())
				}

				fn [<remove_ $name>](&mut self) {
					self.$name = None
				}
			)+
		}
	}
}

/// An ID3v1 tag
///
/// ID3v1 is a severely limited format, with each field being incredibly small in size. All
/// fields have been commented with their maximum sizes and any other additional restrictions.
///
/// Unlike most other formats here, attempting to set a field larger than its maximum size
/// will **error** rather than silently truncate the value.
///
/// All text is ISO-8859-1.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Id3v1Tag {
	/// Track title, 30 bytes max
	pub(crate) title: Option<String>,
	/// Track artist, 30 bytes max
	pub(crate) artist: Option<String>,
	/// Album title, 30 bytes max
	pub(crate) album: Option<String>,
	/// Release year, normally 4 ASCII digits, but kept as read outside of strict parsing
	pub(crate) year: Option<String>,
	/// A short comment
	///
	/// The number of bytes differs between versions:
	/// * Original is 30 bytes max
	/// * 1.1 is 28 bytes max, to make room for the track number
	pub(crate) comment: Option<String>,
	/// The track number, 1-255
	///
	/// Only available in ID3v1.1
	pub(crate) track: Option<u8>,
	/// The track's genre, as an index into [`GENRES`]
	///
	/// Indices outside of [`GENRES`] are kept, but have no name. `255` means no genre.
	pub(crate) genre: Option<u8>,
}

impl Id3v1Tag {
	/// Create a new empty `Id3v1Tag`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::id3::v1::Id3v1Tag;
	/// use tagkit::prelude::*;
	///
	/// let id3v1_tag = Id3v1Tag::new();
	/// assert!(id3v1_tag.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether every field is unset
	pub fn is_empty(&self) -> bool {
		self.title.is_none()
			&& self.artist.is_none()
			&& self.album.is_none()
			&& self.year.is_none()
			&& self.comment.is_none()
			&& self.track.is_none()
			&& self.genre.is_none()
	}

	/// The raw genre index
	///
	/// This is preserved even when it isn't a valid index into [`GENRES`].
	pub fn genre_index(&self) -> Option<u8> {
		self.genre
	}

	/// Set the raw genre index
	///
	/// An index of `255` is equivalent to [`Accessor::remove_genre`].
	pub fn set_genre_index(&mut self, index: u8) {
		self.genre = (index != NO_GENRE).then_some(index);
	}

	/// The track number, if this is an ID3v1.1 tag
	pub fn track_number(&self) -> Option<u8> {
		self.track
	}

	/// Set the track number, or `None` to revert to an ID3v1.0 layout
	///
	/// # Errors
	///
	/// * The track is `Some(0)`
	/// * The comment is longer than 28 bytes, leaving no room for the track
	pub fn set_track_number(&mut self, track: Option<u8>) -> Result<()> {
		if let Some(track) = track {
			if track == 0 {
				err!(InvalidArgument("ID3v1 track number must be non-zero"));
			}

			if self.comment.as_ref().is_some_and(|c| c.len() > V1_1_COMMENT_LEN) {
				err!(InvalidArgument(
					"ID3v1 comment is too long to make room for a track number"
				));
			}
		}

		self.track = track;
		Ok(())
	}
}

impl Accessor for Id3v1Tag {
	impl_accessor!(
		title => TEXT_FIELD_LEN,
		artist => TEXT_FIELD_LEN,
		album => TEXT_FIELD_LEN,
	);

	fn genre(&self) -> Option<Cow<'_, str>> {
		let index = self.genre?;
		GENRES.get(usize::from(index)).map(|g| Cow::Borrowed(*g))
	}

	fn set_genre(&mut self, value: String) -> Result<()> {
		let Some(index) = GENRES.iter().position(|g| g.eq_ignore_ascii_case(&value)) else {
			err!(InvalidArgument("ID3v1 genre is not in the genre table"));
		};

		// The table has 192 entries, always fits
		self.genre = Some(index as u8);
		Ok(())
	}

	fn remove_genre(&mut self) {
		self.genre = None;
	}

	fn comment(&self) -> Option<Cow<'_, str>> {
		self.comment.as_deref().map(Cow::Borrowed)
	}

	fn set_comment(&mut self, value: String) -> Result<()> {
		let max_len = if self.track.is_some() {
			V1_1_COMMENT_LEN
		} else {
			TEXT_FIELD_LEN
		};

		self.comment = verify_field(value, max_len)?;
		Ok(())
	}

	fn remove_comment(&mut self) {
		self.comment = None;
	}

	fn date(&self) -> Option<Cow<'_, str>> {
		self.year.as_deref().map(Cow::Borrowed)
	}

	fn set_date(&mut self, value: String) -> Result<()> {
		if value.is_empty() {
			self.year = None;
			return Ok(());
		}

		if value.len() != YEAR_FIELD_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
			err!(InvalidArgument("ID3v1 year must be exactly 4 ASCII digits"));
		}

		self.year = Some(value);
		Ok(())
	}

	fn remove_date(&mut self) {
		self.year = None;
	}

	fn track(&self) -> Option<u32> {
		self.track.map(u32::from)
	}

	fn set_track(&mut self, value: u32) -> Result<()> {
		let Ok(track) = u8::try_from(value) else {
			err!(InvalidArgument("ID3v1 track number must fit in a single byte"));
		};

		self.set_track_number(Some(track))
	}

	fn remove_track(&mut self) {
		self.track = None;
	}

	fn disc(&self) -> Option<u32> {
		None
	}

	fn set_disc(&mut self, _value: u32) -> Result<()> {
		err!(InvalidArgument("ID3v1 has no disc number field"));
	}

	fn remove_disc(&mut self) {}
}

fn verify_field(value: String, max_len: usize) -> Result<Option<String>> {
	if value.is_empty() {
		return Ok(None);
	}

	if !TextEncoding::verify_latin1(&value) {
		err!(InvalidEncoding);
	}

	// Every character is a single byte once encoded
	if value.chars().count() > max_len {
		err!(InvalidArgument("ID3v1 field is too long"));
	}

	Ok(Some(value))
}

#[cfg(test)]
mod tests {
	use crate::error::ErrorKind;
	use crate::id3::v1::Id3v1Tag;
	use crate::tag::Accessor;

	#[test_log::test]
	fn field_limits() {
		let mut tag = Id3v1Tag::new();

		tag.set_title("a".repeat(30)).unwrap();
		assert_eq!(tag.title().as_deref(), Some("a".repeat(30).as_str()));

		let err = tag.set_title("a".repeat(31)).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));

		// The previous value is untouched
		assert_eq!(tag.title().map(|t| t.len()), Some(30));

		let err = tag.set_artist(String::from("日本語")).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::InvalidEncoding));

		// Latin-1 characters above ASCII are fine
		tag.set_album(String::from("Café")).unwrap();
	}

	#[test_log::test]
	fn comment_and_track_share_space() {
		let mut tag = Id3v1Tag::new();
		tag.set_comment("c".repeat(30)).unwrap();

		assert!(tag.set_track(1).is_err());
		assert!(tag.track().is_none());

		tag.set_comment("c".repeat(28)).unwrap();
		tag.set_track(5).unwrap();
		assert_eq!(tag.track(), Some(5));

		assert!(tag.set_comment("c".repeat(29)).is_err());

		assert!(tag.set_track(0).is_err());
		assert!(tag.set_track(256).is_err());
	}

	#[test_log::test]
	fn genre_lookup() {
		let mut tag = Id3v1Tag::new();

		tag.set_genre(String::from("psybient")).unwrap();
		assert_eq!(tag.genre_index(), Some(191));
		assert_eq!(tag.genre().as_deref(), Some("Psybient"));

		assert!(tag.set_genre(String::from("Not a genre")).is_err());

		tag.set_genre_index(200);
		assert_eq!(tag.genre_index(), Some(200));
		assert!(tag.genre().is_none());

		tag.set_genre_index(255);
		assert!(tag.genre_index().is_none());
	}

	#[test_log::test]
	fn year_validation() {
		let mut tag = Id3v1Tag::new();

		tag.set_date(String::from("1999")).unwrap();
		assert_eq!(tag.date().as_deref(), Some("1999"));

		assert!(tag.set_date(String::from("99")).is_err());
		assert!(tag.set_date(String::from("19a9")).is_err());

		tag.set_date(String::new()).unwrap();
		assert!(tag.date().is_none());
	}

	#[test_log::test]
	fn no_disc() {
		let mut tag = Id3v1Tag::new();
		assert!(tag.set_disc(1).is_err());
		assert!(tag.disc().is_none());
	}
}
