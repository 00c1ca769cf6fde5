pub(super) mod atom;
pub(super) mod constants;
pub(super) mod read;

use crate::error::Result;
use crate::macros::err;
use crate::picture::{Picture, PictureType};
use crate::tag::Accessor;
use crate::tag::accessor::impl_text_accessors;
use crate::util::multimap::MultiMap;
use atom::Atom;
use constants::{ALBUM, ARTIST, COMMENT, DISC_NUMBER, GENRE, TITLE, TRACK_NUMBER, YEAR};

use std::borrow::Cow;

// number (2) + total (2), after 2 reserved bytes
const DISC_NUMBER_LEN: usize = 6;
// Same as `disk`, with 2 more reserved bytes at the end
const TRACK_NUMBER_LEN: usize = 8;

/// The metadata held in an MP4 file's `moov.udta.meta.ilst` atom
///
/// ## Item storage
///
/// Items are keyed by their FOURCC (see [`constants`](crate::mp4::constants)). An identifier may
/// hold multiple [`Atom`]s, kept in the order they were read. Freeform (`----`) items all share
/// the same identifier, and are told apart by their [`Atom::long_name`].
///
/// Cover art (`covr`) is not stored as atoms, it is converted to [`Picture`]s with a
/// [`PictureType::CoverFront`] type.
///
/// ## Accessors
///
/// | Accessor | Atom   |
/// |----------|--------|
/// | title    | `©nam` |
/// | artist   | `©ART` |
/// | album    | `©alb` |
/// | comment  | `©cmt` |
/// | date     | `©day` |
/// | genre    | `©gen` |
/// | track    | `trkn` |
/// | disc     | `disk` |
///
/// The track and disc numbers are read as a big-endian `u16` from bytes 2 and 3 of the payload,
/// with the total following in bytes 4 and 5.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct M4aTag {
	pub(crate) atoms: MultiMap<[u8; 4], Atom>,
	pub(crate) pictures: Vec<Picture>,
}

impl M4aTag {
	/// Create a new empty `M4aTag`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::mp4::M4aTag;
	///
	/// let m4a_tag = M4aTag::new();
	/// assert!(m4a_tag.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// The number of atoms, not including pictures
	pub fn len(&self) -> usize {
		self.atoms.value_count()
	}

	/// Whether the tag has no atoms and no pictures
	pub fn is_empty(&self) -> bool {
		self.atoms.is_empty() && self.pictures.is_empty()
	}

	/// Every atom under `ident`, in order
	pub fn atoms(&self, ident: [u8; 4]) -> &[Atom] {
		self.atoms.get_all(&ident)
	}

	/// Get the atom under `ident` at `index`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::mp4::M4aTag;
	/// use tagkit::mp4::constants::TITLE;
	/// use tagkit::prelude::*;
	///
	/// # fn main() -> tagkit::error::Result<()> {
	/// let mut m4a_tag = M4aTag::new();
	/// m4a_tag.set_title(String::from("Foo title"))?;
	///
	/// let title = m4a_tag.atom(TITLE, 0);
	/// assert_eq!(title.map(|atom| atom.data.as_slice()), Some(&b"Foo title"[..]));
	/// # Ok(()) }
	/// ```
	pub fn atom(&self, ident: [u8; 4], index: usize) -> Option<&Atom> {
		self.atoms(ident).get(index)
	}

	/// Append an atom under `ident`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::mp4::constants::FREEFORM;
	/// use tagkit::mp4::{Atom, M4aTag};
	///
	/// let mut m4a_tag = M4aTag::new();
	/// m4a_tag.insert_atom(
	/// 	FREEFORM,
	/// 	Atom::freeform(String::from("com.apple.iTunes.MOOD"), b"Calm".to_vec()),
	/// );
	///
	/// assert_eq!(m4a_tag.atoms(FREEFORM).len(), 1);
	/// ```
	pub fn insert_atom(&mut self, ident: [u8; 4], atom: Atom) {
		self.atoms.insert(ident, atom);
	}

	/// Replace the atom under `ident` at `index`
	///
	/// Returns the old atom, or gives `atom` back as an `Err` if there is nothing at `index`.
	pub fn replace_atom(
		&mut self,
		ident: [u8; 4],
		index: usize,
		atom: Atom,
	) -> std::result::Result<Atom, Atom> {
		self.atoms.replace_at(&ident, index, atom)
	}

	/// Remove atoms under `ident`
	///
	/// With an `index`, only that atom is removed, otherwise every atom under `ident` is.
	pub fn remove_atom(&mut self, ident: [u8; 4], index: Option<usize>) -> Vec<Atom> {
		self.atoms.remove_at(&ident, index)
	}

	/// Iterate over every identifier and atom pair, in order
	pub fn iter(&self) -> impl Iterator<Item = (&[u8; 4], &Atom)> {
		self.atoms.iter()
	}

	/// Get the first atom under `ident` as text
	pub fn get_text(&self, ident: [u8; 4]) -> Option<Cow<'_, str>> {
		self.atom(ident, 0).map(Atom::as_text)
	}

	/// Replace the first atom under `ident` with a UTF-8 text atom, or add one
	///
	/// # Errors
	///
	/// This currently can't fail, the `Result` matches the other formats' `set_text`.
	pub fn set_text(&mut self, ident: [u8; 4], value: String) -> Result<()> {
		self.atoms.set(ident, Atom::text(value));
		Ok(())
	}

	/// Remove every atom under `ident`
	pub fn remove_text(&mut self, ident: [u8; 4]) {
		self.remove_atom(ident, None);
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

	/// Remove the picture at `index`
	///
	/// Returns `None` if `index` is out of bounds.
	pub fn remove_picture(&mut self, index: usize) -> Option<Picture> {
		if index >= self.pictures.len() {
			return None;
		}

		Some(self.pictures.remove(index))
	}

	fn number(&self, ident: [u8; 4]) -> Option<u32> {
		let atom = self.atom(ident, 0)?;
		match atom.data.get(2..4)? {
			[hi, lo] => Some(u32::from(u16::from_be_bytes([*hi, *lo]))),
			_ => None,
		}
	}

	fn set_number(&mut self, ident: [u8; 4], value: u32, len: usize) -> Result<()> {
		let Ok(value) = u16::try_from(value) else {
			err!(InvalidArgument("MP4 track and disc numbers must fit in 16 bits"));
		};

		// Keep the total (and anything else) from the existing atom
		let mut payload = vec![0; len];
		if let Some(existing) = self.atom(ident, 0) {
			let shared = existing.data.len().min(len);
			payload[..shared].copy_from_slice(&existing.data[..shared]);
		}

		payload[2..4].copy_from_slice(&value.to_be_bytes());

		self.atoms.set(ident, Atom::new(payload));
		Ok(())
	}
}

impl Accessor for M4aTag {
	impl_text_accessors! {
		title   => TITLE,
		artist  => ARTIST,
		album   => ALBUM,
		genre   => GENRE,
		comment => COMMENT,
		date    => YEAR,
	}

	fn track(&self) -> Option<u32> {
		self.number(TRACK_NUMBER)
	}

	fn set_track(&mut self, value: u32) -> Result<()> {
		self.set_number(TRACK_NUMBER, value, TRACK_NUMBER_LEN)
	}

	fn remove_track(&mut self) {
		self.remove_atom(TRACK_NUMBER, None);
	}

	fn disc(&self) -> Option<u32> {
		self.number(DISC_NUMBER)
	}

	fn set_disc(&mut self, value: u32) -> Result<()> {
		self.set_number(DISC_NUMBER, value, DISC_NUMBER_LEN)
	}

	fn remove_disc(&mut self) {
		self.remove_atom(DISC_NUMBER, None);
	}
}
