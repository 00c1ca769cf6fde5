
use super::header::Id3v2Version;
use super::items::{AttachedPictureFrame, CommentFrame, TextInformationFrame};
use super::{Frame, FrameId};
use crate::error::Result;
use crate::id3::v1::GENRES;
use crate::id3::v2::frame::verify_encoding_for_version;
use crate::picture::{Picture, PictureType};
use crate::tag::Accessor;
use crate::tag::accessor::impl_text_accessors;
use crate::util::multimap::MultiMap;
use crate::util::text::{TextEncoding, leading_number};

use std::borrow::Cow;

/// The frame IDs an accessor resolves to, per version
///
/// ID3v2.2 uses 3 character IDs, while ID3v2.3 and ID3v2.4 share the same 4 character IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAlias {
	/// The ID3v2.2 frame ID
	pub v2: &'static str,
	/// The ID3v2.3 and ID3v2.4 frame ID
	pub v3_v4: &'static str,
}

impl FrameAlias {
	/// Get the frame ID for `version`
	pub const fn resolve(self, version: Id3v2Version) -> &'static str {
		match version {
			Id3v2Version::V2 => self.v2,
			Id3v2Version::V3 | Id3v2Version::V4 => self.v3_v4,
		}
	}
}

macro_rules! frame_aliases {
	($($name:ident => $v3_v4:literal, $v2:literal);+ $(;)?) => {
		$(
			#[doc = concat!("`", $v3_v4, "` (`", $v2, "` in ID3v2.2)")]
			pub const $name: FrameAlias = FrameAlias {
				v2: $v2,
				v3_v4: $v3_v4,
			};
		)+
	};
}

/// The frame aliases used by the [`Accessor`] methods
pub mod aliases {
	use super::FrameAlias;

	frame_aliases! {
		TITLE   => "TIT2", "TT2";
		ARTIST  => "TPE1", "TP1";
		ALBUM   => "TALB", "TAL";
		COMMENT => "COMM", "COM";
		DATE    => "TDAT", "TDA";
		GENRE   => "TCON", "TCO";
		TRACK   => "TRCK", "TRK";
		DISC    => "TPOS", "TPA";
		PICTURE => "APIC", "PIC";
	}
}

use aliases::{ALBUM, ARTIST, COMMENT, DATE, DISC, GENRE, PICTURE, TITLE, TRACK};

macro_rules! impl_encoded_setters {
	($($name:ident => $alias:ident),+ $(,)?) => {
		paste::paste! {
			$(
				#[doc = "Sets the " $name " with a specific [`TextEncoding`]"]
				///
				/// This replaces the first frame, or adds a new one if none exist.
				///
				/// # Errors
				///
				/// * The encoding is not supported by the tag's version
				/// * The value can't be represented in `encoding`
				pub fn [<set_ $name _with_encoding>](&mut self, value: String, encoding: TextEncoding) -> Result<()> {
					self.set_text_with_encoding($alias, value, encoding)
				}
			)+
		}
	};
}

/// An `ID3v2` tag
///
/// Frames are stored by their [`FrameId`], in the order they were read. Multiple frames may
/// share the same ID.
///
/// ## [`Accessor`] methods
///
/// The accessors resolve through a per-version alias table (see [`aliases`]), so `title` is
/// `TIT2` in ID3v2.3/ID3v2.4 tags and `TT2` in ID3v2.2 tags.
///
/// When setting text through the [`Accessor`] methods, ID3v2.4 tags use [`TextEncoding::UTF8`],
/// while older tags use [`TextEncoding::UTF16`], as UTF-8 did not exist prior to ID3v2.4.
///
/// ## Unsynchronisation
///
/// Unsynchronised tags are read as-is, without reversing the unsynchronisation scheme.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Id3v2Tag {
	version: Id3v2Version,
	pub(crate) frames: MultiMap<FrameId, Frame>,
}

impl Id3v2Tag {
	/// Create a new empty `ID3v2` tag
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::id3::v2::{Id3v2Tag, Id3v2Version};
	///
	/// let id3v2_tag = Id3v2Tag::new(Id3v2Version::V3);
	/// assert!(id3v2_tag.is_empty());
	/// ```
	pub fn new(version: Id3v2Version) -> Self {
		Self {
			version,
			frames: MultiMap::new(),
		}
	}

	/// Get the tag's version
	pub fn version(&self) -> Id3v2Version {
		self.version
	}

	/// The number of frames in the tag
	pub fn len(&self) -> usize {
		self.frames.value_count()
	}

	/// Whether the tag has no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// Iterate over every frame, along with its ID
	pub fn iter(&self) -> impl Iterator<Item = (&FrameId, &Frame)> {
		self.frames.iter()
	}

	/// Get the frame with `id` at `index`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::id3::v2::{Frame, FrameId, Id3v2Tag, TextInformationFrame};
	/// use tagkit::TextEncoding;
	///
	/// # fn main() -> tagkit::error::Result<()> {
	/// let mut tag = Id3v2Tag::default();
	/// tag.insert_frame(
	/// 	FrameId::new("TIT2")?,
	/// 	Frame::Text(TextInformationFrame::new(TextEncoding::UTF8, "Foo")?),
	/// );
	///
	/// assert!(tag.frame("TIT2", 0).is_some());
	/// assert!(tag.frame("TIT2", 1).is_none());
	/// # Ok(()) }
	/// ```
	pub fn frame(&self, id: &str, index: usize) -> Option<&Frame> {
		self.frames.get_at(id, index)
	}

	/// Get all frames with `id`
	pub fn frames(&self, id: &str) -> &[Frame] {
		self.frames.get_all(id)
	}

	/// Append a frame
	///
	/// Frames with IDs that don't match the tag's version are kept, but will not be written.
	pub fn insert_frame(&mut self, id: FrameId, frame: Frame) {
		self.frames.insert(id, frame);
	}

	/// Replace the frame with `id` at `index`
	///
	/// Returns the replaced frame, or gives `frame` back if there is nothing at `index`.
	pub fn replace_frame(&mut self, id: &str, index: usize, frame: Frame) -> std::result::Result<Frame, Frame> {
		self.frames.replace_at(id, index, frame)
	}

	/// Remove frames with `id`
	///
	/// With an `index`, only the frame at that position is removed, otherwise all frames with
	/// `id` are removed.
	pub fn remove_frame(&mut self, id: &str, index: Option<usize>) -> Vec<Frame> {
		self.frames.remove_at(id, index)
	}

	/// Get the text of the first frame for `alias`
	///
	/// This is only available for [`Frame::Text`] frames.
	pub fn get_text(&self, alias: FrameAlias) -> Option<Cow<'_, str>> {
		match self.frame(alias.resolve(self.version), 0)? {
			Frame::Text(text) => Some(Cow::Owned(text.text())),
			_ => None,
		}
	}

	/// Set the text of the first frame for `alias`
	///
	/// See [`Id3v2Tag::set_text_with_encoding`]. The encoding is chosen based on the tag's version.
	///
	/// # Errors
	///
	/// See [`Id3v2Tag::set_text_with_encoding`]
	pub fn set_text(&mut self, alias: FrameAlias, value: String) -> Result<()> {
		self.set_text_with_encoding(alias, value, self.default_encoding())
	}

	/// Set the text of the first frame for `alias`, with a specific [`TextEncoding`]
	///
	/// This replaces the first frame, or adds a new one if none exist.
	///
	/// # Errors
	///
	/// * `encoding` is [`TextEncoding::UTF8`] or [`TextEncoding::UTF16BE`] in a tag prior to ID3v2.4
	/// * `value` can't be represented in `encoding`
	pub fn set_text_with_encoding(
		&mut self,
		alias: FrameAlias,
		value: String,
		encoding: TextEncoding,
	) -> Result<()> {
		verify_encoding_for_version(encoding, self.version)?;

		let frame = Frame::Text(TextInformationFrame::new(encoding, &value)?);
		self.set_first(alias, frame);
		Ok(())
	}

	/// Remove every frame for `alias`
	pub fn remove_text(&mut self, alias: FrameAlias) {
		let _ = self.remove_frame(alias.resolve(self.version), None);
	}

	impl_encoded_setters! {
		title => TITLE,
		artist => ARTIST,
		album => ALBUM,
		date => DATE,
		genre => GENRE,
	}

	/// Sets the track number with a specific [`TextEncoding`]
	///
	/// # Errors
	///
	/// See [`Id3v2Tag::set_text_with_encoding`]
	pub fn set_track_with_encoding(&mut self, value: u32, encoding: TextEncoding) -> Result<()> {
		self.set_text_with_encoding(TRACK, value.to_string(), encoding)
	}

	/// Sets the disc number with a specific [`TextEncoding`]
	///
	/// # Errors
	///
	/// See [`Id3v2Tag::set_text_with_encoding`]
	pub fn set_disc_with_encoding(&mut self, value: u32, encoding: TextEncoding) -> Result<()> {
		self.set_text_with_encoding(DISC, value.to_string(), encoding)
	}

	/// Sets the comment with a specific [`TextEncoding`]
	///
	/// This creates a [`CommentFrame`] with the language "eng" and an empty description,
	/// replacing the first comment if one exists.
	///
	/// # Errors
	///
	/// See [`Id3v2Tag::set_text_with_encoding`]
	pub fn set_comment_with_encoding(&mut self, value: String, encoding: TextEncoding) -> Result<()> {
		verify_encoding_for_version(encoding, self.version)?;

		let frame = Frame::Comment(CommentFrame::new(
			encoding,
			CommentFrame::DEFAULT_LANGUAGE,
			String::new(),
			&value,
		)?);
		self.set_first(COMMENT, frame);
		Ok(())
	}

	/// Iterate over all pictures
	pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
		self.frames(PICTURE.resolve(self.version))
			.iter()
			.filter_map(|frame| match frame {
				Frame::Picture(picture) => Some(&picture.picture),
				_ => None,
			})
	}

	/// Get a picture by type
	///
	/// `index` only counts pictures matching `filter`, with `None` matching any picture type.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::id3::v2::Id3v2Tag;
	/// use tagkit::picture::{Picture, PictureType};
	///
	/// let mut tag = Id3v2Tag::default();
	/// tag.add_picture(Picture::unchecked(vec![1]).pic_type(PictureType::Artist).build());
	/// tag.add_picture(Picture::unchecked(vec![2]).pic_type(PictureType::CoverFront).build());
	///
	/// let cover = tag.picture(Some(PictureType::CoverFront), 0).unwrap();
	/// assert_eq!(cover.data(), &[2]);
	///
	/// assert_eq!(tag.picture(None, 1).unwrap().data(), &[2]);
	/// ```
	pub fn picture(&self, filter: Option<PictureType>, index: usize) -> Option<&Picture> {
		self.pictures()
			.filter(|picture| picture.pic_type().matches(filter))
			.nth(index)
	}

	/// Add a picture
	///
	/// The description is written with [`Picture::description_encoding`], if it is
	/// unsupported by the tag's version, the tag's default encoding is used instead.
	pub fn add_picture(&mut self, picture: Picture) {
		let mut frame = AttachedPictureFrame::new(picture);
		if verify_encoding_for_version(frame.encoding, self.version).is_err() {
			frame.encoding = self.default_encoding();
		}

		self.frames.insert(
			FrameId::from_static(PICTURE.resolve(self.version)),
			Frame::Picture(frame),
		);
	}

	/// Remove a picture by type
	///
	/// See [`Id3v2Tag::picture`] for how `filter` and `index` are used.
	///
	/// Returns the removed picture, if any.
	pub fn remove_picture(&mut self, filter: Option<PictureType>, index: usize) -> Option<Picture> {
		let id = PICTURE.resolve(self.version);
		let position = self
			.frames(id)
			.iter()
			.enumerate()
			.filter(|(_, frame)| {
				matches!(frame, Frame::Picture(p) if p.picture.pic_type().matches(filter))
			})
			.nth(index)?
			.0;

		match self.remove_frame(id, Some(position)).pop()? {
			Frame::Picture(frame) => Some(frame.picture),
			_ => None,
		}
	}

	fn default_encoding(&self) -> TextEncoding {
		match self.version {
			Id3v2Version::V4 => TextEncoding::UTF8,
			Id3v2Version::V2 | Id3v2Version::V3 => TextEncoding::UTF16,
		}
	}

	fn set_first(&mut self, alias: FrameAlias, frame: Frame) {
		let id = alias.resolve(self.version);
		if let Err(frame) = self.frames.replace_at(id, 0, frame) {
			self.frames.insert(FrameId::from_static(id), frame);
		}
	}

	fn number(&self, alias: FrameAlias) -> Option<u32> {
		leading_number(&self.get_text(alias)?)
	}
}

impl Accessor for Id3v2Tag {
	impl_text_accessors! {
		title => TITLE,
		artist => ARTIST,
		album => ALBUM,
		date => DATE,
	}

	fn genre(&self) -> Option<Cow<'_, str>> {
		let genre = self.get_text(GENRE)?;

		// ID3v1 genre references, such as "(17)" or "17"
		let index = genre
			.strip_prefix('(')
			.and_then(|rest| rest.strip_suffix(')'))
			.unwrap_or(&genre)
			.parse::<usize>()
			.ok();

		match index.and_then(|i| GENRES.get(i)) {
			Some(name) => Some(Cow::Borrowed(*name)),
			None => Some(genre),
		}
	}

	fn set_genre(&mut self, value: String) -> Result<()> {
		self.set_text(GENRE, value)
	}

	fn remove_genre(&mut self) {
		self.remove_text(GENRE);
	}

	fn comment(&self) -> Option<Cow<'_, str>> {
		self.frames(COMMENT.resolve(self.version))
			.iter()
			.find_map(|frame| match frame {
				Frame::Comment(comment) => Some(Cow::Owned(comment.text())),
				_ => None,
			})
	}

	fn set_comment(&mut self, value: String) -> Result<()> {
		self.set_comment_with_encoding(value, self.default_encoding())
	}

	fn remove_comment(&mut self) {
		let _ = self.remove_frame(COMMENT.resolve(self.version), None);
	}

	fn track(&self) -> Option<u32> {
		self.number(TRACK)
	}

	fn set_track(&mut self, value: u32) -> Result<()> {
		self.set_text(TRACK, value.to_string())
	}

	fn remove_track(&mut self) {
		self.remove_text(TRACK);
	}

	fn disc(&self) -> Option<u32> {
		self.number(DISC)
	}

	fn set_disc(&mut self, value: u32) -> Result<()> {
		self.set_text(DISC, value.to_string())
	}

	fn remove_disc(&mut self) {
		self.remove_text(DISC);
	}
}
