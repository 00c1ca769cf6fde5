//! Utilities for generic tag handling

pub(crate) mod accessor;
mod read;
mod tag_type;

use crate::ape::ApeTag;
use crate::error::Result;
use crate::flac::FlacTag;
use crate::id3::v1::Id3v1Tag;
use crate::id3::v2::Id3v2Tag;
use crate::mp4::M4aTag;
use crate::picture::{Picture, PictureType};

use std::borrow::Cow;

// Exports
pub use accessor::Accessor;
pub use read::{read_from_path, read_from_path_with_options};
pub use tag_type::TagType;

// Forwards every `Accessor` method to the wrapped tag
macro_rules! forward_accessors {
	($($name:ident),+ $(,)?) => {
		paste::paste! {
			$(
				fn $name(&self) -> Option<Cow<'_, str>> {
					match self {
						Tag::Id3v1(tag) => tag.$name(),
						Tag::Id3v2(tag) => tag.$name(),
						Tag::Ape(tag) => tag.$name(),
						Tag::Flac(tag) => tag.$name(),
						Tag::M4a(tag) => tag.$name(),
					}
				}

				fn [<set_ $name>](&mut self, value: String) -> Result<()> {
					match self {
						Tag::Id3v1(tag) => tag.[<set_ $name>](value),
						Tag::Id3v2(tag) => tag.[<set_ $name>](value),
						Tag::Ape(tag) => tag.[<set_ $name>](value),
						Tag::Flac(tag) => tag.[<set_ $name>](value),
						Tag::M4a(tag) => tag.[<set_ $name>](value),
					}
				}

				fn [<remove_ $name>](&mut self) {
					match self {
						Tag::Id3v1(tag) => tag.[<remove_ $name>](),
						Tag::Id3v2(tag) => tag.[<remove_ $name>](),
						Tag::Ape(tag) => tag.[<remove_ $name>](),
						Tag::Flac(tag) => tag.[<remove_ $name>](),
						Tag::M4a(tag) => tag.[<remove_ $name>](),
					}
				}
			)+
		}
	};
}

// Same as `forward_accessors`, for the numeric accessors
macro_rules! forward_number_accessors {
	($($name:ident),+ $(,)?) => {
		paste::paste! {
			$(
				fn $name(&self) -> Option<u32> {
					match self {
						Tag::Id3v1(tag) => tag.$name(),
						Tag::Id3v2(tag) => tag.$name(),
						Tag::Ape(tag) => tag.$name(),
						Tag::Flac(tag) => tag.$name(),
						Tag::M4a(tag) => tag.$name(),
					}
				}

				fn [<set_ $name>](&mut self, value: u32) -> Result<()> {
					match self {
						Tag::Id3v1(tag) => tag.[<set_ $name>](value),
						Tag::Id3v2(tag) => tag.[<set_ $name>](value),
						Tag::Ape(tag) => tag.[<set_ $name>](value),
						Tag::Flac(tag) => tag.[<set_ $name>](value),
						Tag::M4a(tag) => tag.[<set_ $name>](value),
					}
				}

				fn [<remove_ $name>](&mut self) {
					match self {
						Tag::Id3v1(tag) => tag.[<remove_ $name>](),
						Tag::Id3v2(tag) => tag.[<remove_ $name>](),
						Tag::Ape(tag) => tag.[<remove_ $name>](),
						Tag::Flac(tag) => tag.[<remove_ $name>](),
						Tag::M4a(tag) => tag.[<remove_ $name>](),
					}
				}
			)+
		}
	};
}

/// A tag of any supported format
///
/// This is the return type of [`read_from_path`]. The common items are available through
/// [`Accessor`], anything else requires matching on the format.
///
/// ## Usage
///
/// ```rust
/// use tagkit::id3::v1::Id3v1Tag;
/// use tagkit::prelude::*;
/// use tagkit::tag::{Tag, TagType};
///
/// # fn main() -> tagkit::error::Result<()> {
/// let mut tag = Tag::from(Id3v1Tag::new());
/// assert_eq!(tag.tag_type(), TagType::Id3v1);
///
/// tag.set_title(String::from("Foo title"))?;
/// assert_eq!(tag.title().as_deref(), Some("Foo title"));
///
/// // ID3v1 has no pictures
/// assert!(tag.picture(None, 0).is_none());
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
	/// An ID3v1 tag
	Id3v1(Id3v1Tag),
	/// An ID3v2 tag
	Id3v2(Id3v2Tag),
	/// An APEv2 tag
	Ape(ApeTag),
	/// FLAC Vorbis comments and pictures
	Flac(FlacTag),
	/// An MP4 `ilst` atom
	M4a(M4aTag),
}

impl Tag {
	/// The format of the tag
	pub fn tag_type(&self) -> TagType {
		match self {
			Tag::Id3v1(_) => TagType::Id3v1,
			Tag::Id3v2(_) => TagType::Id3v2,
			Tag::Ape(_) => TagType::Ape,
			Tag::Flac(_) => TagType::Flac,
			Tag::M4a(_) => TagType::M4a,
		}
	}

	/// Get the picture at `index`, counting only pictures matching `filter`
	///
	/// A `filter` of `None` matches every picture. This is always `None` for ID3v1 and APE tags.
	pub fn picture(&self, filter: Option<PictureType>, index: usize) -> Option<&Picture> {
		match self {
			Tag::Id3v2(tag) => tag.picture(filter, index),
			Tag::Flac(tag) => tag.picture(filter, index),
			Tag::M4a(tag) => tag.picture(filter, index),
			Tag::Id3v1(_) | Tag::Ape(_) => None,
		}
	}
}

impl Accessor for Tag {
	forward_accessors!(title, artist, album, genre, comment, date);
	forward_number_accessors!(track, disc);
}

impl From<Id3v1Tag> for Tag {
	fn from(tag: Id3v1Tag) -> Self {
		Tag::Id3v1(tag)
	}
}

impl From<Id3v2Tag> for Tag {
	fn from(tag: Id3v2Tag) -> Self {
		Tag::Id3v2(tag)
	}
}

impl From<ApeTag> for Tag {
	fn from(tag: ApeTag) -> Self {
		Tag::Ape(tag)
	}
}

impl From<FlacTag> for Tag {
	fn from(tag: FlacTag) -> Self {
		Tag::Flac(tag)
	}
}

impl From<M4aTag> for Tag {
	fn from(tag: M4aTag) -> Self {
		Tag::M4a(tag)
	}
}
