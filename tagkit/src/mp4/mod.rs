//! MP4 specific items
//!
//! ## File notes
//!
//! Only files with an `"M4A "` major brand are supported. The metadata is read from the
//! `moov.udta.meta.ilst` atom, see [`M4aTag`].
mod atom_info;
pub(crate) mod ilst;
mod read;

// Exports

/// The identifiers of well-known `ilst` items
pub mod constants {
	pub use super::ilst::constants::{
		ALBUM, ALBUM_ARTIST, ARTIST, COMMENT, COMPILATION, COMPOSER, COPYRIGHT, COVER_ART,
		DESCRIPTION, DISC_NUMBER, ENCODER, FREEFORM, GENRE, GENRE_ID, GROUPING, LONG_DESCRIPTION,
		LYRICS, SORT_ALBUM, SORT_ALBUM_ARTIST, SORT_ARTIST, SORT_COMPOSER, SORT_TITLE, TEMPO, TITLE,
		TRACK_NUMBER, TV_SHOW_NAME, YEAR,
	};
}

pub use ilst::M4aTag;
pub use ilst::atom::Atom;
