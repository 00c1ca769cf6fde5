//! ID3v1 items
//!
//! # ID3v1 notes
//!
//! See also: [`Id3v1Tag`]
//!
//! ## Genres
//!
//! ID3v1 stores the genre in a single byte ([`Id3v1Tag::genre_index`]), which is an index into
//! [`GENRES`]. A byte of `255` means the genre is unset.
//!
//! ## Track numbers
//!
//! ID3v1.1 steals the final two bytes of the comment field to store a track number, leaving
//! 28 bytes for the comment.

pub(crate) mod constants;
pub(crate) mod read;
pub(crate) mod tag;
pub(crate) mod write;

// Exports

pub use constants::GENRES;
pub use tag::Id3v1Tag;
