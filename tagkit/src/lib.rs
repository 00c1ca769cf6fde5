//! Read and modify the metadata tags embedded in audio files.
//!
//! # Supported Formats
//!
//! | Tag              | Found in                  | Read | Write                               |
//! |------------------|---------------------------|------|-------------------------------------|
//! | ID3v1            | MP3                       | X    | X                                   |
//! | ID3v2 (2.2-2.4)  | MP3                       | X    | To bytes ([`Id3v2Tag::as_bytes`])   |
//! | APEv2            | MP3                       | X    |                                     |
//! | Vorbis comments  | FLAC                      | X    |                                     |
//! | `ilst` atoms     | M4A                       | X    |                                     |
//!
//! Every tag can be modified in memory.
//!
//! [`Id3v2Tag::as_bytes`]: crate::id3::v2::Id3v2Tag::as_bytes
//!
//! # Examples
//!
//! ## Reading a generic file
//!
//! When the format doesn't matter, [`read_from_path`] will pick a reader from the file
//! extension, and returns a [`Tag`](tag::Tag).
//!
//! ```rust,no_run
//! # fn main() -> tagkit::error::Result<()> {
//! use tagkit::prelude::*;
//! use tagkit::read_from_path;
//!
//! let tag = read_from_path("test.mp3")?;
//!
//! // The common items are available on every format
//! println!("Title: {:?}", tag.title());
//! println!("Track: {:?}", tag.track());
//! # Ok(())
//! # }
//! ```
//!
//! ## Using concrete tag types
//!
//! ```rust,no_run
//! # fn main() -> tagkit::error::Result<()> {
//! use tagkit::config::{ParseOptions, ParsingMode};
//! use tagkit::flac::FlacTag;
//! use std::fs::File;
//!
//! let mut file = File::open("test.flac")?;
//!
//! // Fail on any malformed field, rather than skipping it
//! let parse_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
//! let flac_tag = FlacTag::read_from(&mut file, parse_options)?;
//!
//! for (key, value) in flac_tag.iter() {
//! 	println!("{key}={value}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modifying an ID3v1 tag
//!
//! ```rust,no_run
//! # fn main() -> tagkit::error::Result<()> {
//! use tagkit::config::ParseOptions;
//! use tagkit::id3::v1::Id3v1Tag;
//! use tagkit::prelude::*;
//!
//! let mut tag = Id3v1Tag::read_from_path("test.mp3", ParseOptions::new())?;
//! tag.set_title(String::from("Foo title"))?;
//! tag.write_to_path("test.mp3")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Important format-specific notes
//!
//! All formats have their own quirks that may produce unexpected results.
//! Be sure to read the module documentation of each format to see important notes and warnings.

pub mod config;
pub mod error;
pub(crate) mod macros;
pub mod picture;
pub mod tag;
mod util;

pub mod ape;
pub mod flac;
pub mod id3;
pub mod mp4;

pub use crate::tag::{read_from_path, read_from_path_with_options};

pub use util::multimap::MultiMap;
pub use util::text::TextEncoding;

pub mod prelude {
	//! A prelude for commonly used items in the library.
	//!
	//! This module is intended to be wildcard imported.
	//!
	//! ```rust
	//! use tagkit::prelude::*;
	//! ```

	pub use crate::tag::{Accessor, Tag, TagType};
}
