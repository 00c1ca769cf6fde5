use super::Tag;
use crate::ape::ApeTag;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::flac::FlacTag;
use crate::id3::v1::Id3v1Tag;
use crate::id3::v2::Id3v2Tag;
use crate::macros::err;
use crate::mp4::M4aTag;

use std::ffi::OsStr;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

/// The containers a tag can be read from, chosen by file extension
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FileType {
	Mpeg,
	Mp4,
	Flac,
}

impl FileType {
	fn from_ext<E>(ext: E) -> Option<Self>
	where
		E: AsRef<OsStr>,
	{
		let ext = ext.as_ref().to_str()?.to_ascii_lowercase();

		match ext.as_str() {
			"mp3" => Some(Self::Mpeg),
			"m4a" | "mp4" | "m4p" => Some(Self::Mp4),
			"flac" | "fla" => Some(Self::Flac),
			_ => None,
		}
	}

	fn from_path<P>(path: P) -> Option<Self>
	where
		P: AsRef<Path>,
	{
		let ext = path.as_ref().extension()?;
		Self::from_ext(ext)
	}
}

/// Read a [`Tag`] from a path, using the default [`ParseOptions`]
///
/// See [`read_from_path_with_options`].
///
/// # Errors
///
/// See [`read_from_path_with_options`]
///
/// # Examples
///
/// ```rust,no_run
/// use tagkit::prelude::*;
/// use tagkit::read_from_path;
///
/// # fn main() -> tagkit::error::Result<()> {
/// let tag = read_from_path("test.flac")?;
/// println!("Title: {:?}", tag.title());
/// # Ok(()) }
/// ```
pub fn read_from_path<P>(path: P) -> Result<Tag>
where
	P: AsRef<Path>,
{
	read_from_path_with_options(path, ParseOptions::new())
}

/// Read a [`Tag`] from a path
///
/// The format is chosen by the file extension, ignoring case:
///
/// | Extension               | Tag                                   |
/// |-------------------------|---------------------------------------|
/// | `mp3`                   | ID3v2, falling back to APE then ID3v1 |
/// | `m4a`, `mp4`, `m4p`     | MP4 `ilst`                            |
/// | `flac`, `fla`           | FLAC Vorbis comments and pictures     |
///
/// For MP3 files, any error other than an I/O error moves on to the next tag. If none of them
/// can be read, the ID3v1 error is returned.
///
/// # Errors
///
/// * [`ErrorKind::UnknownFormat`](crate::error::ErrorKind::UnknownFormat): The extension is missing
///   or unsupported
/// * [`std::io::Error`]
/// * Any error from the format's reader
pub fn read_from_path_with_options<P>(path: P, parse_options: ParseOptions) -> Result<Tag>
where
	P: AsRef<Path>,
{
	let path = path.as_ref();

	let Some(file_type) = FileType::from_path(path) else {
		log::debug!("Unable to determine the format of {}", path.display());
		err!(UnknownFormat);
	};

	log::debug!("Reading {} as {:?}", path.display(), file_type);

	let mut file = File::open(path)?;
	match file_type {
		FileType::Mpeg => read_mpeg(&mut file, parse_options),
		FileType::Mp4 => M4aTag::read_from(&mut file, parse_options).map(Tag::M4a),
		FileType::Flac => FlacTag::read_from(&mut file, parse_options).map(Tag::Flac),
	}
}

fn read_mpeg<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Tag>
where
	R: Read + Seek,
{
	match Id3v2Tag::read_from(reader, parse_options) {
		Ok(tag) => return Ok(Tag::Id3v2(tag)),
		Err(e) if e.is_io() => return Err(e),
		Err(e) => log::debug!("Unable to read an ID3v2 tag ({e}), trying APE"),
	}

	match ApeTag::read_from(reader, parse_options) {
		Ok(tag) => return Ok(Tag::Ape(tag)),
		Err(e) if e.is_io() => return Err(e),
		Err(e) => log::debug!("Unable to read an APE tag ({e}), trying ID3v1"),
	}

	Id3v1Tag::read_from(reader, parse_options).map(Tag::Id3v1)
}

#[cfg(test)]
mod tests {
	use super::{FileType, read_mpeg};
	use crate::config::ParseOptions;
	use crate::tag::TagType;

	use std::io::Cursor;

	#[test_log::test]
	fn file_type_from_path() {
		assert_eq!(FileType::from_path("a/b.MP3"), Some(FileType::Mpeg));
		assert_eq!(FileType::from_path("b.m4p"), Some(FileType::Mp4));
		assert_eq!(FileType::from_path("b.Fla"), Some(FileType::Flac));
		assert_eq!(FileType::from_path("b.ogg"), None);
		assert_eq!(FileType::from_path("mp3"), None);
	}

	#[test_log::test]
	fn mpeg_falls_back_to_id3v1() {
		let mut data = vec![0xFF; 64];
		let mut id3v1 = [0; 128];
		id3v1[..3].copy_from_slice(b"TAG");
		id3v1[3..6].copy_from_slice(b"Foo");
		id3v1[127] = 255;
		data.extend(id3v1);

		let tag = read_mpeg(&mut Cursor::new(data), ParseOptions::new()).unwrap();
		assert_eq!(tag.tag_type(), TagType::Id3v1);
	}

	#[test_log::test]
	fn mpeg_skips_truncated_ape_tag() {
		let mut data = vec![0xFF; 64];

		// An APE tag whose single item is cut off after 4 bytes
		data.extend([3, 0, 0, 0]);
		data.extend(b"APETAGEX");
		data.extend(2000_u32.to_le_bytes());
		data.extend(36_u32.to_le_bytes());
		data.extend(1_u32.to_le_bytes());
		data.extend([0; 12]);

		let mut id3v1 = [0; 128];
		id3v1[..3].copy_from_slice(b"TAG");
		id3v1[3..6].copy_from_slice(b"Foo");
		id3v1[127] = 255;
		data.extend(id3v1);

		let tag = read_mpeg(&mut Cursor::new(data), ParseOptions::new()).unwrap();
		assert_eq!(tag.tag_type(), TagType::Id3v1);
	}

	#[test_log::test]
	fn mpeg_without_tags() {
		let err = read_mpeg(&mut Cursor::new(vec![0xFF; 300]), ParseOptions::new()).unwrap_err();
		assert!(err.is_not_found());
	}
}
