use super::constants::{
	ID3V1_TAG_MARKER, ID3V1_TAG_SIZE, NO_GENRE, TEXT_FIELD_LEN, V1_1_COMMENT_LEN, YEAR_FIELD_LEN,
};
use super::tag::Id3v1Tag;
use crate::error::Result;
use crate::util::io::seek_from_end;

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

impl Id3v1Tag {
	/// Encode the tag as exactly 128 bytes
	///
	/// Fields are NUL padded, a field filling its entire width has no terminator.
	pub fn as_bytes(&self) -> [u8; 128] {
		let mut writer = [0; ID3V1_TAG_SIZE as usize];
		writer[..3].copy_from_slice(&ID3V1_TAG_MARKER);

		let mut pos = 3;
		for (value, width) in [
			(&self.title, TEXT_FIELD_LEN),
			(&self.artist, TEXT_FIELD_LEN),
			(&self.album, TEXT_FIELD_LEN),
			(&self.year, YEAR_FIELD_LEN),
		] {
			write_field(&mut writer[pos..pos + width], value.as_deref());
			pos += width;
		}

		match self.track {
			Some(track) => {
				write_field(
					&mut writer[pos..pos + V1_1_COMMENT_LEN],
					self.comment.as_deref(),
				);
				// writer[pos + 28] stays as the NUL separator
				writer[pos + V1_1_COMMENT_LEN + 1] = track;
			},
			None => write_field(
				&mut writer[pos..pos + TEXT_FIELD_LEN],
				self.comment.as_deref(),
			),
		}

		writer[127] = self.genre.unwrap_or(NO_GENRE);

		writer
	}

	/// Write the tag to `file`
	///
	/// An existing ID3v1 tag is overwritten in place, otherwise the tag is appended.
	///
	/// # Errors
	///
	/// [`std::io::Error`]
	pub fn write_to<F>(&self, file: &mut F) -> Result<()>
	where
		F: Read + Write + Seek,
	{
		let tag = self.as_bytes();

		let mut marker = [0; 3];
		if seek_from_end(file, ID3V1_TAG_SIZE)? {
			file.read_exact(&mut marker)?;
		}

		if marker == ID3V1_TAG_MARKER {
			log::debug!("Overwriting existing ID3v1 tag");
			file.seek(SeekFrom::Current(-3))?;
		} else {
			file.seek(SeekFrom::End(0))?;
		}

		file.write_all(&tag)?;
		Ok(())
	}

	/// Write the tag to the file at `path`
	///
	/// # Errors
	///
	/// See [`Id3v1Tag::write_to`]
	pub fn write_to_path<P>(&self, path: P) -> Result<()>
	where
		P: AsRef<Path>,
	{
		let mut file = OpenOptions::new().read(true).write(true).open(path)?;
		self.write_to(&mut file)
	}
}

// Every field is verified to be Latin-1 on the way in, so each char is a single byte
fn write_field(dest: &mut [u8], value: Option<&str>) {
	let Some(value) = value else {
		return;
	};

	for (d, c) in dest.iter_mut().zip(value.chars()) {
		*d = c as u8;
	}
}

#[cfg(test)]
mod tests {
	use crate::config::{ParseOptions, ParsingMode};
	use crate::id3::v1::Id3v1Tag;
	use crate::tag::Accessor;

	use std::io::Cursor;

	fn sample_tag() -> Id3v1Tag {
		let mut tag = Id3v1Tag::new();
		tag.set_title(String::from("Foo title")).unwrap();
		tag.set_artist(String::from("Bar artist")).unwrap();
		tag.set_album(String::from("Baz album")).unwrap();
		tag.set_date(String::from("1984")).unwrap();
		tag.set_comment(String::from("Qux comment")).unwrap();
		tag.set_track(1).unwrap();
		tag.set_genre_index(32);
		tag
	}

	#[test_log::test]
	fn layout() {
		let bytes = sample_tag().as_bytes();

		assert_eq!(&bytes[..3], b"TAG");
		assert_eq!(&bytes[3..12], b"Foo title");
		assert!(bytes[12..33].iter().all(|b| *b == 0));
		assert_eq!(&bytes[93..97], b"1984");
		assert_eq!(bytes[125], 0);
		assert_eq!(bytes[126], 1);
		assert_eq!(bytes[127], 32);

		let reparsed = Id3v1Tag::parse(bytes, ParsingMode::Strict).unwrap();
		assert_eq!(reparsed, sample_tag());
	}

	#[test_log::test]
	fn full_width_field_has_no_terminator() {
		let mut tag = Id3v1Tag::new();
		tag.set_title("t".repeat(30)).unwrap();

		let bytes = tag.as_bytes();
		assert!(bytes[3..33].iter().all(|b| *b == b't'));
		assert_eq!(bytes[33], 0);
		assert_eq!(bytes[127], 255);
	}

	#[test_log::test]
	fn overwrite_in_place() {
		let mut file = Cursor::new(vec![1; 100]);

		sample_tag().write_to(&mut file).unwrap();
		assert_eq!(file.get_ref().len(), 228);

		let mut tag = sample_tag();
		tag.set_title(String::from("Another")).unwrap();
		tag.write_to(&mut file).unwrap();
		assert_eq!(file.get_ref().len(), 228);
		assert!(file.get_ref()[..100].iter().all(|b| *b == 1));

		let read = Id3v1Tag::read_from(&mut file, ParseOptions::new()).unwrap();
		assert_eq!(read.title().as_deref(), Some("Another"));
	}
}
