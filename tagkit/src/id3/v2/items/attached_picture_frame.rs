use crate::error::Result;
use crate::id3::v2::frame::content::split_encoding;
use crate::id3::v2::frame::verify_encoding_for_version;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::FrameFlags;
use crate::macros::{err, id3v2_err};
use crate::picture::{MimeType, Picture, PictureType};
use crate::util::text::{
	TextEncoding, decode_terminated, latin1_decode, latin1_encode, split_terminated,
};

/// An `ID3v2` attached picture frame
///
/// This is simply a wrapper around [`Picture`] to include a [`TextEncoding`]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttachedPictureFrame {
	/// The frame flags
	pub flags: FrameFlags,
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// The picture itself
	pub picture: Picture,
}

impl AttachedPictureFrame {
	/// Create a new [`AttachedPictureFrame`]
	///
	/// The encoding is taken from [`Picture::description_encoding`].
	pub fn new(picture: Picture) -> Self {
		Self {
			flags: FrameFlags::default(),
			encoding: picture.description_encoding,
			picture,
		}
	}

	/// Get an [`AttachedPictureFrame`] from ID3v2 A/PIC bytes
	///
	/// NOTE: This expects *only* the frame content
	///
	/// # Errors
	///
	/// * There isn't enough data present
	/// * The picture type is unknown
	/// * Unable to decode any of the text
	///
	/// ID3v2.2:
	///
	/// * The image format is unknown
	pub fn parse(content: &[u8], flags: FrameFlags, version: Id3v2Version) -> Result<Self> {
		let (encoding, content) = split_encoding(content)?;

		let (mime_type, content) = if version == Id3v2Version::V2 {
			let Some((format, content)) = content.split_first_chunk::<3>() else {
				id3v2_err!(BadFrameLength);
			};

			let Some(mime_type) = MimeType::from_id3v22_format(*format) else {
				id3v2_err!(BadPictureFormat(
					String::from_utf8_lossy(format).into_owned()
				));
			};

			(Some(mime_type), content)
		} else {
			let (mime_type, content) = split_terminated(content, TextEncoding::Latin1)?;
			let mime_type = (!mime_type.is_empty())
				.then(|| MimeType::from_str(&latin1_decode(mime_type)));

			(mime_type, content)
		};

		let Some((&pic_type, content)) = content.split_first() else {
			id3v2_err!(BadFrameLength);
		};

		let Some(pic_type) = PictureType::from_u8(pic_type) else {
			err!(NotAPicture);
		};

		let (description, data) = decode_terminated(content, encoding)?;

		let mut builder = Picture::unchecked(data.to_vec())
			.pic_type(pic_type)
			.description_encoding(encoding);

		if let Some(mime_type) = mime_type {
			builder = builder.mime_type(mime_type);
		}

		if !description.is_empty() {
			builder = builder.description(description);
		}

		Ok(Self {
			flags,
			encoding,
			picture: builder.build(),
		})
	}

	/// Convert an [`AttachedPictureFrame`] to a ID3v2 A/PIC byte Vec
	///
	/// NOTE: This does not include the frame header
	///
	/// # Errors
	///
	/// * The encoding is not supported by `version`
	/// * The description can't be represented in the encoding
	///
	/// ID3v2.2:
	///
	/// * The MIME type has no 3 character image format
	pub fn as_bytes(&self, version: Id3v2Version) -> Result<Vec<u8>> {
		verify_encoding_for_version(self.encoding, version)?;

		let mut data = vec![self.encoding as u8];

		if version == Id3v2Version::V2 {
			let format = self
				.picture
				.mime_type
				.as_ref()
				.and_then(MimeType::as_id3v22_format);

			let Some(format) = format else {
				id3v2_err!(BadPictureFormat(self.picture.mime_str().to_owned()));
			};

			data.extend(format);
		} else {
			data.extend(latin1_encode(self.picture.mime_str())?);
			data.push(0);
		}

		data.push(self.picture.pic_type.as_u8());

		let description = self.picture.description.as_deref().unwrap_or_default();
		data.extend(self.encoding.encode(description, true)?);

		data.extend(&self.picture.data);

		Ok(data)
	}
}

#[cfg(test)]
mod tests {
	use crate::error::{ErrorKind, Id3v2ErrorKind};
	use crate::id3::v2::header::Id3v2Version;
	use crate::id3::v2::{AttachedPictureFrame, FrameFlags};
	use crate::picture::{MimeType, Picture, PictureType};

	fn test_picture() -> Picture {
		Picture::unchecked(vec![0x89, b'P', b'N', b'G', 1, 2, 3])
			.pic_type(PictureType::CoverFront)
			.mime_type(MimeType::Png)
			.description("cover")
			.build()
	}

	#[test_log::test]
	fn apic() {
		let frame = AttachedPictureFrame::new(test_picture());
		let bytes = frame.as_bytes(Id3v2Version::V3).unwrap();

		assert_eq!(&bytes[..11], b"\x00image/png\x00");
		assert_eq!(bytes[11], 3);

		let parsed = AttachedPictureFrame::parse(&bytes, FrameFlags::default(), Id3v2Version::V3)
			.unwrap();
		assert_eq!(parsed.picture, test_picture());
	}

	#[test_log::test]
	fn pic_v22() {
		let frame = AttachedPictureFrame::new(test_picture());
		let bytes = frame.as_bytes(Id3v2Version::V2).unwrap();
		assert_eq!(&bytes[..4], b"\x00PNG");

		let parsed = AttachedPictureFrame::parse(&bytes, FrameFlags::default(), Id3v2Version::V2)
			.unwrap();
		assert_eq!(parsed.picture.mime_type(), Some(&MimeType::Png));
		assert_eq!(parsed.picture.data(), test_picture().data());
	}

	#[test_log::test]
	fn pic_v22_unknown_format() {
		let err = AttachedPictureFrame::parse(
			b"\x00XYZ\x03\x00data",
			FrameFlags::default(),
			Id3v2Version::V2,
		)
		.unwrap_err();

		assert!(matches!(
			err.kind(),
			ErrorKind::Id3v2(e) if matches!(e.kind(), Id3v2ErrorKind::BadPictureFormat(_))
		));
	}

	#[test_log::test]
	fn missing_picture_type() {
		let err = AttachedPictureFrame::parse(
			b"\x00image/png\x00",
			FrameFlags::default(),
			Id3v2Version::V4,
		)
		.unwrap_err();

		assert!(matches!(
			err.kind(),
			ErrorKind::Id3v2(e) if matches!(e.kind(), Id3v2ErrorKind::BadFrameLength)
		));
	}
}
