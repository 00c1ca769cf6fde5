use super::frame_id_fits;
use crate::error::Result;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::id3::v2::{Frame, FrameId};
use crate::macros::err;

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

/// Write a single frame, with its header
///
/// Frames that can't be represented in `version` are skipped.
pub(super) fn write_frame<W>(
	writer: &mut W,
	id: &FrameId,
	frame: &Frame,
	version: Id3v2Version,
) -> Result<()>
where
	W: Write,
{
	if !frame_id_fits(id.as_str(), version) {
		log::warn!(
			"Discarding frame \"{id}\", its ID is not valid in ID3v2.{}",
			version.major()
		);
		return Ok(());
	}

	let content = frame.as_bytes(version)?;
	if content.is_empty() {
		log::warn!("Discarding empty frame \"{id}\"");
		return Ok(());
	}

	writer.write_all(id.as_str().as_bytes())?;

	let len = content.len() as u32;
	match version {
		Id3v2Version::V2 => {
			if len > 0x00FF_FFFF {
				err!(TooMuchData);
			}

			writer.write_u24::<BigEndian>(len)?;
		},
		Id3v2Version::V3 => {
			writer.write_u32::<BigEndian>(len)?;
			writer.write_u16::<BigEndian>(frame.flags().raw())?;
		},
		Id3v2Version::V4 => {
			writer.write_u32::<BigEndian>(len.synch()?)?;
			writer.write_u16::<BigEndian>(frame.flags().raw())?;
		},
	}

	writer.write_all(&content)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::write_frame;
	use crate::id3::v2::header::Id3v2Version;
	use crate::id3::v2::{Frame, FrameId, TextInformationFrame};
	use crate::util::text::TextEncoding;

	fn title() -> Frame {
		Frame::Text(TextInformationFrame::new(TextEncoding::Latin1, "Foo").unwrap())
	}

	#[test_log::test]
	fn frame_headers() {
		let mut v2 = Vec::new();
		write_frame(&mut v2, &FrameId::new("TT2").unwrap(), &title(), Id3v2Version::V2).unwrap();
		assert_eq!(v2, b"TT2\x00\x00\x04\x00Foo");

		let mut v4 = Vec::new();
		write_frame(&mut v4, &FrameId::new("TIT2").unwrap(), &title(), Id3v2Version::V4).unwrap();
		assert_eq!(v4, b"TIT2\x00\x00\x00\x04\x00\x00\x00Foo");
	}

	#[test_log::test]
	fn mismatched_id_is_skipped() {
		let mut out = Vec::new();
		write_frame(&mut out, &FrameId::new("TT2").unwrap(), &title(), Id3v2Version::V3).unwrap();
		assert!(out.is_empty());
	}
}
