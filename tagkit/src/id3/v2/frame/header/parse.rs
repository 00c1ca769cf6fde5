use super::FrameId;
use crate::error::Result;
use crate::id3::v2::FrameFlags;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::macros::id3v2_err;

use std::io::Read;

pub(crate) struct FrameHeader {
	pub(crate) id: FrameId,
	pub(crate) flags: FrameFlags,
	pub(crate) size: u32,
}

/// Read a frame header
///
/// Returns `None` if padding was encountered.
pub(crate) fn parse_header<R>(reader: &mut R, version: Id3v2Version) -> Result<Option<FrameHeader>>
where
	R: Read,
{
	let mut header = [0; 10];
	let header = &mut header[..version.frame_header_len() as usize];
	reader.read_exact(header)?;

	// Assume we just started reading padding
	if header[0] == 0 {
		return Ok(None);
	}

	let id_len = version.frame_id_len();
	let id_bytes = &header[..id_len];

	// ID3v2.2 IDs padded out to 4 characters
	if version != Id3v2Version::V2 && id_bytes[3] == b' ' {
		log::warn!("Found an ID3v2.2 frame ID in an ID3v2.{} tag", version.major());
		id3v2_err!(BadFrameId(id_bytes.to_vec()));
	}

	FrameId::verify_id(id_bytes)?;

	// Verified to be ASCII
	let id = FrameId::new(String::from_utf8_lossy(id_bytes).into_owned())?;

	let (size, flags) = match version {
		Id3v2Version::V2 => (
			u32::from_be_bytes([0, header[3], header[4], header[5]]),
			FrameFlags::default(),
		),
		Id3v2Version::V3 => (
			u32::from_be_bytes([header[4], header[5], header[6], header[7]]),
			FrameFlags::new(u16::from_be_bytes([header[8], header[9]])),
		),
		Id3v2Version::V4 => (
			u32::from_be_bytes([header[4], header[5], header[6], header[7]]).try_unsynch()?,
			FrameFlags::new(u16::from_be_bytes([header[8], header[9]])),
		),
	};

	if size == 0 || size == u32::MAX {
		id3v2_err!(BadFrameLength);
	}

	Ok(Some(FrameHeader { id, flags, size }))
}
