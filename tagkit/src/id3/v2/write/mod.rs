mod frame;

use super::header::{ID3V2_HEADER_SIZE, Id3v2Version};
use super::tag::Id3v2Tag;
use super::util::synchsafe::SynchsafeInteger;
use crate::error::Result;
use crate::macros::err;

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

impl Id3v2Tag {
	/// Encode the tag, including its header
	///
	/// The tag is written with no header flags, no extended header, and no padding.
	/// Frames whose IDs don't match the tag's version are skipped.
	///
	/// # Errors
	///
	/// * Any frame fails to encode, see [`Frame::as_bytes`](crate::id3::v2::Frame::as_bytes)
	/// * The tag is larger than 256 MB
	pub fn as_bytes(&self) -> Result<Vec<u8>> {
		let version = self.version();

		let mut frames = Vec::new();
		for (id, frame) in self.iter() {
			frame::write_frame(&mut frames, id, frame, version)?;
		}

		let Ok(size) = u32::try_from(frames.len()) else {
			err!(TooMuchData);
		};
		let size = size.synch()?;

		let mut bytes = Vec::with_capacity(ID3V2_HEADER_SIZE as usize + frames.len());
		bytes.write_all(b"ID3")?;
		bytes.write_u8(version.major())?;
		// Revision
		bytes.write_u8(0)?;
		// Flags
		bytes.write_u8(0)?;
		bytes.write_u32::<BigEndian>(size)?;
		bytes.write_all(&frames)?;

		Ok(bytes)
	}
}

pub(crate) fn frame_id_fits(id: &str, version: Id3v2Version) -> bool {
	id.len() == version.frame_id_len()
}
