use super::util::synchsafe::SynchsafeInteger;
use crate::error::Result;
use crate::macros::{err, id3v2_err};

use std::io::Read;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	#[default]
	V4,
}

impl Id3v2Version {
	/// The major version number, as stored in the header
	pub fn major(self) -> u8 {
		match self {
			Self::V2 => 2,
			Self::V3 => 3,
			Self::V4 => 4,
		}
	}

	/// The header flag bits that are defined for this version
	///
	/// ID3v2.2 only defines unsynchronisation, its compression bit was never given a scheme.
	pub(crate) fn flags_mask(self) -> u8 {
		match self {
			Self::V2 => 0x80,
			Self::V3 => 0xE0,
			Self::V4 => 0xF0,
		}
	}

	/// The size of a frame header
	pub(crate) fn frame_header_len(self) -> u32 {
		match self {
			Self::V2 => 6,
			Self::V3 | Self::V4 => 10,
		}
	}

	/// The length of a frame ID
	pub(crate) fn frame_id_len(self) -> usize {
		match self {
			Self::V2 => 3,
			Self::V3 | Self::V4 => 4,
		}
	}
}

pub(crate) const ID3V2_HEADER_SIZE: u32 = 10;

const FLAG_UNSYNCHRONISATION: u8 = 0x80;
const FLAG_EXTENDED_HEADER: u8 = 0x40;

#[derive(Copy, Clone, Debug)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2Version,
	pub flags: u8,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER**)
	pub size: u32,
	/// The number of bytes taken by the extended header, if any
	pub extended_size: u32,
}

impl Id3v2Header {
	/// Parse the header, skipping over the extended header if present
	///
	/// On success, the reader is positioned at the first frame.
	pub(crate) fn parse<R>(bytes: &mut R) -> Result<Self>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; ID3V2_HEADER_SIZE as usize];
		bytes.read_exact(&mut header)?;

		if &header[..3] != b"ID3" {
			err!(NotFound);
		}

		// Version is stored as [major, revision], the revision is only kept for errors.
		let version = match header[3] {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			major => id3v2_err!(BadId3v2Version(major, header[4])),
		};

		let flags = header[5];
		if flags & !version.flags_mask() != 0 {
			id3v2_err!(BadFlags(flags));
		}

		if flags & FLAG_UNSYNCHRONISATION != 0 {
			log::warn!("Tag is unsynchronised, frames will be read as-is");
		}

		let size = BigEndian::read_u32(&header[6..]).try_unsynch()?;

		// Only reachable in ID3v2.3 and ID3v2.4, the bit is masked out for ID3v2.2
		let mut extended_size = 0;
		if flags & FLAG_EXTENDED_HEADER != 0 {
			extended_size = skip_extended_header(bytes, version)?;

			if extended_size > size {
				id3v2_err!(BadExtendedHeaderSize);
			}
		}

		Ok(Id3v2Header {
			version,
			flags,
			size,
			extended_size,
		})
	}

	/// The number of bytes remaining for frames and padding
	pub(crate) fn frames_size(&self) -> u32 {
		self.size - self.extended_size
	}

	/// The total size of the tag, including the header
	pub(crate) fn full_tag_size(&self) -> u64 {
		u64::from(self.size) + u64::from(ID3V2_HEADER_SIZE)
	}
}

// Returns the total number of bytes taken by the extended header, including its size field
fn skip_extended_header<R>(bytes: &mut R, version: Id3v2Version) -> Result<u32>
where
	R: Read,
{
	let raw_size = bytes.read_u32::<BigEndian>()?;

	// ID3v2.3 doesn't include the size field itself, ID3v2.4 does (and is synchsafe)
	let (total, remaining) = match version {
		Id3v2Version::V4 => {
			let size = raw_size.try_unsynch()?;
			let Some(remaining) = size.checked_sub(4) else {
				id3v2_err!(BadExtendedHeaderSize);
			};

			(size, remaining)
		},
		_ => {
			let Some(total) = raw_size.checked_add(4) else {
				id3v2_err!(BadExtendedHeaderSize);
			};

			(total, raw_size)
		},
	};

	log::trace!("Skipping extended header of {total} bytes");

	let skipped = std::io::copy(
		&mut bytes.take(u64::from(remaining)),
		&mut std::io::sink(),
	)?;
	if skipped != u64::from(remaining) {
		id3v2_err!(BadExtendedHeaderSize);
	}

	Ok(total)
}
