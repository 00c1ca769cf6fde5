use crate::error::Result;
use crate::macros::err;
use crate::util::alloc::read_exact_vec;
use crate::util::io::SeekStreamLen;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

pub(in crate::flac) const BLOCK_ID_VORBIS_COMMENTS: u8 = 4;
pub(in crate::flac) const BLOCK_ID_PICTURE: u8 = 6;

const LAST_BLOCK_FLAG: u8 = 0x80;
const BLOCK_TYPE_MASK: u8 = 0x7F;

/// A metadata block
///
/// The content is only read if requested, otherwise it is left empty and the block is skipped.
#[derive(Debug)]
pub(crate) struct Block {
	pub(super) ty: u8,
	pub(super) last: bool,
	pub(crate) content: Vec<u8>,
}

impl Block {
	/// Read a block header, and its content if `predicate` accepts the block type
	///
	/// A block claiming more data than left in the stream is a `SizeMismatch`.
	pub(crate) fn read<R, P>(data: &mut R, mut predicate: P) -> Result<Self>
	where
		R: Read + Seek,
		P: FnMut(u8) -> bool,
	{
		let byte = data.read_u8()?;
		let last = (byte & LAST_BLOCK_FLAG) != 0;
		let ty = byte & BLOCK_TYPE_MASK;

		let size = data.read_u24::<BigEndian>()?;
		log::trace!("Reading FLAC block, type: {ty}, size: {size}");

		if u64::from(size) > data.remaining_len()? {
			log::debug!("FLAC block (type: {ty}) extends past the end of the stream");
			err!(SizeMismatch);
		}

		let content = if predicate(ty) {
			read_exact_vec(data, u64::from(size))?
		} else {
			data.seek(SeekFrom::Current(i64::from(size)))?;
			Vec::new()
		};

		Ok(Self { ty, last, content })
	}
}
