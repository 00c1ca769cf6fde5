use crate::error::Result;
use crate::macros::err;
use crate::util::io::SeekStreamLen;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

pub(super) const FOURCC_LEN: u64 = 4;
pub(super) const SIZE_LEN: u64 = 4;
pub(super) const ATOM_HEADER_LEN: u64 = SIZE_LEN + FOURCC_LEN;
// The 64-bit size following an atom with a size of 1
const EXTENDED_SIZE_LEN: u64 = 8;

/// The header of an atom
///
/// `len` is the *full* atom length, including the header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct AtomInfo {
	pub(crate) start: u64,
	pub(crate) len: u64,
	pub(crate) extended: bool,
	pub(crate) ident: [u8; 4],
}

impl AtomInfo {
	/// Read an atom header, leaving the reader at the start of the atom's content
	///
	/// `budget` is the number of bytes left in the parent container, starting at this atom. An
	/// atom with a size of `0` extends to the end of the container.
	pub(crate) fn read<R>(data: &mut R, budget: u64) -> Result<Self>
	where
		R: Read + Seek,
	{
		let start = data.stream_position()?;

		let len_raw = u64::from(data.read_u32::<BigEndian>()?);

		let mut ident = [0; FOURCC_LEN as usize];
		data.read_exact(&mut ident)?;

		let (len, extended) = match len_raw {
			// The atom extends to the end of its container
			0 => (budget, false),
			// There's an extended length
			1 => (data.read_u64::<BigEndian>()?, true),
			_ => (len_raw, false),
		};

		let info = Self {
			start,
			len,
			extended,
			ident,
		};

		if len < info.header_size() {
			err!(BadAtom("Found an atom smaller than its header"));
		}

		if len > budget {
			log::debug!(
				"Atom \"{}\" claims {len} bytes, only {budget} available",
				info.ident_str()
			);
			err!(SizeMismatch);
		}

		Ok(info)
	}

	pub(crate) fn header_size(&self) -> u64 {
		if self.extended {
			return ATOM_HEADER_LEN + EXTENDED_SIZE_LEN;
		}

		ATOM_HEADER_LEN
	}

	/// The length of the atom's content, excluding the header
	pub(crate) fn content_len(&self) -> u64 {
		self.len - self.header_size()
	}

	/// The stream position directly after the atom
	pub(crate) fn end(&self) -> u64 {
		self.start + self.len
	}

	pub(crate) fn ident_str(&self) -> String {
		self.ident.iter().copied().map(char::from).collect()
	}
}

/// Scan the sibling atoms within `budget` bytes for `ident`
///
/// On a match, the reader is left at the start of the atom's content. Otherwise, `None` is
/// returned once the budget is exhausted.
pub(crate) fn find_atom<R>(reader: &mut R, ident: [u8; 4], mut budget: u64) -> Result<Option<AtomInfo>>
where
	R: Read + Seek,
{
	// The budget can't be larger than what the stream holds
	budget = budget.min(reader.remaining_len()?);

	while budget >= ATOM_HEADER_LEN {
		let atom = AtomInfo::read(reader, budget)?;
		if atom.ident == ident {
			return Ok(Some(atom));
		}

		log::trace!("Skipping atom \"{}\" ({} bytes)", atom.ident_str(), atom.len);

		reader.seek(SeekFrom::Start(atom.end()))?;
		budget -= atom.len;
	}

	if budget > 0 {
		log::debug!("Found {budget} trailing bytes while searching for an atom");
	}

	Ok(None)
}

#[cfg(test)]
mod tests {
	use super::{AtomInfo, find_atom};
	use crate::error::ErrorKind;

	use std::io::{Cursor, Seek};

	fn atom(ident: &[u8; 4], content: &[u8]) -> Vec<u8> {
		let mut atom = (content.len() as u32 + 8).to_be_bytes().to_vec();
		atom.extend(ident);
		atom.extend(content);
		atom
	}

	#[test_log::test]
	fn find_sibling() {
		let mut data = atom(b"free", &[0; 4]);
		data.extend(atom(b"moov", b"content"));
		let len = data.len() as u64;

		let mut reader = Cursor::new(data);
		let moov = find_atom(&mut reader, *b"moov", len).unwrap().unwrap();
		assert_eq!(moov.start, 12);
		assert_eq!(moov.content_len(), 7);
		assert_eq!(reader.stream_position().unwrap(), 20);

		reader.set_position(0);
		assert!(find_atom(&mut reader, *b"udta", len).unwrap().is_none());
	}

	#[test_log::test]
	fn extended_and_open_ended_sizes() {
		let mut data = 1_u32.to_be_bytes().to_vec();
		data.extend(b"mdat");
		data.extend(20_u64.to_be_bytes());
		data.extend([0; 4]);
		// A size of 0 extends to the end
		data.extend(0_u32.to_be_bytes());
		data.extend(b"free");
		data.extend([0; 10]);
		let len = data.len() as u64;

		let mut reader = Cursor::new(data);
		let free = find_atom(&mut reader, *b"free", len).unwrap().unwrap();
		assert_eq!(free.start, 20);
		assert_eq!(free.len, 18);

		reader.set_position(0);
		let mdat = AtomInfo::read(&mut reader, len).unwrap();
		assert!(mdat.extended);
		assert_eq!(mdat.header_size(), 16);
		assert_eq!(mdat.content_len(), 4);
	}

	#[test_log::test]
	fn bad_sizes() {
		let mut reader = Cursor::new(atom(b"moov", &[0; 8]));
		let err = AtomInfo::read(&mut reader, 10).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::SizeMismatch));

		let mut data = atom(b"moov", &[]);
		data[3] = 4;
		let err = AtomInfo::read(&mut Cursor::new(data), 8).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::BadAtom(_)));
	}
}
