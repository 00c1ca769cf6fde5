use super::atom_info::{AtomInfo, find_atom};
use super::ilst::M4aTag;
use super::ilst::read::parse_ilst;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::err;
use crate::util::io::SeekStreamLen;

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

const FTYP: [u8; 4] = *b"ftyp";
const MOOV: [u8; 4] = *b"moov";
const UDTA: [u8; 4] = *b"udta";
const META: [u8; 4] = *b"meta";
const ILST: [u8; 4] = *b"ilst";

const M4A_MAJOR_BRAND: &[u8; 4] = b"M4A ";

/// Verify the leading `ftyp` atom, leaving the reader directly after it
fn verify_m4a<R>(reader: &mut R, file_len: u64) -> Result<AtomInfo>
where
	R: Read + Seek,
{
	let ftyp = AtomInfo::read(reader, file_len)?;
	if ftyp.ident != FTYP {
		err!(BadAtom("File doesn't start with an \"ftyp\" atom"));
	}

	// size + identifier + major brand
	if ftyp.len < 12 {
		err!(BadAtom("\"ftyp\" atom too short"));
	}

	let mut major_brand = [0; 4];
	reader.read_exact(&mut major_brand)?;

	if &major_brand != M4A_MAJOR_BRAND {
		log::debug!(
			"Unsupported major brand: {:?}",
			String::from_utf8_lossy(&major_brand)
		);
		err!(BadAtom("\"ftyp\" major brand is not \"M4A \""));
	}

	reader.seek(SeekFrom::Start(ftyp.end()))?;

	log::debug!("Verified to be an M4A file");
	Ok(ftyp)
}

fn find_container<R>(reader: &mut R, ident: [u8; 4], budget: u64) -> Result<AtomInfo>
where
	R: Read + Seek,
{
	let Some(atom) = find_atom(reader, ident, budget)? else {
		log::debug!(
			"Unable to find \"{}\" atom",
			String::from_utf8_lossy(&ident)
		);
		err!(NotFound);
	};

	Ok(atom)
}

pub(super) fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<M4aTag>
where
	R: Read + Seek,
{
	let file_len = reader.stream_len_hack()?;

	let ftyp = verify_m4a(reader, file_len)?;

	// moov.udta.meta.ilst
	let moov = find_container(reader, MOOV, file_len - ftyp.end())?;
	let udta = find_container(reader, UDTA, moov.content_len())?;
	let meta = find_container(reader, META, udta.content_len())?;

	// `meta` is a full atom, with version and flags before its children
	if meta.content_len() < 4 {
		err!(BadAtom("\"meta\" atom too short"));
	}

	reader.seek(SeekFrom::Current(4))?;

	let ilst = find_container(reader, ILST, meta.content_len() - 4)?;
	log::debug!("Found \"ilst\" atom ({} bytes)", ilst.len);

	parse_ilst(reader, ilst, parse_options)
}

impl M4aTag {
	/// Read the `ilst` atom from an M4A stream
	///
	/// The reader is rewound first.
	///
	/// # Errors
	///
	/// * [`ErrorKind::BadAtom`](crate::error::ErrorKind::BadAtom): The stream doesn't start with
	///   an `ftyp` atom with an `"M4A "` major brand, or an atom is malformed
	/// * [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound): One of `moov`, `udta`, `meta` or `ilst`
	///   is missing
	/// * [`ErrorKind::SizeMismatch`](crate::error::ErrorKind::SizeMismatch): An atom is larger than its
	///   container
	/// * [`std::io::Error`]
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use tagkit::config::ParseOptions;
	/// use tagkit::mp4::M4aTag;
	/// use std::fs::File;
	///
	/// # fn main() -> tagkit::error::Result<()> {
	/// let mut file = File::open("test.m4a")?;
	/// let m4a_tag = M4aTag::read_from(&mut file, ParseOptions::new())?;
	/// # Ok(()) }
	/// ```
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		reader.seek(SeekFrom::Start(0))?;
		read_from(reader, parse_options)
	}

	/// Read the `ilst` atom from an M4A file
	///
	/// # Errors
	///
	/// See [`M4aTag::read_from`]
	pub fn read_from_path<P>(path: P, parse_options: ParseOptions) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let mut file = File::open(path)?;
		Self::read_from(&mut file, parse_options)
	}
}
