use super::M4aTag;
use super::atom::Atom;
use super::constants::{COVER_ART, DATA_TYPE_BMP, DATA_TYPE_JPEG, DATA_TYPE_PNG, FREEFORM};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::macros::{err, parse_mode_choice};
use crate::mp4::atom_info::{ATOM_HEADER_LEN, AtomInfo, find_atom};
use crate::picture::{MimeType, Picture, PictureType};
use crate::util::alloc::read_exact_vec;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

const FREE: [u8; 4] = *b"free";
const DATA: [u8; 4] = *b"data";
const MEAN: [u8; 4] = *b"mean";
const NAME: [u8; 4] = *b"name";

// Version (1) + flags (3)
const VERSION_FLAGS_LEN: u64 = 4;
// Type indicator (4) + locale (4)
const DATA_HEADER_LEN: u64 = 8;

/// Parse the children of an `ilst` atom, with the reader at the start of its content
pub(in crate::mp4) fn parse_ilst<R>(
	reader: &mut R,
	ilst: AtomInfo,
	parse_options: ParseOptions,
) -> Result<M4aTag>
where
	R: Read + Seek,
{
	let mut tag = M4aTag::default();
	let mut remaining = ilst.content_len();

	while remaining > ATOM_HEADER_LEN {
		let item = AtomInfo::read(reader, remaining)?;
		remaining -= item.len;

		match item.ident {
			FREE => log::trace!("Skipping padding in \"ilst\""),
			COVER_ART if !parse_options.read_cover_art => {
				log::debug!("Skipping \"covr\" atom");
			},
			_ => {
				if let Err(e) = parse_item(reader, &mut tag, item, parse_options.parsing_mode) {
					if parse_options.parsing_mode == ParsingMode::Strict || e.is_io() {
						return Err(e);
					}

					log::warn!("Unable to read atom \"{}\", discarding: {e}", item.ident_str());
				}
			},
		}

		reader.seek(SeekFrom::Start(item.end()))?;
	}

	Ok(tag)
}

fn parse_item<R>(
	reader: &mut R,
	tag: &mut M4aTag,
	item: AtomInfo,
	parse_mode: ParsingMode,
) -> Result<()>
where
	R: Read + Seek,
{
	let content_start = item.start + item.header_size();

	let long_name = if item.ident == FREEFORM {
		let Some(long_name) = freeform_name(reader, item, parse_mode)? else {
			log::warn!("Found freeform identifier \"----\" with no \"mean\" atom, discarding");
			return Ok(());
		};

		reader.seek(SeekFrom::Start(content_start))?;
		Some(long_name)
	} else {
		None
	};

	let mut found_data = false;
	let mut budget = item.content_len();

	// An item can hold multiple values, each in its own `data` atom
	while let Some(data_atom) = find_atom(reader, DATA, budget)? {
		found_data = true;
		budget = item.end() - data_atom.end();

		if data_atom.content_len() < DATA_HEADER_LEN {
			parse_mode_choice!(
				parse_mode,
				STRICT: err!(BadAtom("Found a \"data\" atom with no type indicator")),
				DEFAULT: {
					log::warn!("Found a \"data\" atom with no type indicator, discarding");
					reader.seek(SeekFrom::Start(data_atom.end()))?;
					continue;
				}
			);
		}

		// Version, which is always 0
		let _version = reader.read_u8()?;
		let type_indicator = reader.read_u24::<BigEndian>()?;
		// Locale, never used by iTunes
		reader.seek(SeekFrom::Current(4))?;

		let len = data_atom.content_len() - DATA_HEADER_LEN;

		if item.ident == COVER_ART {
			let (data, mime_type) = Picture::read_data(reader, len)?;

			let mut picture = Picture::unchecked(data)
				.pic_type(PictureType::CoverFront)
				.build();
			picture.mime_type = mime_type.or_else(|| mime_from_data_type(type_indicator));

			tag.pictures.push(picture);
		} else {
			let data = read_exact_vec(reader, len)?;
			tag.atoms.insert(
				item.ident,
				Atom {
					long_name: long_name.clone(),
					data,
				},
			);
		}

		reader.seek(SeekFrom::Start(data_atom.end()))?;
	}

	if !found_data {
		log::debug!("Atom \"{}\" has no \"data\" atom, discarding", item.ident_str());
	}

	Ok(())
}

// `mean` + "." + `name`, `name` being optional
fn freeform_name<R>(reader: &mut R, item: AtomInfo, parse_mode: ParsingMode) -> Result<Option<String>>
where
	R: Read + Seek,
{
	let Some(mean) = freeform_chunk(reader, item, MEAN, parse_mode)? else {
		return Ok(None);
	};

	let Some(name) = freeform_chunk(reader, item, NAME, parse_mode)? else {
		log::debug!("Freeform identifier \"{mean}\" has no \"name\" atom");
		return Ok(Some(mean));
	};

	Ok(Some(format!("{mean}.{name}")))
}

fn freeform_chunk<R>(
	reader: &mut R,
	item: AtomInfo,
	ident: [u8; 4],
	parse_mode: ParsingMode,
) -> Result<Option<String>>
where
	R: Read + Seek,
{
	reader.seek(SeekFrom::Start(item.start + item.header_size()))?;

	let Some(chunk) = find_atom(reader, ident, item.content_len())? else {
		return Ok(None);
	};

	if chunk.content_len() < VERSION_FLAGS_LEN {
		err!(BadAtom("Found an incomplete freeform identifier chunk"));
	}

	reader.seek(SeekFrom::Current(4))?;

	let content = read_exact_vec(reader, chunk.content_len() - VERSION_FLAGS_LEN)?;
	match String::from_utf8(content) {
		Ok(text) => Ok(Some(text)),
		Err(e) => {
			parse_mode_choice!(
				parse_mode,
				STRICT: err!(BadAtom("Found a non UTF-8 string while reading freeform identifier")),
				DEFAULT: log::warn!("Freeform identifier is not valid UTF-8, decoding lossily")
			);

			Ok(Some(String::from_utf8_lossy(e.as_bytes()).into_owned()))
		},
	}
}

fn mime_from_data_type(type_indicator: u32) -> Option<MimeType> {
	match type_indicator {
		DATA_TYPE_JPEG => Some(MimeType::Jpeg),
		DATA_TYPE_PNG => Some(MimeType::Png),
		DATA_TYPE_BMP => Some(MimeType::Bmp),
		_ => None,
	}
}
