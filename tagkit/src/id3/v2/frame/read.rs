use super::Frame;
use super::content::parse_content;
use super::header::parse::parse_header;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::id3::v2::FrameId;
use crate::id3::v2::header::Id3v2Version;
use crate::macros::id3v2_err;
use crate::util::alloc::read_exact_vec;

use std::io::Read;

pub(crate) enum ParsedFrame {
	Next(FrameId, Frame),
	Skip,
	Eof,
}

impl ParsedFrame {
	/// Read a single frame, within the `remaining` tag budget
	///
	/// `remaining` is reduced by the size of the frame and its header.
	pub(crate) fn read<R>(
		reader: &mut R,
		version: Id3v2Version,
		remaining: &mut u32,
		parse_options: ParseOptions,
	) -> Result<Self>
	where
		R: Read,
	{
		let header_len = version.frame_header_len();
		if *remaining < header_len {
			log::trace!("Not enough room for another frame header, stopping");
			return Ok(Self::Eof);
		}

		let Some(header) = parse_header(reader, version)? else {
			// Stop reading
			return Ok(Self::Eof);
		};

		*remaining -= header_len;
		let Some(new_remaining) = remaining.checked_sub(header.size) else {
			log::debug!(
				"Frame \"{}\" claims a size of {}, only {} bytes remain",
				header.id,
				header.size,
				remaining
			);
			id3v2_err!(BadFrameLength);
		};
		*remaining = new_remaining;

		let content = read_exact_vec(reader, u64::from(header.size))?;

		if !parse_options.read_cover_art && matches!(header.id.as_str(), "APIC" | "PIC") {
			log::trace!("Skipping picture frame");
			return Ok(Self::Skip);
		}

		match parse_content(&header.id, header.flags, content, version) {
			Ok(frame) => Ok(Self::Next(header.id, frame)),
			Err(err) => match parse_options.parsing_mode {
				ParsingMode::Strict => Err(err),
				ParsingMode::BestAttempt | ParsingMode::Relaxed => {
					log::warn!("Failed to parse frame \"{}\", skipping: {}", header.id, err);
					Ok(Self::Skip)
				},
			},
		}
	}
}
