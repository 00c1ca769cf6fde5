use super::{Frame, FrameFlags};
use crate::error::Result;
use crate::id3::v2::FrameId;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::items::{
	AttachedPictureFrame, BinaryFrame, CommentFrame, ExtendedTextFrame, ExtendedUrlFrame,
	TextInformationFrame, UrlLinkFrame,
};
use crate::macros::id3v2_err;
use crate::util::text::TextEncoding;

enum FrameKind {
	Text,
	UserText,
	Url,
	UserUrl,
	Comment,
	Picture,
	Generic,
}

impl FrameKind {
	fn from_id(id: &FrameId) -> Self {
		match id.as_str() {
			"TXXX" | "TXX" => Self::UserText,
			"WXXX" | "WXX" => Self::UserUrl,
			"APIC" | "PIC" => Self::Picture,
			"COMM" | "COM" => Self::Comment,
			i if i.starts_with('T') => Self::Text,
			i if i.starts_with('W') => Self::Url,
			_ => Self::Generic,
		}
	}
}

/// Decode the content of a frame with the given ID
pub(super) fn parse_content(
	id: &FrameId,
	flags: FrameFlags,
	content: Vec<u8>,
	version: Id3v2Version,
) -> Result<Frame> {
	log::trace!("Parsing frame content for ID: {}", id);

	let kind = FrameKind::from_id(id);

	// Nothing we can do with these, they are written back as-is
	if matches!(kind, FrameKind::Generic) || flags.compressed(version) || flags.encrypted(version) {
		return Ok(Frame::Generic(BinaryFrame {
			flags,
			data: content,
		}));
	}

	let extra_len = flags.extra_header_len(version) as usize;
	let Some(content) = content.get(extra_len..) else {
		id3v2_err!(BadFrameLength);
	};
	let flags = flags.without_extra_fields(version);

	Ok(match kind {
		FrameKind::Text => Frame::Text(TextInformationFrame::parse(content, flags)?),
		FrameKind::UserText => Frame::UserText(ExtendedTextFrame::parse(content, flags)?),
		FrameKind::Url => Frame::Url(UrlLinkFrame::parse(content, flags)),
		FrameKind::UserUrl => Frame::UserUrl(ExtendedUrlFrame::parse(content, flags)?),
		FrameKind::Comment => Frame::Comment(CommentFrame::parse(content, flags)?),
		FrameKind::Picture => {
			Frame::Picture(AttachedPictureFrame::parse(content, flags, version)?)
		},
		FrameKind::Generic => Frame::Generic(BinaryFrame {
			flags,
			data: content.to_vec(),
		}),
	})
}

/// Split the leading encoding byte off of a frame
pub(crate) fn split_encoding(content: &[u8]) -> Result<(TextEncoding, &[u8])> {
	let Some((&encoding, rest)) = content.split_first() else {
		id3v2_err!(BadFrameLength);
	};

	match TextEncoding::from_u8(encoding) {
		Some(encoding) => Ok((encoding, rest)),
		None => id3v2_err!(BadEncoding(encoding)),
	}
}
