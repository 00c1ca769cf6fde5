use std::fmt::{Display, Formatter};

/// The tag's format
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TagType {
	/// Represents an ID3v1 tag
	Id3v1,
	/// This covers ID3v2.2, ID3v2.3 and ID3v2.4
	Id3v2,
	/// Represents an APEv2 tag
	Ape,
	/// Represents FLAC Vorbis comments and pictures
	Flac,
	/// Represents an MP4 ilst atom
	M4a,
}

impl Display for TagType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			TagType::Id3v1 => "ID3v1",
			TagType::Id3v2 => "ID3v2",
			TagType::Ape => "APE",
			TagType::Flac => "FLAC",
			TagType::M4a => "M4A",
		};

		f.write_str(name)
	}
}
