//! Format-agnostic picture handling
//!
//! A [`Picture`] is shared by FLAC `PICTURE` blocks, ID3v2 `APIC`/`PIC` frames and M4A `covr` atoms.

use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::{err, parse_mode_choice};
use crate::util::alloc::read_exact_vec;
use crate::util::text::TextEncoding;

use std::fmt::{Debug, Display, Formatter};
use std::io::Read;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt as _};

/// MIME types for pictures.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::picture::MimeType;
	///
	/// let jpeg_mimetype_str = "image/jpeg";
	/// assert_eq!(MimeType::from_str(jpeg_mimetype_str), MimeType::Jpeg);
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_lowercase() {
			"image/jpeg" | "image/jpg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Get a &str from a `MimeType`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::picture::MimeType;
	///
	/// let jpeg_mimetype = MimeType::Jpeg;
	/// assert_eq!(jpeg_mimetype.as_str(), "image/jpeg")
	/// ```
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
			MimeType::Unknown(unknown) => unknown,
		}
	}

	/// Get a `MimeType` from an ID3v2.2 `PIC` image format
	///
	/// ID3v2.2 uses a 3 character format ("PNG", "JPG") rather than a MIME type.
	pub(crate) fn from_id3v22_format(format: [u8; 3]) -> Option<Self> {
		match format.to_ascii_uppercase().as_slice() {
			b"PNG" => Some(Self::Png),
			b"JPG" => Some(Self::Jpeg),
			b"GIF" => Some(Self::Gif),
			b"BMP" => Some(Self::Bmp),
			b"TIF" => Some(Self::Tiff),
			_ => None,
		}
	}

	/// The 3 character ID3v2.2 image format for this `MimeType`, if one exists
	pub(crate) fn as_id3v22_format(&self) -> Option<&'static [u8; 3]> {
		match self {
			Self::Png => Some(b"PNG"),
			Self::Jpeg => Some(b"JPG"),
			Self::Gif => Some(b"GIF"),
			Self::Bmp => Some(b"BMP"),
			Self::Tiff => Some(b"TIF"),
			Self::Unknown(_) => None,
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The picture type, according to ID3v2 APIC
///
/// This is shared by FLAC, which uses the same 21 types.
///
/// When searching for a picture, "any type" is expressed as `None` in an `Option<PictureType>`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum PictureType {
	Other = 0,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
}

// Indexed by the type's byte
const PICTURE_TYPES: [PictureType; 21] = [
	PictureType::Other,
	PictureType::Icon,
	PictureType::OtherIcon,
	PictureType::CoverFront,
	PictureType::CoverBack,
	PictureType::Leaflet,
	PictureType::Media,
	PictureType::LeadArtist,
	PictureType::Artist,
	PictureType::Conductor,
	PictureType::Band,
	PictureType::Composer,
	PictureType::Lyricist,
	PictureType::RecordingLocation,
	PictureType::DuringRecording,
	PictureType::DuringPerformance,
	PictureType::ScreenCapture,
	PictureType::BrightFish,
	PictureType::Illustration,
	PictureType::BandLogo,
	PictureType::PublisherLogo,
];

impl PictureType {
	/// The byte used for this type in ID3v2 and FLAC
	pub fn as_u8(self) -> u8 {
		self as u8
	}

	/// Get a `PictureType` from its ID3v2 and FLAC byte
	///
	/// Returns `None` for anything above 20.
	pub fn from_u8(byte: u8) -> Option<Self> {
		PICTURE_TYPES.get(usize::from(byte)).copied()
	}

	/// Whether this type satisfies a search `filter`
	///
	/// A `None` filter matches every type.
	pub fn matches(self, filter: Option<PictureType>) -> bool {
		filter.is_none_or(|filter| filter == self)
	}
}

/// A builder for [`Picture`]
///
/// Created with [`Picture::unchecked`].
#[derive(Debug)]
pub struct PictureBuilder {
	picture: Picture,
}

impl PictureBuilder {
	/// Set the [`PictureType`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::picture::{Picture, PictureType};
	///
	/// let picture = Picture::unchecked(Vec::new())
	/// 	.pic_type(PictureType::CoverBack)
	/// 	.build();
	/// assert_eq!(picture.pic_type(), PictureType::CoverBack);
	/// ```
	pub fn pic_type(mut self, pic_type: PictureType) -> Self {
		self.picture.pic_type = pic_type;
		self
	}

	/// Set the [`MimeType`]
	pub fn mime_type(mut self, mime_type: MimeType) -> Self {
		self.picture.mime_type = Some(mime_type);
		self
	}

	/// Set the description
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::picture::Picture;
	///
	/// let picture = Picture::unchecked(Vec::new())
	/// 	.description("The band on stage")
	/// 	.build();
	/// assert_eq!(picture.description(), Some("The band on stage"));
	/// ```
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.picture.description = Some(description.into());
		self
	}

	/// Set the text encoding of the description
	///
	/// This is only used by ID3v2.
	pub fn description_encoding(mut self, encoding: TextEncoding) -> Self {
		self.picture.description_encoding = encoding;
		self
	}

	/// Set the dimensions, color depth, and number of indexed colors
	pub fn dimensions(mut self, width: u32, height: u32, color_depth: u32, num_colors: u32) -> Self {
		self.picture.width = width;
		self.picture.height = height;
		self.picture.color_depth = color_depth;
		self.picture.num_colors = num_colors;
		self
	}

	/// Finish the [`Picture`]
	pub fn build(self) -> Picture {
		self.picture
	}
}

/// Represents a picture.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Picture {
	pub(crate) pic_type: PictureType,
	pub(crate) mime_type: Option<MimeType>,
	pub(crate) description: Option<String>,
	pub(crate) description_encoding: TextEncoding,
	pub(crate) width: u32,
	pub(crate) height: u32,
	pub(crate) color_depth: u32,
	pub(crate) num_colors: u32,
	pub(crate) data: Vec<u8>,
}

impl Debug for Picture {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Picture")
			.field("pic_type", &self.pic_type)
			.field("mime_type", &self.mime_type)
			.field("description", &self.description)
			.field("width", &self.width)
			.field("height", &self.height)
			.field("data", &format!("<{} bytes>", self.data.len()))
			.finish()
	}
}

impl Picture {
	/// The smallest possible FLAC picture block, with every string and the data empty
	const FLAC_MIN_SIZE: usize = 32;

	/// Create a [`Picture`] from a reader
	///
	/// NOTES:
	///
	/// * This is for reading picture data only, from a [`File`](std::fs::File) for example.
	/// * `pic_type` will always be [`PictureType::Other`], be sure to change it accordingly if
	///   writing.
	///
	/// # Errors
	///
	/// * `reader` contains less than 8 bytes
	/// * `reader` does not contain a supported format. See [`MimeType`] for valid formats
	pub fn from_reader<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		let Some(mime_type) = Self::mimetype_from_bin(&data) else {
			err!(NotAPicture);
		};

		Ok(Self::unchecked(data).mime_type(mime_type).build())
	}

	/// Create a new `Picture` with no verification
	///
	/// This will **not** verify `data`'s signature.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::picture::{MimeType, Picture, PictureType};
	///
	/// let picture = Picture::unchecked(vec![0xFF, 0xD8, 0xFF, 0xE0])
	/// 	.pic_type(PictureType::Band)
	/// 	.mime_type(MimeType::Jpeg)
	/// 	.description("The band on stage")
	/// 	.build();
	///
	/// assert_eq!(picture.pic_type(), PictureType::Band);
	/// ```
	pub fn unchecked(data: Vec<u8>) -> PictureBuilder {
		PictureBuilder {
			picture: Self {
				pic_type: PictureType::Other,
				mime_type: None,
				description: None,
				description_encoding: TextEncoding::Latin1,
				width: 0,
				height: 0,
				color_depth: 0,
				num_colors: 0,
				data,
			},
		}
	}

	/// Returns the [`PictureType`]
	pub fn pic_type(&self) -> PictureType {
		self.pic_type
	}

	/// Sets the [`PictureType`]
	pub fn set_pic_type(&mut self, pic_type: PictureType) {
		self.pic_type = pic_type
	}

	/// Returns the [`MimeType`]
	pub fn mime_type(&self) -> Option<&MimeType> {
		self.mime_type.as_ref()
	}

	// Used commonly internally
	pub(crate) fn mime_str(&self) -> &str {
		match self.mime_type.as_ref() {
			Some(mime_type) => mime_type.as_str(),
			None => "",
		}
	}

	/// Returns the description
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Sets the description
	pub fn set_description(&mut self, description: Option<String>) {
		self.description = description;
	}

	/// Returns the text encoding of the description
	pub fn description_encoding(&self) -> TextEncoding {
		self.description_encoding
	}

	/// The width in pixels, or 0 if unknown
	pub fn width(&self) -> u32 {
		self.width
	}

	/// The height in pixels, or 0 if unknown
	pub fn height(&self) -> u32 {
		self.height
	}

	/// The color depth in bits per pixel, or 0 if unknown
	pub fn color_depth(&self) -> u32 {
		self.color_depth
	}

	/// The number of colors used for indexed images, or 0 for non-indexed images
	pub fn num_colors(&self) -> u32 {
		self.num_colors
	}

	/// Returns the [`Picture`] data as borrowed bytes.
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consumes a [`Picture`], returning the data as [`Vec`] without clones or allocation.
	pub fn into_data(self) -> Vec<u8> {
		self.data
	}

	/// Convert a [`Picture`] to a FLAC `PICTURE` block body
	///
	/// NOTE: This does not include the METADATA_BLOCK_HEADER
	///
	/// # Errors
	///
	/// * Any of the MIME type, description or data are longer than [`u32::MAX`]
	pub fn as_flac_bytes(&self) -> Result<Vec<u8>> {
		fn len_u32(len: usize) -> Result<[u8; 4]> {
			match u32::try_from(len) {
				Ok(len) => Ok(len.to_be_bytes()),
				Err(_) => err!(TooMuchData),
			}
		}

		let mut data = Vec::<u8>::new();

		data.extend(u32::from(self.pic_type.as_u8()).to_be_bytes());

		let mime_str = self.mime_str();
		data.extend(len_u32(mime_str.len())?);
		data.extend(mime_str.as_bytes());

		let desc = self.description.as_deref().unwrap_or_default();
		data.extend(len_u32(desc.len())?);
		data.extend(desc.as_bytes());

		data.extend(self.width.to_be_bytes());
		data.extend(self.height.to_be_bytes());
		data.extend(self.color_depth.to_be_bytes());
		data.extend(self.num_colors.to_be_bytes());

		data.extend(len_u32(self.data.len())?);
		data.extend(self.data.iter());

		Ok(data)
	}

	/// Get a [`Picture`] from a FLAC `PICTURE` block body
	///
	/// Every length field is checked against the remaining bytes before it is used.
	///
	/// # Errors
	///
	/// * The picture type is outside of `0..=20` ([`NotAPicture`](crate::error::ErrorKind::NotAPicture))
	/// * Any length points past the end of `content` ([`SizeMismatch`](crate::error::ErrorKind::SizeMismatch))
	/// * The MIME type or description aren't valid UTF-8, with [`ParsingMode::Strict`]
	pub fn from_flac_bytes(content: &[u8], parse_mode: ParsingMode) -> Result<Self> {
		if content.len() < Self::FLAC_MIN_SIZE {
			err!(NotAPicture);
		}

		let reader = &mut &content[..];

		let pic_ty = reader.read_u32::<BigEndian>()?;
		let Some(pic_type) = u8::try_from(pic_ty).ok().and_then(PictureType::from_u8) else {
			log::debug!("FLAC picture has an invalid type: {pic_ty}");
			err!(NotAPicture);
		};

		let mime_type_bytes = read_flac_field(reader)?;
		let mime_type_str = flac_text(mime_type_bytes, parse_mode)?;

		let description_bytes = read_flac_field(reader)?;
		let description = flac_text(description_bytes, parse_mode)?;

		// Width, height, color depth, number of colors, data length
		if reader.len() < 20 {
			err!(SizeMismatch);
		}

		let width = reader.read_u32::<BigEndian>()?;
		let height = reader.read_u32::<BigEndian>()?;
		let color_depth = reader.read_u32::<BigEndian>()?;
		let num_colors = reader.read_u32::<BigEndian>()?;

		let data = read_flac_field(reader)?;
		if !reader.is_empty() {
			log::warn!("FLAC picture has {} trailing bytes", reader.len());
		}

		Ok(Self {
			pic_type,
			mime_type: (!mime_type_str.is_empty()).then(|| MimeType::from_str(&mime_type_str)),
			description: (!description.is_empty()).then_some(description),
			description_encoding: TextEncoding::UTF8,
			width,
			height,
			color_depth,
			num_colors,
			data: data.to_vec(),
		})
	}

	/// Read a picture's data, sniffing its [`MimeType`] from the signature
	pub(crate) fn read_data<R>(reader: &mut R, len: u64) -> Result<(Vec<u8>, Option<MimeType>)>
	where
		R: Read,
	{
		let data = read_exact_vec(reader, len)?;
		let mime_type = Self::mimetype_from_bin(&data);
		Ok((data, mime_type))
	}

	pub(crate) fn mimetype_from_bin(bytes: &[u8]) -> Option<MimeType> {
		match bytes {
			[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(MimeType::Png),
			[0xFF, 0xD8, ..] => Some(MimeType::Jpeg),
			[b'G', b'I', b'F', 0x38, 0x37 | 0x39, b'a', ..] => Some(MimeType::Gif),
			[b'B', b'M', ..] => Some(MimeType::Bmp),
			[b'I', b'I', b'*', 0x00, ..] | [b'M', b'M', 0x00, b'*', ..] => Some(MimeType::Tiff),
			_ => None,
		}
	}
}

// [u32 BE length][bytes], with the length checked against what's left
fn read_flac_field<'a>(reader: &mut &'a [u8]) -> Result<&'a [u8]> {
	let content: &'a [u8] = *reader;
	let Some((len, content)) = content.split_first_chunk::<4>() else {
		err!(SizeMismatch);
	};

	let len = BigEndian::read_u32(len) as usize;
	if len > content.len() {
		log::debug!(
			"FLAC picture field claims {len} bytes, only {} remain",
			content.len()
		);
		err!(SizeMismatch);
	}

	let (field, rest) = content.split_at(len);
	*reader = rest;
	Ok(field)
}

fn flac_text(bytes: &[u8], parse_mode: ParsingMode) -> Result<String> {
	match std::str::from_utf8(bytes) {
		Ok(text) => Ok(text.to_owned()),
		Err(e) => {
			parse_mode_choice!(
				parse_mode,
				STRICT: return Err(e.into()),
				DEFAULT: {
					log::warn!("FLAC picture contains invalid UTF-8, decoding lossily");
					Ok(String::from_utf8_lossy(bytes).into_owned())
				}
			)
		},
	}
}
