use std::io::Write;

use tempfile::NamedTempFile;

/// Write `content` to a temporary file ending in `suffix`
pub fn temp_file(suffix: &str, content: &[u8]) -> NamedTempFile {
	let mut file = tempfile::Builder::new()
		.suffix(suffix)
		.tempfile()
		.unwrap();

	file.write_all(content).unwrap();
	file.flush().unwrap();

	file
}

fn synch(n: u32) -> [u8; 4] {
	assert!(n < 1 << 28);
	[
		(n >> 21) as u8 & 0x7F,
		(n >> 14) as u8 & 0x7F,
		(n >> 7) as u8 & 0x7F,
		n as u8 & 0x7F,
	]
}

/// A 128 byte ID3v1.1 tag
pub fn id3v1(title: &str, artist: &str, track: u8) -> Vec<u8> {
	let mut tag = vec![0; 128];
	tag[..3].copy_from_slice(b"TAG");
	tag[3..3 + title.len()].copy_from_slice(title.as_bytes());
	tag[33..33 + artist.len()].copy_from_slice(artist.as_bytes());
	tag[126] = track;
	tag[127] = 255;
	tag
}

/// An ID3v2 tag with the given `(id, content)` frames
pub fn id3v2(version: u8, frames: &[(&str, &[u8])]) -> Vec<u8> {
	let mut body = Vec::new();
	for (id, content) in frames {
		body.extend(id.as_bytes());

		let len = content.len() as u32;
		match version {
			2 => body.extend(&len.to_be_bytes()[1..]),
			3 => body.extend(len.to_be_bytes()),
			_ => body.extend(synch(len)),
		}

		if version > 2 {
			body.extend([0, 0]);
		}

		body.extend(*content);
	}

	let mut tag = vec![b'I', b'D', b'3', version, 0, 0];
	tag.extend(synch(body.len() as u32));
	tag.extend(body);
	tag
}

/// An APEv2 tag with a footer, and no header
pub fn ape(items: &[(&str, &[u8])]) -> Vec<u8> {
	let mut body = Vec::new();
	for (key, value) in items {
		body.extend((value.len() as u32).to_le_bytes());
		body.extend(0_u32.to_le_bytes());
		body.extend(key.as_bytes());
		body.push(0);
		body.extend(*value);
	}

	let size = body.len() as u32 + 32;

	let mut tag = body;
	tag.extend(b"APETAGEX");
	tag.extend(2000_u32.to_le_bytes());
	tag.extend(size.to_le_bytes());
	tag.extend((items.len() as u32).to_le_bytes());
	tag.extend([0; 12]);
	tag
}

pub const FLAC_STREAMINFO: u8 = 0;
pub const FLAC_PADDING: u8 = 1;
pub const FLAC_VORBIS_COMMENT: u8 = 4;

/// A FLAC stream with the given `(type, content)` metadata blocks
pub fn flac(blocks: &[(u8, Vec<u8>)]) -> Vec<u8> {
	let mut stream = b"fLaC".to_vec();
	for (i, (ty, content)) in blocks.iter().enumerate() {
		let last = if i == blocks.len() - 1 { 0x80 } else { 0 };
		stream.push(last | ty);
		stream.extend(&(content.len() as u32).to_be_bytes()[1..]);
		stream.extend(content);
	}

	// Some audio frames
	stream.extend([0xFF, 0xF8, 0x00, 0x00]);
	stream
}

/// The content of a `VORBIS_COMMENT` block
pub fn vorbis_comments<C>(vendor: &str, comments: &[C]) -> Vec<u8>
where
	C: AsRef<[u8]>,
{
	let mut content = (vendor.len() as u32).to_le_bytes().to_vec();
	content.extend(vendor.as_bytes());
	content.extend((comments.len() as u32).to_le_bytes());

	for comment in comments {
		let comment = comment.as_ref();
		content.extend((comment.len() as u32).to_le_bytes());
		content.extend(comment);
	}

	content
}

pub fn atom(ident: &[u8; 4], content: &[u8]) -> Vec<u8> {
	let mut atom = (content.len() as u32 + 8).to_be_bytes().to_vec();
	atom.extend(ident);
	atom.extend(content);
	atom
}

/// An `ilst` text item
pub fn text_item(ident: &[u8; 4], value: &str) -> Vec<u8> {
	let mut data = vec![0, 0, 0, 1, 0, 0, 0, 0];
	data.extend(value.as_bytes());
	atom(ident, &atom(b"data", &data))
}

/// A minimal M4A file, with `items` in its `moov.udta.meta.ilst` atom
pub fn m4a(brand: &[u8; 4], items: &[Vec<u8>]) -> Vec<u8> {
	let mut ftyp = brand.to_vec();
	ftyp.extend([0; 4]);
	ftyp.extend(b"isom");

	let mut meta = vec![0; 4];
	meta.extend(atom(b"hdlr", &[0; 25]));
	meta.extend(atom(b"ilst", &items.concat()));

	let udta = atom(b"udta", &atom(b"meta", &meta));

	let mut moov = atom(b"mvhd", &[0; 100]);
	moov.extend(udta);

	let mut file = atom(b"ftyp", &ftyp);
	file.extend(atom(b"moov", &moov));
	file.extend(atom(b"mdat", &[0xFF; 16]));
	file
}
