//! Well-known `ilst` item identifiers
//!
//! Many FOURCCs start with `0xA9` (©), and should be human-readable.

/// Title (`©nam`)
pub const TITLE: [u8; 4] = *b"\xA9nam";
/// Artist (`©ART`)
pub const ARTIST: [u8; 4] = *b"\xA9ART";
/// Album artist (`aART`)
pub const ALBUM_ARTIST: [u8; 4] = *b"aART";
/// Album (`©alb`)
pub const ALBUM: [u8; 4] = *b"\xA9alb";
/// Comment (`©cmt`)
pub const COMMENT: [u8; 4] = *b"\xA9cmt";
/// Release date (`©day`)
pub const YEAR: [u8; 4] = *b"\xA9day";
/// Genre, as text (`©gen`)
pub const GENRE: [u8; 4] = *b"\xA9gen";
/// Genre, as a 1-based ID3v1 genre index (`gnre`)
pub const GENRE_ID: [u8; 4] = *b"gnre";
/// Track number and total (`trkn`)
pub const TRACK_NUMBER: [u8; 4] = *b"trkn";
/// Disc number and total (`disk`)
pub const DISC_NUMBER: [u8; 4] = *b"disk";
/// Composer (`©wrt`)
pub const COMPOSER: [u8; 4] = *b"\xA9wrt";
/// Encoder (`©too`)
pub const ENCODER: [u8; 4] = *b"\xA9too";
/// Copyright (`cprt`)
pub const COPYRIGHT: [u8; 4] = *b"cprt";
/// Grouping (`©grp`)
pub const GROUPING: [u8; 4] = *b"\xA9grp";
/// Unsynchronized lyrics (`©lyr`)
pub const LYRICS: [u8; 4] = *b"\xA9lyr";
/// Tempo, in BPM (`tmpo`)
pub const TEMPO: [u8; 4] = *b"tmpo";
/// Part of a compilation flag (`cpil`)
pub const COMPILATION: [u8; 4] = *b"cpil";
/// Sort title (`sonm`)
pub const SORT_TITLE: [u8; 4] = *b"sonm";
/// Sort artist (`soar`)
pub const SORT_ARTIST: [u8; 4] = *b"soar";
/// Sort album (`soal`)
pub const SORT_ALBUM: [u8; 4] = *b"soal";
/// Sort album artist (`soaa`)
pub const SORT_ALBUM_ARTIST: [u8; 4] = *b"soaa";
/// Sort composer (`soco`)
pub const SORT_COMPOSER: [u8; 4] = *b"soco";
/// Description (`desc`)
pub const DESCRIPTION: [u8; 4] = *b"desc";
/// Long description (`ldes`)
pub const LONG_DESCRIPTION: [u8; 4] = *b"ldes";
/// TV show name (`tvsh`)
pub const TV_SHOW_NAME: [u8; 4] = *b"tvsh";
/// Cover art (`covr`)
///
/// These are never stored as atoms, see [`M4aTag::pictures`](crate::mp4::M4aTag::pictures).
pub const COVER_ART: [u8; 4] = *b"covr";
/// Freeform (`----`)
///
/// The item's full name is held in [`Atom::long_name`](crate::mp4::Atom::long_name).
pub const FREEFORM: [u8; 4] = *b"----";

// Data type indicators for `covr` data atoms
pub(crate) const DATA_TYPE_JPEG: u32 = 13;
pub(crate) const DATA_TYPE_PNG: u32 = 14;
pub(crate) const DATA_TYPE_BMP: u32 = 27;
