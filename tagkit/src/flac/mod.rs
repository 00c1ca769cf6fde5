//! Items for FLAC
//!
//! ## Notes
//!
//! * Only the `VORBIS_COMMENT` and `PICTURE` metadata blocks are read, everything else is skipped.
//! * An ID3v2 tag at the start of a FLAC stream is not searched for.
//! * See [`FlacTag`]

pub(crate) mod block;
mod read;
pub(crate) mod tag;

// Exports
pub use tag::FlacTag;
