//! APE specific items
//!
//! ## Tag notes
//!
//! An APEv2 tag is anchored by its 32 byte footer, which must sit at the very end of the file,
//! or directly before a trailing [`ID3v1`](crate::id3::v1) tag. Leading APE tags are not searched for.
//!
//! Only version 2000 (APEv2) tags are supported.

pub(crate) mod constants;
pub(crate) mod tag;

// Exports

pub use tag::ApeTag;
pub use tag::item::{ApeItem, ApeItemType};
