//! ID3v2 items and utilities
//!
//! ## Important notes
//!
//! See:
//!
//! * [`Id3v2Tag`]
//! * [`Frame`]

mod frame;
pub(crate) mod header;
mod items;
pub(crate) mod read;
pub(crate) mod tag;
pub mod util;
pub(crate) mod write;

// Exports

pub use header::Id3v2Version;

pub use tag::{FrameAlias, Id3v2Tag, aliases};

pub use items::*;

pub use frame::header::FrameId;
pub use frame::{Frame, FrameFlags};
