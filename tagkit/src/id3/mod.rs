//! ID3 specific items
//!
//! ID3 comes in two unrelated flavors:
//!
//! * [`v1`]: A fixed 128 byte block at the very end of a file
//! * [`v2`]: A frame based tag at the very start of a file
//!
//! Check the modules for important notes and/or warnings.

pub mod v1;
pub mod v2;
