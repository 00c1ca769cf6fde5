//! Utilities for working with synchsafe integers
//!
//! A synchsafe integer only uses the lower 7 bits of each byte, so that the value can never be
//! mistaken for an MPEG frame sync.

use crate::error::Result;
use crate::macros::{err, id3v2_err};

/// An integer that can be converted to and from synchsafe variants
pub trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in 28 bits
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> tagkit::error::Result<()> {
	/// // Maximum value we can represent in a synchsafe u32
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Each byte should have 7 set bits and an MSB of 0
	/// assert_eq!(synch_number, 0b01111111_01111111_01111111_01111111_u32);
	/// # Ok(()) }
	/// ```
	fn synch(self) -> Result<Self>;

	/// Unsynchronise a synchsafe integer
	///
	/// The high bit of each byte is ignored. See [`SynchsafeInteger::try_unsynch`] for a checked
	/// version.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// assert_eq!(0x0000_0201_u32.unsynch(), 257);
	/// ```
	fn unsynch(self) -> Self;

	/// Unsynchronise a synchsafe integer, verifying that it is actually synchsafe
	///
	/// # Errors
	///
	/// Any byte has its high bit set
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// assert_eq!(0x7F7F_7F7F_u32.try_unsynch().ok(), Some(0x0FFF_FFFF));
	/// assert!(0x0000_0080_u32.try_unsynch().is_err());
	/// ```
	fn try_unsynch(self) -> Result<Self>;
}

impl SynchsafeInteger for u32 {
	fn synch(self) -> Result<Self> {
		const MAXIMUM_INTEGER: u32 = 0x0FFF_FFFF;

		if self > MAXIMUM_INTEGER {
			err!(TooMuchData);
		}

		Ok((self & 0x7F)
			| ((self & (0x7F << 7)) << 1)
			| ((self & (0x7F << 14)) << 2)
			| ((self & (0x7F << 21)) << 3))
	}

	fn unsynch(self) -> Self {
		((self & 0x7F00_0000) >> 3)
			| ((self & 0x7F_0000) >> 2)
			| ((self & 0x7F00) >> 1)
			| (self & 0x7F)
	}

	fn try_unsynch(self) -> Result<Self> {
		if self & 0x8080_8080 != 0 {
			id3v2_err!(BadSyncText);
		}

		Ok(self.unsynch())
	}
}
