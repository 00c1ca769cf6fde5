pub(super) mod parse;

use crate::error::Result;
use crate::macros::id3v2_err;

use std::borrow::{Borrow, Cow};
use std::fmt::{Display, Formatter};

/// An `ID3v2` frame ID
///
/// This is 3 characters for ID3v2.2 frames, and 4 characters for ID3v2.3 and ID3v2.4.
/// IDs are never converted between versions.
#[derive(PartialEq, Clone, Debug, Eq, Hash)]
pub struct FrameId(Cow<'static, str>);

impl FrameId {
	/// Attempts to create a `FrameId` from an ID string
	///
	/// # Errors
	///
	/// * `id` contains invalid characters (must be 'A'..='Z' and '0'..='9')
	/// * `id` is an invalid length (must be 3 or 4)
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::id3::v2::FrameId;
	///
	/// # fn main() -> tagkit::error::Result<()> {
	/// let title = FrameId::new("TIT2")?;
	/// assert_eq!(title.as_str(), "TIT2");
	///
	/// assert!(FrameId::new("tit2").is_err());
	/// # Ok(()) }
	/// ```
	pub fn new<I>(id: I) -> Result<Self>
	where
		I: Into<Cow<'static, str>>,
	{
		let id = id.into();
		Self::verify_id(id.as_bytes())?;

		Ok(Self(id))
	}

	/// Used for IDs known to be valid at compile time
	pub(crate) const fn from_static(id: &'static str) -> Self {
		Self(Cow::Borrowed(id))
	}

	pub(crate) fn verify_id(id: &[u8]) -> Result<()> {
		if !matches!(id.len(), 3 | 4)
			|| !id.iter().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
		{
			id3v2_err!(BadFrameId(id.to_vec()));
		}

		Ok(())
	}

	/// Whether this is a 3 character ID3v2.2 ID
	///
	/// # Examples
	///
	/// ```rust
	/// use tagkit::id3::v2::FrameId;
	///
	/// # fn main() -> tagkit::error::Result<()> {
	/// assert!(!FrameId::new("TPE1")?.is_v22());
	/// assert!(FrameId::new("TP1")?.is_v22());
	/// # Ok(()) }
	/// ```
	pub fn is_v22(&self) -> bool {
		self.0.len() == 3
	}

	/// Extracts the string from the ID
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for FrameId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::FrameId;

	#[test_log::test]
	fn verify_ids() {
		assert!(FrameId::new("TIT2").is_ok());
		assert!(FrameId::new("TT2").is_ok());

		assert!(FrameId::new("TIT").is_ok());
		assert!(FrameId::new("TI").is_err());
		assert!(FrameId::new("TIT22").is_err());
		assert!(FrameId::new("TI+2").is_err());
		assert!(FrameId::new("TIT ").is_err());
	}
}
