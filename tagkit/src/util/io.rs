//! Helpers for working with seekable streams

use crate::error::Result;

use std::io::{Seek, SeekFrom};

// TODO: https://github.com/rust-lang/rust/issues/59359
pub(crate) trait SeekStreamLen: Seek {
	fn stream_len_hack(&mut self) -> Result<u64> {
		let current_pos = self.stream_position()?;
		let len = self.seek(SeekFrom::End(0))?;

		self.seek(SeekFrom::Start(current_pos))?;

		Ok(len)
	}

	/// The number of bytes between the current position and the end of the stream
	fn remaining_len(&mut self) -> Result<u64> {
		let current_pos = self.stream_position()?;
		let len = self.stream_len_hack()?;

		Ok(len.saturating_sub(current_pos))
	}
}

impl<T> SeekStreamLen for T where T: Seek {}

/// Seeks to `offset` bytes before the end of the stream
///
/// Returns `false`, leaving the position untouched, if the stream is shorter than `offset`.
pub(crate) fn seek_from_end<S>(stream: &mut S, offset: u64) -> Result<bool>
where
	S: Seek,
{
	let len = stream.stream_len_hack()?;
	if len < offset {
		return Ok(false);
	}

	stream.seek(SeekFrom::Start(len - offset))?;
	Ok(true)
}
