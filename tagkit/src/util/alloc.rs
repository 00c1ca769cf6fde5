use crate::config::global_options;
use crate::error::Result;
use crate::macros::err;

use std::io::Read;

/// Creates a `Vec` of `len` copies of `element`, failing instead of aborting
///
/// Use [`try_vec!`](crate::macros::try_vec) rather than calling this directly.
pub(crate) fn fallible_vec_from_element<T>(element: T, len: usize) -> Result<Vec<T>>
where
	T: Clone,
{
	let mut v = Vec::new();
	if len == 0 {
		return Ok(v);
	}

	let limit = global_options().allocation_limit;
	if len > limit {
		log::warn!("Refusing to allocate {len} bytes, the limit is {limit}");
		err!(TooMuchData);
	}

	v.try_reserve_exact(len)?;
	v.resize(len, element);

	Ok(v)
}

/// Reads exactly `len` bytes from `reader` into a new buffer
///
/// The length is usually taken straight from the input, so it is checked against the
/// allocation limit before anything is allocated.
pub(crate) fn read_exact_vec<R>(reader: &mut R, len: u64) -> Result<Vec<u8>>
where
	R: Read,
{
	let Ok(len) = usize::try_from(len) else {
		err!(TooMuchData);
	};

	let mut content = crate::macros::try_vec![0; len];
	reader.read_exact(&mut content)?;

	Ok(content)
}
