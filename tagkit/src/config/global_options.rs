use std::cell::Cell;

thread_local! {
	static GLOBAL_OPTIONS: Cell<GlobalOptions> = const { Cell::new(GlobalOptions::new()) };
}

/// The options applied to the current thread
pub(crate) fn global_options() -> GlobalOptions {
	GLOBAL_OPTIONS.get()
}

/// Options shared by every read on the current thread
///
/// # Examples
///
/// ```rust
/// use tagkit::config::{GlobalOptions, apply_global_options};
///
/// // No picture in this library is larger than 4 MiB
/// apply_global_options(GlobalOptions::new().allocation_limit(4 * 1024 * 1024));
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct GlobalOptions {
	pub(crate) allocation_limit: usize,
}

impl GlobalOptions {
	/// The default allocation limit, 16 MiB
	pub const DEFAULT_ALLOCATION_LIMIT: usize = 16 * 1024 * 1024;

	/// Create a new `GlobalOptions` with the defaults
	///
	/// See [`GlobalOptions::default`].
	#[must_use]
	pub const fn new() -> Self {
		Self {
			allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
		}
	}

	/// The largest buffer, in bytes, that will be allocated for a single tag, frame or item
	///
	/// Sizes are read from the input, so anything larger fails with
	/// [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData) before allocating.
	pub fn allocation_limit(&mut self, allocation_limit: usize) -> Self {
		self.allocation_limit = allocation_limit;
		*self
	}
}

impl Default for GlobalOptions {
	/// ```rust,ignore
	/// GlobalOptions {
	/// 	allocation_limit: GlobalOptions::DEFAULT_ALLOCATION_LIMIT,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

/// Replace the [`GlobalOptions`] of the current thread
///
/// # Examples
///
/// ```rust
/// use tagkit::config::{GlobalOptions, apply_global_options};
///
/// apply_global_options(GlobalOptions::new().allocation_limit(1024));
/// ```
pub fn apply_global_options(options: GlobalOptions) {
	GLOBAL_OPTIONS.set(options);
}
