/// Options for reading a tag
///
/// Every `read_from` function takes these. Build them from [`ParseOptions::new`]:
///
/// ```rust
/// use tagkit::config::{ParseOptions, ParsingMode};
///
/// let parse_options = ParseOptions::new()
/// 	.parsing_mode(ParsingMode::BestAttempt)
/// 	.read_cover_art(false);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) read_cover_art: bool,
}

impl Default for ParseOptions {
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	read_cover_art: true,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// The [`ParsingMode`] used unless one is set
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Create a new `ParseOptions` with the defaults
	///
	/// See [`ParseOptions::default`].
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			read_cover_art: true,
		}
	}

	/// How to handle malformed input, see [`ParsingMode`]
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// Whether to keep pictures
	///
	/// When `false`, picture frames, blocks, items and `covr` atoms are skipped without being
	/// decoded.
	pub fn read_cover_art(&mut self, read_cover_art: bool) -> Self {
		self.read_cover_art = read_cover_art;
		*self
	}
}

/// How strictly malformed input is treated
///
/// Structural damage, such as a size pointing past the end of its container, fails in every
/// mode. The modes only differ for damage contained in a single frame, item, comment or atom.
///
/// # Examples
///
/// ```rust,no_run
/// use tagkit::config::{ParseOptions, ParsingMode};
/// use tagkit::flac::FlacTag;
///
/// # fn main() -> tagkit::error::Result<()> {
/// // Skip over broken comments and pictures rather than failing
/// let parse_options = ParseOptions::new().parsing_mode(ParsingMode::BestAttempt);
/// let tag = FlacTag::read_from_path("foo.flac", parse_options)?;
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Any malformed field discards the entire tag
	Strict,
	/// Malformed fields are skipped with a warning
	///
	/// This is the default.
	///
	/// * Text that fails to decode is decoded lossily
	/// * An ID3v2 frame with an unknown text encoding is skipped
	#[default]
	BestAttempt,
	/// Same as [`ParsingMode::BestAttempt`], but never keeps partially decoded fields
	///
	/// * A Vorbis comment that isn't valid UTF-8 is discarded
	Relaxed,
}
