// Allocate a `Vec` through `GlobalOptions::allocation_limit`, bailing with `TooMuchData`
macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Bail with an `ErrorKind`
//
// - err!(NotFound)
// - err!(BadAtom("reason"))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::TagError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::TagError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Bail with an `Id3v2ErrorKind`
//
// - id3v2_err!(BadFrameLength)
// - id3v2_err!(BadEncoding(byte))
macro_rules! id3v2_err {
	($variant:ident) => {
		return Err(crate::error::Id3v2Error::new(
			crate::error::Id3v2ErrorKind::$variant,
		)
		.into())
	};
	($variant:ident($($arg:expr),+)) => {
		return Err(crate::error::Id3v2Error::new(
			crate::error::Id3v2ErrorKind::$variant($($arg),+),
		)
		.into())
	};
}

// A `FileDecodingError` for a `TagType`, optionally bailing with it
//
// - decode_err!(Ape, "reason")
// - decode_err!(@BAIL Ape, "reason")
macro_rules! decode_err {
	($tag_ty:ident, $reason:literal) => {
		Into::<crate::error::TagError>::into(crate::error::FileDecodingError::new(
			crate::tag::TagType::$tag_ty,
			$reason,
		))
	};
	(@BAIL $tag_ty:ident, $reason:literal) => {
		return Err(decode_err!($tag_ty, $reason))
	};
}

// Branch on a `ParsingMode`, anything without its own arm runs `DEFAULT`
//
// - parse_mode_choice!(
// 		parse_mode,
// 		STRICT: err!(SizeMismatch),
// 		DEFAULT: log::warn!("..")
//   )
macro_rules! parse_mode_choice {
	(
		$parse_mode:ident,
		$(STRICT: $strict_handler:expr,)?
		$(RELAXED: $relaxed_handler:expr,)?
		DEFAULT: $default:expr
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => { $strict_handler },)?
			$(crate::config::ParsingMode::Relaxed => { $relaxed_handler },)?
			#[allow(unreachable_patterns)]
			_ => { $default }
		}
	};
}

pub(crate) use {decode_err, err, id3v2_err, parse_mode_choice, try_vec};
