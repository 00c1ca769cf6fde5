pub(crate) const APE_PREAMBLE: &[u8; 8] = b"APETAGEX";

/// The size of both the header and the footer
pub(crate) const APE_FOOTER_SIZE: u32 = 32;

/// The only supported version (APEv2)
pub(crate) const APE_VERSION: u32 = 2000;

/// Items with these keys hold images, and are skipped when not reading cover art
pub(crate) const APE_PICTURE_KEY_PREFIX: &str = "cover art";

// Key bounds, in bytes
pub(crate) const MIN_KEY_LEN: usize = 1;
pub(crate) const MAX_KEY_LEN: usize = 255;
