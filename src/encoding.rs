//! Character encoding detection and transcoding.
//!
//! Cache files are JSON and normally UTF-8, but files edited by hand on some
//! platforms come back with a byte order mark or as UTF-16.

use encoding_rs::{Encoding, UTF_8};

/// Detect the encoding of cache bytes from a byte order mark.
///
/// Defaults to UTF-8 when there is none.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    Encoding::for_bom(bytes).map_or(UTF_8, |(encoding, _)| encoding)
}

/// Transcode cache bytes to a UTF-8 string.
///
/// The byte order mark is removed and invalid sequences are replaced with
/// U+FFFD rather than failing.
///
/// # Examples
///
/// ```
/// use rs_spellbook::encoding::transcode_to_utf8;
///
/// let bytes = b"\xEF\xBB\xBF[{\"name\": \"Light\"}]";
/// assert_eq!(transcode_to_utf8(bytes), "[{\"name\": \"Light\"}]");
/// ```
#[must_use]
pub fn transcode_to_utf8(bytes: &[u8]) -> String {
    let encoding = detect_encoding(bytes);
    let (decoded, _had_errors) = encoding.decode_with_bom_removal(bytes);
    decoded.into_owned()
}
