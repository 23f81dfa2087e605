//! Gzip container header parsing.
//!
//! The block engines only understand raw deflate, so the gzip member header
//! has to be located and skipped before the payload is handed over. The
//! parser is pure: it inspects a prefix of the stream and reports where the
//! deflate payload begins, without touching any adapter state.
//!
//! # Header layout
//!
//! ```text
//! +---+---+---+---+---+---+---+---+---+---+
//! |ID1|ID2|CM |FLG|     MTIME     |XFL|OS |   fixed 10 bytes
//! +---+---+---+---+---+---+---+---+---+---+
//! [FEXTRA: XLEN (2 bytes, LE), XLEN bytes]
//! [FNAME: zero-terminated]
//! [FCOMMENT: zero-terminated]
//! [FHCRC: 2 bytes]
//! ```
//!
//! # Limitations
//!
//! The whole header must be present in the supplied prefix. A header split
//! across two upstream reads is reported as [`HeaderParse::Incomplete`].

use thiserror::Error;

/// First magic byte of a gzip member.
pub const ID1: u8 = 0x1f;

/// Second magic byte of a gzip member.
pub const ID2: u8 = 0x8b;

/// Size of the fixed portion of the header.
pub const MIN_HEADER_LEN: usize = 10;

/// Offset of the flag byte within the fixed header.
const FLAG_OFFSET: usize = 3;

/// Bits of the gzip `FLG` byte.
pub mod flags {
    /// Payload is probably ASCII text. Informational only.
    pub const FTEXT: u8 = 0x01;
    /// A CRC16 of the header follows the optional fields.
    pub const FHCRC: u8 = 0x02;
    /// An extra field with a little-endian length prefix is present.
    pub const FEXTRA: u8 = 0x04;
    /// A zero-terminated original file name is present.
    pub const FNAME: u8 = 0x08;
    /// A zero-terminated comment is present.
    pub const FCOMMENT: u8 = 0x10;
}

/// Successful outcome of [`parse_header`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HeaderParse {
    /// The prefix ends before the header does.
    Incomplete,
    /// The deflate payload starts at this offset.
    Complete(usize),
}

/// The prefix is not a gzip header.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum HeaderError {
    /// The two magic bytes are not `1f 8b`.
    #[error("gzip magic mismatch: expected 1f 8b, found {:02x} {:02x}", .found[0], .found[1])]
    MagicMismatch {
        /// The two bytes found at the start of the stream.
        found: [u8; 2],
    },
}

/// Locates the start of the deflate payload inside `buf`.
///
/// Optional fields are visited in the order the format defines them. Every
/// skip is bounds-checked against `buf.len()`, so a name or comment without a
/// terminator inside `buf` is reported as [`HeaderParse::Incomplete`].
///
/// # Examples
///
/// ```
/// use stream_io::gzip::{HeaderParse, parse_header};
///
/// let header = [0x1f, 0x8b, 0x08, 0x00, 0, 0, 0, 0, 0x00, 0x03, 0x2b];
/// assert_eq!(parse_header(&header), Ok(HeaderParse::Complete(10)));
/// assert_eq!(parse_header(&header[..4]), Ok(HeaderParse::Incomplete));
/// ```
pub fn parse_header(buf: &[u8]) -> Result<HeaderParse, HeaderError> {
    if buf.len() < MIN_HEADER_LEN {
        return Ok(HeaderParse::Incomplete);
    }
    if buf[0] != ID1 || buf[1] != ID2 {
        return Err(HeaderError::MagicMismatch {
            found: [buf[0], buf[1]],
        });
    }

    let flg = buf[FLAG_OFFSET];
    let mut offset = MIN_HEADER_LEN;

    if flg & flags::FEXTRA != 0 {
        let Some(xlen) = buf.get(offset..offset + 2) else {
            return Ok(HeaderParse::Incomplete);
        };
        let xlen = usize::from(u16::from_le_bytes([xlen[0], xlen[1]]));
        offset += 2 + xlen;
    }
    if flg & flags::FNAME != 0 {
        let Some(next) = skip_zero_terminated(buf, offset) else {
            return Ok(HeaderParse::Incomplete);
        };
        offset = next;
    }
    if flg & flags::FCOMMENT != 0 {
        let Some(next) = skip_zero_terminated(buf, offset) else {
            return Ok(HeaderParse::Incomplete);
        };
        offset = next;
    }
    if flg & flags::FHCRC != 0 {
        offset += 2;
    }

    if offset > buf.len() {
        return Ok(HeaderParse::Incomplete);
    }
    Ok(HeaderParse::Complete(offset))
}

/// Returns the offset just past the zero terminator that follows `start`.
fn skip_zero_terminated(buf: &[u8], start: usize) -> Option<usize> {
    buf.get(start..)?
        .iter()
        .position(|&byte| byte == 0)
        .map(|terminator| start + terminator + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(flg: u8) -> Vec<u8> {
        vec![ID1, ID2, 0x08, flg, 0, 0, 0, 0, 0x00, 0x03]
    }

    #[test]
    fn plain_header_is_ten_bytes() {
        let mut buf = fixed(0);
        buf.extend_from_slice(&[0x2b, 0xc9]);
        assert_eq!(parse_header(&buf), Ok(HeaderParse::Complete(10)));
    }

    #[test]
    fn exactly_ten_bytes_is_enough() {
        assert_eq!(parse_header(&fixed(0)), Ok(HeaderParse::Complete(10)));
    }

    #[test]
    fn short_prefix_needs_more_data() {
        let buf = fixed(0);
        for len in 0..MIN_HEADER_LEN {
            assert_eq!(parse_header(&buf[..len]), Ok(HeaderParse::Incomplete), "{len}");
        }
    }

    #[test]
    fn magic_is_checked_before_flags() {
        let mut buf = fixed(flags::FNAME);
        buf[0] = 0x78;
        buf[1] = 0x9c;
        assert_eq!(
            parse_header(&buf),
            Err(HeaderError::MagicMismatch { found: [0x78, 0x9c] })
        );
    }

    #[test]
    fn magic_mismatch_message_shows_bytes() {
        let err = HeaderError::MagicMismatch { found: [0x50, 0x4b] };
        assert_eq!(
            err.to_string(),
            "gzip magic mismatch: expected 1f 8b, found 50 4b"
        );
    }

    #[test]
    fn name_field_is_skipped_through_terminator() {
        let mut buf = fixed(flags::FNAME);
        buf.extend_from_slice(b"toto\0");
        buf.push(0x2b);
        assert_eq!(parse_header(&buf), Ok(HeaderParse::Complete(15)));
    }

    #[test]
    fn unterminated_name_needs_more_data() {
        let mut buf = fixed(flags::FNAME);
        buf.extend_from_slice(b"no terminator here");
        assert_eq!(parse_header(&buf), Ok(HeaderParse::Incomplete));
    }

    #[test]
    fn name_starting_at_end_of_buffer_needs_more_data() {
        assert_eq!(parse_header(&fixed(flags::FNAME)), Ok(HeaderParse::Incomplete));
    }

    #[test]
    fn comment_follows_name() {
        let mut buf = fixed(flags::FNAME | flags::FCOMMENT);
        buf.extend_from_slice(b"a\0");
        buf.extend_from_slice(b"comment\0");
        assert_eq!(parse_header(&buf), Ok(HeaderParse::Complete(20)));
    }

    #[test]
    fn extra_field_length_is_little_endian() {
        let mut buf = fixed(flags::FEXTRA);
        buf.extend_from_slice(&[0x03, 0x00, b'x', b'y', b'z']);
        assert_eq!(parse_header(&buf), Ok(HeaderParse::Complete(15)));
    }

    #[test]
    fn extra_field_length_split_needs_more_data() {
        let mut buf = fixed(flags::FEXTRA);
        buf.push(0x03);
        assert_eq!(parse_header(&buf), Ok(HeaderParse::Incomplete));
    }

    #[test]
    fn extra_field_body_past_end_needs_more_data() {
        let mut buf = fixed(flags::FEXTRA);
        buf.extend_from_slice(&[0x00, 0x01, 0xaa]);
        assert_eq!(parse_header(&buf), Ok(HeaderParse::Incomplete));
    }

    #[test]
    fn header_crc_adds_two_bytes() {
        let mut buf = fixed(flags::FHCRC);
        buf.extend_from_slice(&[0x12, 0x34]);
        assert_eq!(parse_header(&buf), Ok(HeaderParse::Complete(12)));
        assert_eq!(parse_header(&buf[..11]), Ok(HeaderParse::Incomplete));
    }

    #[test]
    fn all_optional_fields_in_order() {
        let mut buf = fixed(
            flags::FTEXT | flags::FEXTRA | flags::FNAME | flags::FCOMMENT | flags::FHCRC,
        );
        buf.extend_from_slice(&[0x02, 0x00, 0xee, 0xff]);
        buf.extend_from_slice(b"name\0");
        buf.extend_from_slice(b"c\0");
        buf.extend_from_slice(&[0xaa, 0xbb]);
        buf.extend_from_slice(b"payload");
        assert_eq!(parse_header(&buf), Ok(HeaderParse::Complete(10 + 4 + 5 + 2 + 2)));
    }

    #[test]
    fn real_gzip_output_with_file_name() {
        // `gzip` of "toto\n" from a file named toto.
        let bytes = [
            0x1f, 0x8b, 0x08, 0x08, 0xef, 0xbb, 0xd1, 0x6a, 0x00, 0x03, 0x74, 0x6f, 0x74, 0x6f,
            0x00, 0x2b, 0xc9, 0x2f, 0xc9, 0xe7, 0x02, 0x00, 0xbd, 0x08, 0x7d, 0xf8, 0x05, 0x00,
            0x00, 0x00,
        ];
        assert_eq!(parse_header(&bytes), Ok(HeaderParse::Complete(15)));
    }
}
