/// Errors raised while reading raw bytes and the `.usmap` file header.
///
/// Every variant carries the byte offset (or the offending value) so a
/// malformed mapping file can be located without a hex editor.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A read needed more bytes than remain in the buffer.
    #[error("unexpected end of input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// Magic number did not match `0x30C4`.
    #[error("invalid magic number: expected 0x30C4, got {found:#06X}")]
    InvalidMagic { found: u16 },

    /// Version byte is newer than the latest known version.
    #[error("unsupported .usmap version {version} (latest known is {latest})")]
    UnsupportedVersion { version: u8, latest: u8 },

    /// Compression method byte is outside the known range.
    #[error("unsupported compression method {value}")]
    UnsupportedCompressionMethod { value: u8 },

    /// A signed size or count field in the header was negative.
    #[error("negative {field} ({value}) at offset {offset}")]
    NegativeSize {
        field: &'static str,
        value: i32,
        offset: usize,
    },
}
