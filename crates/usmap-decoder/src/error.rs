use std::fmt;

use usmap_types::TypeError;
use usmap_wire::{CompressionMethod, WireError};

/// Errors that can occur while decoding a `.usmap` mapping file.
///
/// Decoding is fail-fast: the first error aborts the whole decode and no
/// partial document is returned.
///
/// ```text
///   DecodeError
///   ├── MissingProvider      ← no decompressor registered for the method
///   ├── DecompressFailed     ← provider returned an error
///   ├── SizeMismatch         ← provider output length != declared size
///   ├── DecompressionBomb    ← declared size exceeds the configured limit
///   ├── Type(TypeError)      ← from usmap-types table decoding
///   └── Wire(WireError)      ← from usmap-wire header and cursor reads
/// ```
///
/// Use [`DecodeError::kind`] to branch on the failure class without
/// matching the nested variants.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The body is compressed with a method no provider was registered for.
    ///
    /// The proprietary Oodle codec has no built-in provider; hosts that
    /// need it register one with
    /// [`ProviderRegistry::register`](crate::ProviderRegistry::register).
    #[error("no decompression provider registered for {method}")]
    MissingProvider { method: CompressionMethod },

    /// The provider could not decompress the payload.
    #[error("{method} decompression failed: {reason}")]
    DecompressFailed {
        method: CompressionMethod,
        reason: String,
    },

    /// The provider succeeded but produced the wrong number of bytes.
    #[error("{method} decompression produced {actual} bytes, header declares {expected}")]
    SizeMismatch {
        method: CompressionMethod,
        expected: usize,
        actual: usize,
    },

    /// The header declares an uncompressed size above
    /// [`DecoderConfig::max_uncompressed_size`](crate::DecoderConfig).
    #[error("declared uncompressed size {declared} exceeds limit {limit}")]
    DecompressionBomb { declared: usize, limit: usize },

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Wire(#[from] WireError),
}

/// Coarse classification of a [`DecodeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedHeader,
    UnsupportedVersion,
    UnsupportedCompressionMethod,
    TruncatedInput,
    MissingDecompressionProvider,
    DecompressionFailure,
    IndexOutOfRange,
    RecursionLimitExceeded,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedHeader => "malformed header",
            Self::UnsupportedVersion => "unsupported version",
            Self::UnsupportedCompressionMethod => "unsupported compression method",
            Self::TruncatedInput => "truncated input",
            Self::MissingDecompressionProvider => "missing decompression provider",
            Self::DecompressionFailure => "decompression failure",
            Self::IndexOutOfRange => "index out of range",
            Self::RecursionLimitExceeded => "recursion limit exceeded",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DecodeError {
    /// Which class of failure this is.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingProvider { .. } => ErrorKind::MissingDecompressionProvider,
            Self::DecompressFailed { .. }
            | Self::SizeMismatch { .. }
            | Self::DecompressionBomb { .. } => ErrorKind::DecompressionFailure,
            Self::Type(err) => type_kind(err),
            Self::Wire(err) => wire_kind(err),
        }
    }
}

fn type_kind(err: &TypeError) -> ErrorKind {
    match err {
        TypeError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
        TypeError::UnknownPropertyType { .. } => ErrorKind::MalformedHeader,
        TypeError::RecursionLimitExceeded { .. } => ErrorKind::RecursionLimitExceeded,
        TypeError::Wire(wire) => wire_kind(wire),
    }
}

fn wire_kind(err: &WireError) -> ErrorKind {
    match err {
        WireError::UnexpectedEof { .. } => ErrorKind::TruncatedInput,
        WireError::InvalidMagic { .. } | WireError::NegativeSize { .. } => {
            ErrorKind::MalformedHeader
        }
        WireError::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
        WireError::UnsupportedCompressionMethod { .. } => ErrorKind::UnsupportedCompressionMethod,
    }
}
