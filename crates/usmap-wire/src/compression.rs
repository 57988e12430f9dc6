use std::fmt;

use crate::error::WireError;

/// Compression applied to the body that follows the header.
///
/// ```text
/// ┌──────┬───────────┐
/// │ Wire │ Method    │
/// ├──────┼───────────┤
/// │ 0    │ None      │
/// │ 1    │ Oodle     │
/// │ 2    │ Brotli    │
/// │ 3    │ ZStandard │
/// └──────┴───────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CompressionMethod {
    None,
    /// Proprietary codec; the host has to supply a decompressor.
    Oodle,
    Brotli,
    ZStandard,
}

impl CompressionMethod {
    /// Number of known methods; any wire byte at or above this is invalid.
    pub const COUNT: u8 = 4;

    pub const ALL: [Self; 4] = [Self::None, Self::Oodle, Self::Brotli, Self::ZStandard];

    /// Parse a compression method byte.
    ///
    /// # Errors
    ///
    /// [`WireError::UnsupportedCompressionMethod`] if `raw >= COUNT`.
    pub fn from_raw(raw: u8) -> Result<Self, WireError> {
        match raw {
            0 => Ok(Self::None),
            1 => Ok(Self::Oodle),
            2 => Ok(Self::Brotli),
            3 => Ok(Self::ZStandard),
            value => Err(WireError::UnsupportedCompressionMethod { value }),
        }
    }

    #[must_use]
    pub fn raw(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Oodle => 1,
            Self::Brotli => 2,
            Self::ZStandard => 3,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Oodle => "Oodle",
            Self::Brotli => "Brotli",
            Self::ZStandard => "ZStandard",
        }
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
