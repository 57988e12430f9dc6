use crate::compression::CompressionMethod;
use crate::error::WireError;
use crate::reader::ByteReader;
use crate::version::UsmapVersion;

/// Magic number at the start of every `.usmap` file.
pub const USMAP_MAGIC: u16 = 0x30C4;

/// Size of the fixed part of the legacy package version block
/// (two `i32` file versions).
const PACKAGE_FILE_VERSION_SIZE: usize = 8;

/// Size of one custom version entry: a 16-byte GUID and an `i32` version.
const CUSTOM_VERSION_ENTRY_SIZE: usize = 20;

/// Parsed `.usmap` file header.
///
/// ```text
/// ┌────────────────────┬──────────────┬──────────────────────────────────┐
/// │ Field              │ Size         │ Notes                            │
/// ├────────────────────┼──────────────┼──────────────────────────────────┤
/// │ magic              │ 2            │ 0x30C4                           │
/// │ version            │ 1            │ <= UsmapVersion::LATEST          │
/// │ has_versioning     │ 4 (i32)      │ only if version > PkgVersioning  │
/// │ package versions   │ 8            │ only if has_versioning != 0      │
/// │ custom versions    │ 4 + n * 20   │ only if has_versioning != 0      │
/// │ compression method │ 1            │ < CompressionMethod::COUNT       │
/// │ compressed size    │ 4 (i32)      │                                  │
/// │ uncompressed size  │ 4 (i32)      │                                  │
/// └────────────────────┴──────────────┴──────────────────────────────────┘
/// ```
///
/// The legacy versioning block is consumed but not interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UsmapHeader {
    pub version: UsmapVersion,
    /// Whether a legacy package versioning block was present (and skipped).
    pub has_versioning: bool,
    pub compression: CompressionMethod,
    pub compressed_size: usize,
    pub uncompressed_size: usize,
}

impl UsmapHeader {
    /// Parse the header, leaving `reader` at the first payload byte.
    ///
    /// Validation order follows the wire order, so the first bad field is
    /// the one reported.
    ///
    /// # Errors
    ///
    /// - [`WireError::InvalidMagic`] if the magic is not `0x30C4`.
    /// - [`WireError::UnsupportedVersion`] if the version is too new.
    /// - [`WireError::UnsupportedCompressionMethod`] for an unknown method byte.
    /// - [`WireError::NegativeSize`] for a negative size or version count.
    /// - [`WireError::UnexpectedEof`] if the header is truncated.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, WireError> {
        let magic = reader.read_u16()?;
        if magic != USMAP_MAGIC {
            return Err(WireError::InvalidMagic { found: magic });
        }

        let version = UsmapVersion::from_raw(reader.read_u8()?)?;

        let mut has_versioning = false;
        if version.has_versioning_flag() {
            has_versioning = reader.read_i32()? != 0;
            if has_versioning {
                skip_legacy_versions(reader)?;
            }
        }

        let compression = CompressionMethod::from_raw(reader.read_u8()?)?;
        let compressed_size = read_size(reader, "compressed size")?;
        let uncompressed_size = read_size(reader, "uncompressed size")?;

        Ok(Self {
            version,
            has_versioning,
            compression,
            compressed_size,
            uncompressed_size,
        })
    }
}

fn skip_legacy_versions(reader: &mut ByteReader<'_>) -> Result<(), WireError> {
    reader.skip(PACKAGE_FILE_VERSION_SIZE)?;
    let count = read_size(reader, "custom version count")?;
    let offset = reader.position();
    let span = count
        .checked_mul(CUSTOM_VERSION_ENTRY_SIZE)
        .ok_or(WireError::UnexpectedEof {
            offset,
            needed: usize::MAX,
            remaining: reader.remaining(),
        })?;
    reader.skip(span)
}

/// Read an `i32` that must not be negative.
fn read_size(reader: &mut ByteReader<'_>, field: &'static str) -> Result<usize, WireError> {
    let offset = reader.position();
    let value = reader.read_i32()?;
    usize::try_from(value).map_err(|_| WireError::NegativeSize {
        field,
        value,
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(version: u8, versioning: Option<i32>, method: u8, sizes: (i32, i32)) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&USMAP_MAGIC.to_le_bytes());
        buf.push(version);
        if let Some(count) = versioning {
            buf.extend_from_slice(&1i32.to_le_bytes());
            buf.extend_from_slice(&[0u8; 8]);
            buf.extend_from_slice(&count.to_le_bytes());
            for _ in 0..count.max(0) {
                buf.extend_from_slice(&[0xAB; 20]);
            }
        } else if version > 1 {
            buf.extend_from_slice(&0i32.to_le_bytes());
        }
        buf.push(method);
        buf.extend_from_slice(&sizes.0.to_le_bytes());
        buf.extend_from_slice(&sizes.1.to_le_bytes());
        buf
    }

    #[test]
    fn parses_initial_version_header() {
        let buf = header_bytes(0, None, 0, (12, 12));
        let mut r = ByteReader::new(&buf);
        let header = UsmapHeader::read_from(&mut r).unwrap();
        assert_eq!(header.version, UsmapVersion::Initial);
        assert!(!header.has_versioning);
        assert_eq!(header.compression, CompressionMethod::None);
        assert_eq!(header.compressed_size, 12);
        assert_eq!(header.uncompressed_size, 12);
        assert_eq!(r.position(), buf.len());
    }

    #[test]
    fn package_versioning_version_has_no_flag() {
        // Version 1 is not *newer* than PackageVersioning, so no flag is read.
        let buf = header_bytes(1, None, 3, (5, 9));
        let mut r = ByteReader::new(&buf);
        let header = UsmapHeader::read_from(&mut r).unwrap();
        assert_eq!(header.compression, CompressionMethod::ZStandard);
        assert_eq!(r.position(), 2 + 1 + 1 + 4 + 4);
    }

    #[test]
    fn skips_legacy_versioning_block() {
        let buf = header_bytes(3, Some(2), 2, (100, 400));
        let mut r = ByteReader::new(&buf);
        let header = UsmapHeader::read_from(&mut r).unwrap();
        assert!(header.has_versioning);
        assert_eq!(header.compression, CompressionMethod::Brotli);
        assert_eq!(header.uncompressed_size, 400);
        assert_eq!(r.position(), buf.len());
    }

    #[test]
    fn zero_versioning_flag_skips_nothing() {
        let buf = header_bytes(5, None, 0, (0, 0));
        let mut r = ByteReader::new(&buf);
        let header = UsmapHeader::read_from(&mut r).unwrap();
        assert!(!header.has_versioning);
        assert_eq!(r.position(), buf.len());
    }

    #[test]
    fn rejects_bad_magic() {
        let mut buf = header_bytes(0, None, 0, (0, 0));
        buf[0..2].copy_from_slice(&0xCAFEu16.to_le_bytes());
        let result = UsmapHeader::read_from(&mut ByteReader::new(&buf));
        assert!(matches!(
            result,
            Err(WireError::InvalidMagic { found: 0xCAFE })
        ));
    }

    #[test]
    fn rejects_unsupported_version() {
        let buf = header_bytes(9, None, 0, (0, 0));
        let result = UsmapHeader::read_from(&mut ByteReader::new(&buf));
        assert!(matches!(
            result,
            Err(WireError::UnsupportedVersion { version: 9, .. })
        ));
    }

    #[test]
    fn rejects_unknown_compression_method() {
        let buf = header_bytes(0, None, 4, (0, 0));
        let result = UsmapHeader::read_from(&mut ByteReader::new(&buf));
        assert!(matches!(
            result,
            Err(WireError::UnsupportedCompressionMethod { value: 4 })
        ));
    }

    #[test]
    fn rejects_negative_sizes() {
        let buf = header_bytes(0, None, 0, (-1, 0));
        let result = UsmapHeader::read_from(&mut ByteReader::new(&buf));
        assert!(matches!(
            result,
            Err(WireError::NegativeSize {
                field: "compressed size",
                value: -1,
                offset: 4
            })
        ));
    }

    #[test]
    fn truncated_custom_versions() {
        let mut buf = header_bytes(3, Some(3), 0, (0, 0));
        // Keep the flag, package versions and count, drop most entries.
        buf.truncate(3 + 4 + 8 + 4 + 10);
        let result = UsmapHeader::read_from(&mut ByteReader::new(&buf));
        assert!(matches!(result, Err(WireError::UnexpectedEof { .. })));
    }

    #[test]
    fn rejects_truncated_header() {
        let result = UsmapHeader::read_from(&mut ByteReader::new(&[0xC4]));
        assert!(matches!(
            result,
            Err(WireError::UnexpectedEof { offset: 0, .. })
        ));
    }
}
