use log::debug;
use usmap_types::{EnumDef, NameTable, StructSchema};
use usmap_wire::{ByteReader, CompressionMethod, UsmapHeader};

use crate::config::DecoderConfig;
use crate::decompression::ProviderRegistry;
use crate::document::MappingDocument;
use crate::error::DecodeError;

/// Decodes `.usmap` mapping files into [`MappingDocument`]s.
///
/// Decoding runs five phases in a fixed order, each consuming the output
/// of the one before:
///
///   1. **Header**: magic, version, legacy versioning block, compression
///      method and the two body sizes.
///   2. **Decompression**: the `compressed_size` bytes after the header go
///      through the provider registered for the header's method. The
///      result must be exactly `uncompressed_size` bytes.
///   3. **Names**: the interned string table.
///   4. **Enums**: enum names and members, resolved through the names.
///   5. **Schemas**: struct schemas and their property type trees.
///
/// Bytes left over after the compressed payload or after the schema table
/// are ignored.
///
/// A decoder holds no per-file state, so one instance can decode any
/// number of files, from several threads at once.
///
/// # Example
///
/// ```rust
/// use usmap_decoder::{ErrorKind, UsmapDecoder};
///
/// let err = UsmapDecoder::decode(&[0xFE, 0xCA, 0x00]).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::MalformedHeader);
/// ```
#[derive(Debug, Default)]
pub struct UsmapDecoder {
    registry: ProviderRegistry,
    config: DecoderConfig,
}

impl UsmapDecoder {
    #[must_use]
    pub fn new(registry: ProviderRegistry, config: DecoderConfig) -> Self {
        Self { registry, config }
    }

    /// Decode with the default providers and limits.
    ///
    /// # Errors
    ///
    /// See [`decode_bytes`](Self::decode_bytes).
    pub fn decode(input: &[u8]) -> Result<MappingDocument, DecodeError> {
        Self::default().decode_bytes(input)
    }

    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a complete mapping file held in memory.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Wire`] for header problems and truncated input.
    /// - [`DecodeError::MissingProvider`] if no provider handles the
    ///   header's compression method.
    /// - [`DecodeError::DecompressionBomb`] if a compressed body declares
    ///   more than [`DecoderConfig::max_uncompressed_size`] bytes.
    /// - [`DecodeError::DecompressFailed`] or [`DecodeError::SizeMismatch`]
    ///   if decompression fails or yields the wrong length.
    /// - [`DecodeError::Type`] for unresolvable names, unknown property
    ///   tags, over-deep type trees, or a truncated body.
    pub fn decode_bytes(&self, input: &[u8]) -> Result<MappingDocument, DecodeError> {
        let mut reader = ByteReader::new(input);

        // 1. Header.
        let header = UsmapHeader::read_from(&mut reader)?;
        debug!(
            "usmap header: version={:?} versioning={} compression={} sizes={}/{}",
            header.version,
            header.has_versioning,
            header.compression,
            header.compressed_size,
            header.uncompressed_size,
        );

        // 2. Decompression. The payload must be fully present before any
        // provider sees it.
        let payload = reader.read_bytes(header.compressed_size)?;
        if reader.remaining() > 0 {
            debug!("ignoring {} bytes after compressed payload", reader.remaining());
        }
        let body = self.decompress(&header, payload)?;

        // 3-5. Tables.
        let widths = header.version.field_widths();
        let mut body_reader = ByteReader::new(&body);

        let names = NameTable::decode(&mut body_reader, widths)?;
        debug!("decoded {} names", names.len());

        let enums = EnumDef::decode_table(&mut body_reader, &names, widths)?;
        debug!("decoded {} enums", enums.len());

        let schemas =
            StructSchema::decode_table(&mut body_reader, &names, self.config.max_property_depth)?;
        debug!("decoded {} schemas", schemas.len());

        if body_reader.remaining() > 0 {
            debug!(
                "ignoring {} bytes after schema table",
                body_reader.remaining()
            );
        }

        Ok(MappingDocument {
            header,
            names,
            enums,
            schemas,
        })
    }

    fn decompress(&self, header: &UsmapHeader, payload: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let method = header.compression;
        let expected = header.uncompressed_size;

        let provider = self
            .registry
            .get(method)
            .ok_or(DecodeError::MissingProvider { method })?;

        // An uncompressed payload is already in memory; only codecs inflate.
        if method != CompressionMethod::None && expected > self.config.max_uncompressed_size {
            return Err(DecodeError::DecompressionBomb {
                declared: expected,
                limit: self.config.max_uncompressed_size,
            });
        }

        let body = provider
            .decompress(payload, expected)
            .map_err(|e| DecodeError::DecompressFailed {
                method,
                reason: e.to_string(),
            })?;

        if body.len() != expected {
            return Err(DecodeError::SizeMismatch {
                method,
                expected,
                actual: body.len(),
            });
        }

        debug!("{method}: {} -> {} bytes", payload.len(), body.len());
        Ok(body)
    }
}
