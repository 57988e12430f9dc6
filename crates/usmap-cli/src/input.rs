// Shared file loading for every sub-command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use usmap_decoder::{
    CompressionMethod, DecodeError, DecoderConfig, MappingDocument, ProviderRegistry,
    UsmapDecoder,
};

/// Read `path` into memory.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// A decoder with the built-in codecs. No native Oodle library is loaded.
pub fn decoder(config: DecoderConfig) -> UsmapDecoder {
    UsmapDecoder::new(ProviderRegistry::default(), config)
}

/// Read and decode `path`, attaching the file name to any error.
pub fn load(path: &Path, config: DecoderConfig) -> Result<MappingDocument> {
    let bytes = read_file(path)?;
    decoder(config).decode_bytes(&bytes).map_err(|e| {
        let hint = oodle_hint(&e);
        let err = anyhow::Error::new(e);
        let err = match hint {
            Some(hint) => err.context(hint),
            None => err,
        };
        err.context(format!("failed to decode {}", path.display()))
    })
}

/// Extra guidance for errors the user can do something about.
pub fn oodle_hint(err: &DecodeError) -> Option<String> {
    match err {
        DecodeError::MissingProvider {
            method: CompressionMethod::Oodle,
        } => Some(
            "Oodle-compressed mappings need the proprietary codec, which this tool does not load"
                .to_string(),
        ),
        _ => None,
    }
}
