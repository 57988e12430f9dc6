#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod decompression;
pub mod document;
pub mod error;

pub use config::DecoderConfig;
pub use decoder::UsmapDecoder;
pub use decompression::{
    BrotliProvider, DecompressionProvider, IdentityProvider, ProviderError, ProviderRegistry,
    ZstdProvider,
};
pub use document::{DocumentSummary, MappingDocument};
pub use error::{DecodeError, ErrorKind};

pub use usmap_types::{EnumDef, NameTable, PropertyDef, PropertyTag, PropertyType, StructSchema};
pub use usmap_wire::{CompressionMethod, UsmapHeader, UsmapVersion};
