#![warn(clippy::pedantic)]

pub mod compression;
pub mod error;
pub mod header;
pub mod reader;
pub mod version;

pub use compression::CompressionMethod;
pub use error::WireError;
pub use header::UsmapHeader;
pub use reader::ByteReader;
pub use version::{FieldWidths, UsmapVersion};
