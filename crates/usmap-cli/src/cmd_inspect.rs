/// Implementation of `usmap inspect`.
///
/// # Output format
///
/// ```text
/// Header:      usmap v5 (Utf8AndAnsiStrProps), versioning=no
/// Compression: ZStandard, 48213 -> 201744 bytes
/// Names: 5120 | Enums: 310 | Schemas: 1422
/// Properties:  9876 serialized, deepest type nests 4 levels
/// ```
use anyhow::Result;
use usmap_decoder::DecoderConfig;

use crate::InspectArgs;
use crate::input;

/// Run the `usmap inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode.
pub fn run(args: &InspectArgs, config: DecoderConfig) -> Result<()> {
    let doc = input::load(&args.file, config)?;
    let header = &doc.header;

    println!(
        "Header:      usmap v{} ({:?}), versioning={}",
        header.version.raw(),
        header.version,
        if header.has_versioning { "yes" } else { "no" }
    );
    println!(
        "Compression: {}, {} -> {} bytes",
        header.compression, header.compressed_size, header.uncompressed_size
    );
    println!("{}", doc.summary());

    let properties = doc.schemas.iter().flat_map(|s| &s.properties);
    let (count, deepest) = properties.fold((0usize, 0usize), |(n, d), p| {
        (n + 1, d.max(p.ty.depth()))
    });
    println!("Properties:  {count} serialized, deepest type nests {deepest} levels");

    Ok(())
}
