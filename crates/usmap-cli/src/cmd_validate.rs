/// Implementation of `usmap validate`.
///
/// Runs one full decode and reports either a series of `✓` lines or a
/// single `✗` line with the error kind and message.
///
/// # Success output
///
/// ```text
/// ✓ Header: valid (usmap v5, ZStandard)
/// ✓ Body: 201744 bytes after decompression
/// ✓ Names: 5120 entries
/// ✓ Enums: 310 resolved
/// ✓ Schemas: 1422 resolved, 9876 properties
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error [index out of range]: super type index 9001 out of range (name table has 12 entries) at offset 77
/// ```
use anyhow::{Result, anyhow};

use usmap_decoder::DecoderConfig;

use crate::ValidateArgs;
use crate::input;

/// Run the `usmap validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to decode. The
/// diagnostic has already been printed to stdout in the latter case.
pub fn run(args: &ValidateArgs, config: DecoderConfig) -> Result<()> {
    let bytes = input::read_file(&args.file)?;

    match input::decoder(config).decode_bytes(&bytes) {
        Ok(doc) => {
            let header = &doc.header;
            let properties: usize = doc.schemas.iter().map(|s| s.properties.len()).sum();
            println!(
                "✓ Header: valid (usmap v{}, {})",
                header.version.raw(),
                header.compression
            );
            println!("✓ Body: {} bytes after decompression", header.uncompressed_size);
            println!("✓ Names: {} entries", doc.names.len());
            println!("✓ Enums: {} resolved", doc.enums.len());
            println!(
                "✓ Schemas: {} resolved, {properties} properties",
                doc.schemas.len()
            );
            Ok(())
        }

        Err(e) => {
            println!("✗ Error [{}]: {e}", e.kind());
            if let Some(hint) = input::oodle_hint(&e) {
                println!("  {hint}");
            }
            Err(anyhow!("validation failed"))
        }
    }
}
