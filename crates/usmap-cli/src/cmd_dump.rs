/// Implementation of `usmap dump`.
///
/// Serializes the whole decoded document (header, names, enums, schemas)
/// to JSON. Property types use serde's externally tagged layout:
///
/// ```json
/// { "Map": { "key": { "Scalar": "Name" }, "value": { "Struct": { "struct_name": "Vector" } } } }
/// ```
use std::fs;
use std::io::{self, Write as _};

use anyhow::{Context, Result};
use usmap_decoder::DecoderConfig;

use crate::DumpArgs;
use crate::input;

/// Run the `usmap dump` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or the JSON
/// cannot be written.
pub fn run(args: &DumpArgs, config: DecoderConfig) -> Result<()> {
    let doc = input::load(&args.file, config)?;

    let json = if args.compact {
        serde_json::to_string(&doc)
    } else {
        serde_json::to_string_pretty(&doc)
    }
    .context("failed to serialize document")?;

    if let Some(path) = &args.output {
        fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{json}").context("cannot write to stdout")?;
    }
    Ok(())
}
