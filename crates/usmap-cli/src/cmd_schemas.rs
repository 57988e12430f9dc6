/// Implementation of `usmap schemas`.
///
/// # Output format
///
/// ```text
/// Actor: Object | 2 properties (14 declared)
///   [0] RootComponent: Object
///   [3] Tags: Array<Name>
/// ```
///
/// Static arrays append their arity, e.g. `Floats: Float [4]`.
use anyhow::{Result, bail};
use usmap_decoder::{DecoderConfig, MappingDocument, StructSchema};

use crate::SchemasArgs;
use crate::input;

/// Run the `usmap schemas` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if `--name`
/// matches no schema.
pub fn run(args: &SchemasArgs, config: DecoderConfig) -> Result<()> {
    let doc = input::load(&args.file, config)?;

    if let Some(name) = &args.name {
        let Some(schema) = doc.schema(name) else {
            bail!("no schema named {name:?}");
        };
        print_schema(&doc, schema, args.ancestors);
        return Ok(());
    }

    for schema in &doc.schemas {
        print_schema(&doc, schema, args.ancestors);
    }
    Ok(())
}

fn print_schema(doc: &MappingDocument, schema: &StructSchema, ancestors: bool) {
    println!("{}", schema_line(schema));

    if ancestors {
        let chain: Vec<&str> = doc
            .super_chain(schema)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        if !chain.is_empty() {
            println!("  ancestors: {}", chain.join(" -> "));
        }
    }

    for prop in &schema.properties {
        let arity = if prop.array_size > 1 {
            format!(" [{}]", prop.array_size)
        } else {
            String::new()
        };
        println!("  [{}] {}: {}{arity}", prop.schema_index, prop.name, prop.ty);
    }
}

/// `Name: Super | N properties (M declared)`, or without the super type.
fn schema_line(schema: &StructSchema) -> String {
    let super_part = schema
        .super_type
        .as_deref()
        .map(|s| format!(": {s}"))
        .unwrap_or_default();
    format!(
        "{}{super_part} | {} properties ({} declared)",
        schema.name,
        schema.properties.len(),
        schema.declared_property_count
    )
}
