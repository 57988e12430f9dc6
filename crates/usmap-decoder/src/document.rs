use std::fmt;

use usmap_types::{EnumDef, NameTable, StructSchema};
use usmap_wire::UsmapHeader;

/// A fully decoded mapping file.
///
/// Every name reference has already been resolved, so the document is
/// self-contained. It is only ever produced whole: a decode either
/// returns a complete document or an error.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────┐
/// │ MappingDocument                                         │
/// │   header:  UsmapHeader       ← version, compression     │
/// │   names:   NameTable         ← interned strings         │
/// │   enums:   Vec<EnumDef>      ← file order               │
/// │   schemas: Vec<StructSchema> ← file order               │
/// └─────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MappingDocument {
    pub header: UsmapHeader,
    pub names: NameTable,
    pub enums: Vec<EnumDef>,
    pub schemas: Vec<StructSchema>,
}

impl MappingDocument {
    /// First schema named `name`.
    #[must_use]
    pub fn schema(&self, name: &str) -> Option<&StructSchema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    /// First enum named `name`.
    #[must_use]
    pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Ancestors of `schema`, nearest first.
    ///
    /// Stops at the first super type that has no schema in this file, or
    /// at a name already visited.
    #[must_use]
    pub fn super_chain<'a>(&'a self, schema: &'a StructSchema) -> Vec<&'a StructSchema> {
        let mut chain: Vec<&StructSchema> = Vec::new();
        let mut current = schema;
        while let Some(parent) = current.super_type.as_deref().and_then(|n| self.schema(n)) {
            if parent.name == schema.name || chain.iter().any(|s| s.name == parent.name) {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    #[must_use]
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            names: self.names.len(),
            enums: self.enums.len(),
            schemas: self.schemas.len(),
        }
    }
}

/// Table sizes of a [`MappingDocument`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DocumentSummary {
    pub names: usize,
    pub enums: usize,
    pub schemas: usize,
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Names: {} | Enums: {} | Schemas: {}",
            self.names, self.enums, self.schemas
        )
    }
}
