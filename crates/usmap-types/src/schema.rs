use usmap_wire::ByteReader;

use crate::capped_capacity;
use crate::error::TypeError;
use crate::names::NameTable;
use crate::property::PropertyType;

/// One serialized property of a [`StructSchema`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyDef {
    pub name: String,
    /// Slot in the owning class's declared property layout. Slots are
    /// neither contiguous nor ordered across a schema.
    pub schema_index: u16,
    /// Static array arity (1 for plain properties).
    pub array_size: u8,
    pub ty: PropertyType,
}

impl PropertyDef {
    /// Decode one property entry.
    ///
    /// ```text
    /// slot (u16) │ array size (u8) │ name index (u32) │ type tree
    /// ```
    ///
    /// # Errors
    ///
    /// Any [`TypeError`] raised by name resolution or the type tree.
    pub fn decode(
        reader: &mut ByteReader<'_>,
        names: &NameTable,
        max_depth: usize,
    ) -> Result<Self, TypeError> {
        let schema_index = reader.read_u16()?;
        let array_size = reader.read_u8()?;
        let name = names.read_name(reader, "property name")?;
        let ty = PropertyType::decode(reader, names, max_depth)?;
        Ok(Self {
            name,
            schema_index,
            array_size,
            ty,
        })
    }
}

/// Metadata for one class or struct.
///
/// ```text
/// ┌─────────────────────────┬────────┬──────────────────────────────────┐
/// │ Field                   │ Size   │ Notes                            │
/// ├─────────────────────────┼────────┼──────────────────────────────────┤
/// │ name index              │ 4      │                                  │
/// │ super type index        │ 4      │ 0xFFFFFFFF = no super type       │
/// │ declared property count │ 2      │ includes non-serialized slots    │
/// │ serialized count        │ 2      │ number of entries that follow    │
/// │ properties              │ var    │ see PropertyDef::decode          │
/// └─────────────────────────┴────────┴──────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StructSchema {
    pub name: String,
    pub super_type: Option<String>,
    /// Total property slots of the class. May exceed `properties.len()`.
    pub declared_property_count: u16,
    pub properties: Vec<PropertyDef>,
}

impl StructSchema {
    /// Decode a single schema entry.
    ///
    /// # Errors
    ///
    /// Any [`TypeError`] raised by name resolution, property decoding, or
    /// truncation.
    pub fn decode(
        reader: &mut ByteReader<'_>,
        names: &NameTable,
        max_depth: usize,
    ) -> Result<Self, TypeError> {
        let name = names.read_name(reader, "schema name")?;
        let super_type = names.read_optional_name(reader, "super type")?;
        let declared_property_count = reader.read_u16()?;
        let serialized = reader.read_u16()?;

        // slot + array size + name index + tag
        let mut properties =
            Vec::with_capacity(usize::from(serialized).min(reader.remaining() / 8));
        for _ in 0..serialized {
            properties.push(PropertyDef::decode(reader, names, max_depth)?);
        }

        Ok(Self {
            name,
            super_type,
            declared_property_count,
            properties,
        })
    }

    /// Decode the `u32`-counted schema table.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode).
    pub fn decode_table(
        reader: &mut ByteReader<'_>,
        names: &NameTable,
        max_depth: usize,
    ) -> Result<Vec<Self>, TypeError> {
        let count = reader.read_u32()?;
        let mut schemas = Vec::with_capacity(capped_capacity(count, reader.remaining(), 12));
        for _ in 0..count {
            schemas.push(Self::decode(reader, names, max_depth)?);
        }
        Ok(schemas)
    }

    /// Look up a serialized property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }
}
