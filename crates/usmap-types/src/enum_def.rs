use usmap_wire::{ByteReader, FieldWidths};

use crate::capped_capacity;
use crate::error::TypeError;
use crate::names::NameTable;

/// A named enum and its member names, resolved from the name table.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────┐
/// │ name index (u32) │                                          │
/// │ member count     │ u8, or u16 from LargeEnums               │
/// │ member indices   │ count × u32                              │
/// └──────────────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnumDef {
    pub name: String,
    pub members: Vec<String>,
}

impl EnumDef {
    /// Decode a single enum entry.
    ///
    /// # Errors
    ///
    /// [`TypeError::IndexOutOfRange`] if the enum or a member name does
    /// not resolve; [`TypeError::Wire`] on truncation.
    pub fn decode(
        reader: &mut ByteReader<'_>,
        names: &NameTable,
        widths: FieldWidths,
    ) -> Result<Self, TypeError> {
        let name = names.read_name(reader, "enum name")?;
        let count = if widths.large_enums {
            reader.read_u16()?
        } else {
            u16::from(reader.read_u8()?)
        };

        let mut members = Vec::with_capacity(usize::from(count).min(reader.remaining() / 4));
        for _ in 0..count {
            members.push(names.read_name(reader, "enum member")?);
        }

        Ok(Self { name, members })
    }

    /// Decode the `u32`-counted enum table.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode).
    pub fn decode_table(
        reader: &mut ByteReader<'_>,
        names: &NameTable,
        widths: FieldWidths,
    ) -> Result<Vec<Self>, TypeError> {
        let count = reader.read_u32()?;
        // name index + a one-byte member count
        let mut enums = Vec::with_capacity(capped_capacity(count, reader.remaining(), 5));
        for _ in 0..count {
            enums.push(Self::decode(reader, names, widths)?);
        }
        Ok(enums)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> NameTable {
        NameTable::from_names(vec![
            "EColor".into(),
            "Red".into(),
            "Green".into(),
            "Blue".into(),
        ])
    }

    fn push_u32(buf: &mut Vec<u8>, v: u32) {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    #[test]
    fn decodes_small_enum_table() {
        let mut buf = Vec::new();
        push_u32(&mut buf, 1);
        push_u32(&mut buf, 0);
        buf.push(3);
        for idx in [1, 2, 3] {
            push_u32(&mut buf, idx);
        }

        let enums =
            EnumDef::decode_table(&mut ByteReader::new(&buf), &names(), FieldWidths::default())
                .unwrap();
        assert_eq!(
            enums,
            vec![EnumDef {
                name: "EColor".into(),
                members: vec!["Red".into(), "Green".into(), "Blue".into()],
            }]
        );
    }

    #[test]
    fn large_enums_use_u16_counts() {
        let mut buf = Vec::new();
        push_u32(&mut buf, 0);
        buf.extend_from_slice(&300u16.to_le_bytes());
        for _ in 0..300 {
            push_u32(&mut buf, 1);
        }
        let widths = FieldWidths {
            long_names: true,
            large_enums: true,
        };
        let mut reader = ByteReader::new(&buf);
        let def = EnumDef::decode(&mut reader, &names(), widths).unwrap();
        assert_eq!(def.members.len(), 300);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn member_index_out_of_range() {
        let mut buf = Vec::new();
        push_u32(&mut buf, 0);
        buf.push(2);
        push_u32(&mut buf, 1);
        push_u32(&mut buf, 4);
        let result = EnumDef::decode(&mut ByteReader::new(&buf), &names(), FieldWidths::default());
        assert!(matches!(
            result,
            Err(TypeError::IndexOutOfRange {
                what: "enum member",
                index: 4,
                len: 4,
                offset: 9
            })
        ));
    }

    #[test]
    fn enum_name_out_of_range() {
        let mut buf = Vec::new();
        push_u32(&mut buf, 99);
        buf.push(0);
        let result = EnumDef::decode(&mut ByteReader::new(&buf), &names(), FieldWidths::default());
        assert!(matches!(
            result,
            Err(TypeError::IndexOutOfRange {
                what: "enum name",
                index: 99,
                ..
            })
        ));
    }
}
