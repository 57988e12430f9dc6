use std::fmt;

use usmap_wire::ByteReader;

use crate::error::TypeError;
use crate::names::NameTable;
use crate::property_tag::PropertyTag;

/// Default nesting limit for property type trees.
///
/// Real engine types rarely nest past four levels
/// (`Map<Name, Array<Struct<...>>>`); the limit only exists to stop
/// hostile input from exhausting the stack.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Storage shape of a property: a leaf, or a container around further
/// property types.
///
/// Each node owns its children, so a decoded type is always a finite tree.
///
/// ```text
///   Map ─┬─ key:   Scalar(Name)
///        └─ value: Array ── inner: Struct { "Vector" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PropertyType {
    /// Leaf type with no trailing data (ints, floats, names, object refs...).
    Scalar(PropertyTag),
    /// Enum stored as `inner` (usually `Byte`), named by `enum_name`.
    Enum {
        inner: Box<PropertyType>,
        enum_name: String,
    },
    Struct {
        struct_name: String,
    },
    Array {
        inner: Box<PropertyType>,
    },
    Set {
        inner: Box<PropertyType>,
    },
    Optional {
        inner: Box<PropertyType>,
    },
    Map {
        key: Box<PropertyType>,
        value: Box<PropertyType>,
    },
}

impl PropertyType {
    /// Decode one property type tree.
    ///
    /// `max_depth` bounds how many nodes deep the tree may go; the root is
    /// depth 1.
    ///
    /// # Errors
    ///
    /// - [`TypeError::UnknownPropertyType`] for a tag outside the grammar.
    /// - [`TypeError::IndexOutOfRange`] for an unresolvable enum/struct name.
    /// - [`TypeError::RecursionLimitExceeded`] if nesting passes `max_depth`.
    /// - [`TypeError::Wire`] if the input ends mid-tree.
    pub fn decode(
        reader: &mut ByteReader<'_>,
        names: &NameTable,
        max_depth: usize,
    ) -> Result<Self, TypeError> {
        Self::decode_at(reader, names, 1, max_depth)
    }

    fn decode_at(
        reader: &mut ByteReader<'_>,
        names: &NameTable,
        depth: usize,
        max_depth: usize,
    ) -> Result<Self, TypeError> {
        if depth > max_depth {
            return Err(TypeError::RecursionLimitExceeded {
                limit: max_depth,
                offset: reader.position(),
            });
        }

        let offset = reader.position();
        let raw = reader.read_u8()?;
        let tag = PropertyTag::from_wire_byte(raw)
            .ok_or(TypeError::UnknownPropertyType { value: raw, offset })?;

        let child = |reader: &mut ByteReader<'_>| -> Result<Box<Self>, TypeError> {
            Self::decode_at(reader, names, depth + 1, max_depth).map(Box::new)
        };

        Ok(match tag {
            PropertyTag::Enum => {
                let inner = child(reader)?;
                let enum_name = names.read_name(reader, "enum type name")?;
                Self::Enum { inner, enum_name }
            }
            PropertyTag::Struct => Self::Struct {
                struct_name: names.read_name(reader, "struct type name")?,
            },
            PropertyTag::Array => Self::Array {
                inner: child(reader)?,
            },
            PropertyTag::Set => Self::Set {
                inner: child(reader)?,
            },
            PropertyTag::Optional => Self::Optional {
                inner: child(reader)?,
            },
            PropertyTag::Map => {
                let key = child(reader)?;
                let value = child(reader)?;
                Self::Map { key, value }
            }
            scalar => Self::Scalar(scalar),
        })
    }

    /// The wire tag of this node.
    #[must_use]
    pub fn tag(&self) -> PropertyTag {
        match self {
            Self::Scalar(tag) => *tag,
            Self::Enum { .. } => PropertyTag::Enum,
            Self::Struct { .. } => PropertyTag::Struct,
            Self::Array { .. } => PropertyTag::Array,
            Self::Set { .. } => PropertyTag::Set,
            Self::Optional { .. } => PropertyTag::Optional,
            Self::Map { .. } => PropertyTag::Map,
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Scalar(_) | Self::Struct { .. } => 1,
            Self::Enum { inner, .. }
            | Self::Array { inner }
            | Self::Set { inner }
            | Self::Optional { inner } => 1 + inner.depth(),
            Self::Map { key, value } => 1 + key.depth().max(value.depth()),
        }
    }
}

impl fmt::Display for PropertyType {
    /// Compact type expression, e.g. `Map<Name, Array<Struct<Vector>>>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(tag) => f.write_str(tag.short_name()),
            Self::Enum { inner, enum_name } => write!(f, "Enum<{enum_name} as {inner}>"),
            Self::Struct { struct_name } => write!(f, "Struct<{struct_name}>"),
            Self::Array { inner } => write!(f, "Array<{inner}>"),
            Self::Set { inner } => write!(f, "Set<{inner}>"),
            Self::Optional { inner } => write!(f, "Optional<{inner}>"),
            Self::Map { key, value } => write!(f, "Map<{key}, {value}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usmap_wire::WireError;

    fn names() -> NameTable {
        NameTable::from_names(vec!["EColor".into(), "Vector".into(), "Health".into()])
    }

    fn decode(bytes: &[u8]) -> Result<PropertyType, TypeError> {
        PropertyType::decode(&mut ByteReader::new(bytes), &names(), DEFAULT_MAX_DEPTH)
    }

    fn with_index(mut bytes: Vec<u8>, index: u32) -> Vec<u8> {
        bytes.extend_from_slice(&index.to_le_bytes());
        bytes
    }

    #[test]
    fn every_scalar_tag_is_a_leaf() {
        for &tag in PropertyTag::ALL.iter().filter(|t| t.is_scalar()) {
            let bytes = [tag.to_wire_byte(), 0xEE];
            let mut reader = ByteReader::new(&bytes);
            let ty = PropertyType::decode(&mut reader, &names(), DEFAULT_MAX_DEPTH).unwrap();
            assert_eq!(ty, PropertyType::Scalar(tag));
            assert_eq!(reader.position(), 1, "{tag:?} consumed trailing bytes");
        }
    }

    #[test]
    fn enum_wraps_inner_then_reads_name() {
        let bytes = with_index(vec![26, 0], 0);
        let ty = decode(&bytes).unwrap();
        assert_eq!(
            ty,
            PropertyType::Enum {
                inner: Box::new(PropertyType::Scalar(PropertyTag::Byte)),
                enum_name: "EColor".into(),
            }
        );
    }

    #[test]
    fn struct_reads_name_only() {
        let bytes = with_index(vec![9], 1);
        assert_eq!(
            decode(&bytes).unwrap(),
            PropertyType::Struct {
                struct_name: "Vector".into()
            }
        );
    }

    #[test]
    fn map_reads_key_then_value() {
        // Map<Name, Array<Struct<Vector>>>
        let bytes = with_index(vec![24, 5, 8, 9], 1);
        let ty = decode(&bytes).unwrap();
        match &ty {
            PropertyType::Map { key, value } => {
                assert_eq!(**key, PropertyType::Scalar(PropertyTag::Name));
                assert_eq!(value.tag(), PropertyTag::Array);
            }
            other => panic!("expected Map, got {other:?}"),
        }
        assert_eq!(ty.depth(), 3);
    }

    #[test]
    fn set_and_optional_are_single_child() {
        assert_eq!(
            decode(&[25, 2]).unwrap(),
            PropertyType::Set {
                inner: Box::new(PropertyType::Scalar(PropertyTag::Int))
            }
        );
        assert_eq!(
            decode(&[28, 29]).unwrap(),
            PropertyType::Optional {
                inner: Box::new(PropertyType::Scalar(PropertyTag::Utf8Str))
            }
        );
    }

    #[test]
    fn unknown_tag_is_rejected() {
        // Array whose inner tag is garbage: offset points at the inner tag.
        let result = decode(&[8, 0xFF]);
        assert!(matches!(
            result,
            Err(TypeError::UnknownPropertyType {
                value: 0xFF,
                offset: 1
            })
        ));
    }

    #[test]
    fn enum_name_out_of_range() {
        let bytes = with_index(vec![26, 0], 3);
        assert!(matches!(
            decode(&bytes),
            Err(TypeError::IndexOutOfRange {
                what: "enum type name",
                index: 3,
                len: 3,
                offset: 2
            })
        ));
    }

    #[test]
    fn truncated_map_value() {
        assert!(matches!(
            decode(&[24, 5]),
            Err(TypeError::Wire(WireError::UnexpectedEof { offset: 2, .. }))
        ));
    }

    #[test]
    fn depth_limit_is_inclusive() {
        let names = names();
        // Array<Array<Int>> has depth 3.
        let bytes = [8, 8, 2];
        let ok = PropertyType::decode(&mut ByteReader::new(&bytes), &names, 3).unwrap();
        assert_eq!(ok.depth(), 3);

        let err = PropertyType::decode(&mut ByteReader::new(&bytes), &names, 2).unwrap_err();
        assert!(matches!(
            err,
            TypeError::RecursionLimitExceeded { limit: 2, offset: 2 }
        ));
    }

    #[test]
    fn deep_nesting_fails_without_overflowing_the_stack() {
        let bytes = vec![8u8; 100_000];
        let result = decode(&bytes);
        assert!(matches!(
            result,
            Err(TypeError::RecursionLimitExceeded {
                limit: DEFAULT_MAX_DEPTH,
                ..
            })
        ));
    }

    #[test]
    fn display_renders_type_expressions() {
        let map = decode(&with_index(vec![24, 5, 8, 9], 1)).unwrap();
        insta::assert_snapshot!(map.to_string(), @"Map<Name, Array<Struct<Vector>>>");

        let en = decode(&with_index(vec![26, 0], 0)).unwrap();
        insta::assert_snapshot!(en.to_string(), @"Enum<EColor as Byte>");

        let opt = decode(&[28, 25, 27]).unwrap();
        insta::assert_snapshot!(opt.to_string(), @"Optional<Set<FieldPath>>");
    }
}
